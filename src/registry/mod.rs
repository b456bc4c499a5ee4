//! Trigger and action registries.
//!
//! Registries attach behaviour to the identifiers named by the tables:
//! - Triggers decide whether a transition fires
//! - Action logic mutates the world when a state or transition asks for it
//!
//! Unregistered identifiers are permissive: triggers never fire and actions
//! do nothing. Use [`Definition::audit`] to find the gaps.

mod action;
mod definition;
mod trigger;

pub use action::{ActionError, ActionLogic, ActionResult};
pub use definition::{ActionMap, Definition, TriggerMap};
pub use trigger::Trigger;
