//! Core table types.
//!
//! This module contains the pure data side of the engine:
//! - Identifiers via the `Id` trait
//! - State and transition records
//! - Tables with keyed, non-failing lookups
//! - Bounded history of fired transitions
//!
//! Nothing in this module runs caller code.

mod history;
mod id;
mod record;
mod tables;

pub use history::{FiredTransition, History};
pub use id::Id;
pub use record::{StateRecord, TransitionRecord};
pub use tables::{TableSpec, Tables};
