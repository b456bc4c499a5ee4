//! Errors surfaced by the machine.

use crate::registry::ActionError;
use thiserror::Error;

/// Errors that can occur while driving a machine.
///
/// Lookups never fail, so the only source of errors is action logic.
/// When an action fails the state change of that cycle is not applied.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("Action '{action}' failed in state '{state}': {source}")]
    Action {
        action: String,
        state: String,
        source: ActionError,
    },
}
