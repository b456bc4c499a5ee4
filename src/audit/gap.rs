//! Gaps reported by the completeness audit.

use crate::core::Id;
use thiserror::Error;

/// A single inconsistency between the tables and the registries.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Gap<S: Id, T: Id, A: Id> {
    #[error("Initial state {0:?} has no state record")]
    UnknownInitialState(S),

    #[error("State {0:?} is declared more than once")]
    DuplicateState(S),

    #[error("Transition {0:?} is declared more than once")]
    DuplicateTransition(T),

    #[error("State {state:?} lists undeclared transition {transition:?}")]
    UndeclaredTransition { state: S, transition: T },

    #[error("Transition {transition:?} targets undeclared state {target:?}")]
    UndeclaredTarget { transition: T, target: S },

    #[error("Transition {0:?} is not listed by any state")]
    OrphanTransition(T),

    #[error("Transition {0:?} has no registered trigger")]
    UnregisteredTrigger(T),

    #[error("Action {0:?} has no registered logic")]
    UnregisteredAction(A),
}
