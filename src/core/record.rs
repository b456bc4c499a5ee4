//! State and transition records.
//!
//! Records are the authored rows of the tables. They are plain data and
//! carry no behaviour; predicates and action logic live in the registries.

use super::id::Id;
use serde::{Deserialize, Serialize};

/// One row of the state table.
///
/// # Example
///
/// ```rust
/// use flowtable::core::StateRecord;
///
/// let record: StateRecord<String, String, String> = StateRecord::new("await_confirm".into())
///     .entry("show_confirm".into())
///     .in_state("read_input".into())
///     .exit("hide_confirm".into())
///     .transition("confirmed".into())
///     .transition("cancelled".into());
///
/// assert_eq!(record.transitions.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>, T: Deserialize<'de>, A: Deserialize<'de>"))]
pub struct StateRecord<S, T, A> {
    pub id: S,
    /// Actions fired on every cycle the machine stays in this state
    #[serde(default)]
    pub in_state: Vec<A>,
    #[serde(default)]
    pub entry: Option<A>,
    #[serde(default)]
    pub exit: Option<A>,
    /// Outgoing transitions in evaluation order
    #[serde(default)]
    pub transitions: Vec<T>,
}

impl<S: Id, T: Id, A: Id> StateRecord<S, T, A> {
    /// Create a record with no actions and no outgoing transitions.
    pub fn new(id: S) -> Self {
        Self {
            id,
            in_state: Vec::new(),
            entry: None,
            exit: None,
            transitions: Vec::new(),
        }
    }

    /// Append an in-state action.
    pub fn in_state(mut self, action: A) -> Self {
        self.in_state.push(action);
        self
    }

    /// Set the entry action.
    pub fn entry(mut self, action: A) -> Self {
        self.entry = Some(action);
        self
    }

    /// Set the exit action.
    pub fn exit(mut self, action: A) -> Self {
        self.exit = Some(action);
        self
    }

    /// Append an outgoing transition. Declaration order is evaluation order.
    pub fn transition(mut self, transition: T) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Every action this state references, in-state actions first.
    pub fn referenced_actions(&self) -> impl Iterator<Item = &A> {
        self.in_state
            .iter()
            .chain(self.entry.iter())
            .chain(self.exit.iter())
    }
}

/// One row of the transition table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>, T: Deserialize<'de>, A: Deserialize<'de>"))]
pub struct TransitionRecord<S, T, A> {
    pub id: T,
    pub target: S,
    /// Fired exactly when this transition is taken
    #[serde(default)]
    pub action: Option<A>,
}

impl<S: Id, T: Id, A: Id> TransitionRecord<S, T, A> {
    pub fn new(id: T, target: S) -> Self {
        Self {
            id,
            target,
            action: None,
        }
    }

    pub fn action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }
}
