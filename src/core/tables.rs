//! Immutable state and transition tables.
//!
//! Tables are authored once and only queried afterwards. Every lookup is
//! pure and returns `None` for unknown identifiers instead of failing.

use super::id::Id;
use super::record::{StateRecord, TransitionRecord};
use crate::config::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Serializable description of a set of tables.
///
/// This is the data-authored form of [`Tables`]; converting it with
/// [`Tables::from_spec`] builds the lookup indexes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>, T: Deserialize<'de>, A: Deserialize<'de>"))]
pub struct TableSpec<S, T, A> {
    pub initial: S,
    #[serde(default)]
    pub states: Vec<StateRecord<S, T, A>>,
    #[serde(default)]
    pub transitions: Vec<TransitionRecord<S, T, A>>,
}

/// State and transition tables with keyed lookups.
///
/// Records keep their declaration order. When two records share an id the
/// later one wins for lookups; [`crate::registry::Definition::audit`]
/// reports the duplicate.
///
/// # Example
///
/// ```rust
/// use flowtable::core::{StateRecord, Tables, TransitionRecord};
///
/// let tables: Tables<String, String, String> = Tables::new(
///     "idle".to_string(),
///     vec![
///         StateRecord::new("idle".into()).transition("start".into()),
///         StateRecord::new("busy".into()).entry("spin_up".into()),
///     ],
///     vec![TransitionRecord::new("start".into(), "busy".into())],
/// );
///
/// let target = tables.target_state_for_transition(&"start".to_string());
/// assert_eq!(target.map(String::as_str), Some("busy"));
/// assert!(tables.transitions_for_state(&"missing".to_string()).is_none());
/// ```
#[derive(Clone, Debug)]
pub struct Tables<S: Id, T: Id, A: Id> {
    initial: S,
    states: Vec<StateRecord<S, T, A>>,
    transitions: Vec<TransitionRecord<S, T, A>>,
    state_index: HashMap<S, usize>,
    transition_index: HashMap<T, usize>,
}

impl<S: Id, T: Id, A: Id> Tables<S, T, A> {
    /// Build tables from records. Never fails.
    pub fn new(
        initial: S,
        states: Vec<StateRecord<S, T, A>>,
        transitions: Vec<TransitionRecord<S, T, A>>,
    ) -> Self {
        let mut state_index = HashMap::with_capacity(states.len());
        for (position, record) in states.iter().enumerate() {
            if state_index.insert(record.id.clone(), position).is_some() {
                warn!(state = record.id.name(), "duplicate state record, later one wins");
            }
        }

        let mut transition_index = HashMap::with_capacity(transitions.len());
        for (position, record) in transitions.iter().enumerate() {
            if transition_index
                .insert(record.id.clone(), position)
                .is_some()
            {
                warn!(
                    transition = record.id.name(),
                    "duplicate transition record, later one wins"
                );
            }
        }

        Self {
            initial,
            states,
            transitions,
            state_index,
            transition_index,
        }
    }

    pub fn from_spec(spec: TableSpec<S, T, A>) -> Self {
        Self::new(spec.initial, spec.states, spec.transitions)
    }

    /// Convert back into the serializable form.
    pub fn to_spec(&self) -> TableSpec<S, T, A> {
        TableSpec {
            initial: self.initial.clone(),
            states: self.states.clone(),
            transitions: self.transitions.clone(),
        }
    }

    /// The state a new machine starts in.
    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    /// All state records in declaration order.
    pub fn states(&self) -> &[StateRecord<S, T, A>] {
        &self.states
    }

    /// All transition records in declaration order.
    pub fn transitions(&self) -> &[TransitionRecord<S, T, A>] {
        &self.transitions
    }

    pub fn state(&self, state: &S) -> Option<&StateRecord<S, T, A>> {
        self.state_index.get(state).map(|&i| &self.states[i])
    }

    pub fn transition(&self, transition: &T) -> Option<&TransitionRecord<S, T, A>> {
        self.transition_index
            .get(transition)
            .map(|&i| &self.transitions[i])
    }

    pub fn contains_state(&self, state: &S) -> bool {
        self.state_index.contains_key(state)
    }

    pub fn contains_transition(&self, transition: &T) -> bool {
        self.transition_index.contains_key(transition)
    }

    /// Outgoing transitions of `state` in declaration order.
    pub fn transitions_for_state(&self, state: &S) -> Option<&[T]> {
        self.state(state).map(|r| r.transitions.as_slice())
    }

    pub fn in_state_actions_for_state(&self, state: &S) -> Option<&[A]> {
        self.state(state).map(|r| r.in_state.as_slice())
    }

    pub fn target_state_for_transition(&self, transition: &T) -> Option<&S> {
        self.transition(transition).map(|r| &r.target)
    }

    pub fn entry_action_for_state(&self, state: &S) -> Option<&A> {
        self.state(state).and_then(|r| r.entry.as_ref())
    }

    pub fn exit_action_for_state(&self, state: &S) -> Option<&A> {
        self.state(state).and_then(|r| r.exit.as_ref())
    }

    pub fn action_for_transition(&self, transition: &T) -> Option<&A> {
        self.transition(transition).and_then(|r| r.action.as_ref())
    }
}

impl<S, T, A> Tables<S, T, A>
where
    S: Id + DeserializeOwned,
    T: Id + DeserializeOwned,
    A: Id + DeserializeOwned,
{
    /// Parse a JSON [`TableSpec`] and build tables from it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let spec: TableSpec<S, T, A> = serde_json::from_str(json)?;
        Ok(Self::from_spec(spec))
    }
}
