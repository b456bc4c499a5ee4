//! Transition history tracking.
//!
//! The machine records every transition it takes so that stop predicates
//! can reason about where the flow has been (for example "stop once the
//! confirm state has been entered twice") without the driver loop knowing
//! anything about visit counts.

use super::id::Id;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// Record of a single fired transition.
#[derive(Clone, Debug, PartialEq)]
pub struct FiredTransition<S, T> {
    /// The state being left
    pub from: S,
    /// The transition that fired
    pub via: T,
    /// The state being entered
    pub to: S,
    /// When the transition was applied
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of fired transitions plus per-state visit counts.
///
/// Only the most recent `limit` transitions are retained. Visit counts are
/// never trimmed; the starting state counts as one visit.
///
/// # Example
///
/// ```rust
/// use flowtable::core::History;
///
/// let mut history: History<String, String> = History::new("idle".to_string(), 8);
/// history.record("idle".into(), "go".into(), "busy".into());
/// history.record("busy".into(), "done".into(), "idle".into());
///
/// assert_eq!(history.visits(&"idle".to_string()), 2);
/// assert_eq!(history.get_path().len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct History<S: Id, T: Id> {
    transitions: VecDeque<FiredTransition<S, T>>,
    visits: HashMap<S, usize>,
    limit: usize,
}

impl<S: Id, T: Id> History<S, T> {
    /// Create a history for a machine starting in `initial`.
    pub fn new(initial: S, limit: usize) -> Self {
        let mut visits = HashMap::new();
        visits.insert(initial, 1);
        Self {
            transitions: VecDeque::new(),
            visits,
            limit,
        }
    }

    /// Record a fired transition, dropping the oldest entry when full.
    pub fn record(&mut self, from: S, via: T, to: S) {
        *self.visits.entry(to.clone()).or_insert(0) += 1;

        if self.limit == 0 {
            return;
        }
        if self.transitions.len() == self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(FiredTransition {
            from,
            via,
            to,
            timestamp: Utc::now(),
        });
    }

    /// Change how many transitions are retained, trimming the oldest.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        while self.transitions.len() > limit {
            self.transitions.pop_front();
        }
    }

    /// Number of times `state` has been entered, including the start.
    pub fn visits(&self, state: &S) -> usize {
        self.visits.get(state).copied().unwrap_or(0)
    }

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &FiredTransition<S, T>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&FiredTransition<S, T>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Count of transitions whose id is `via` among the retained entries.
    pub fn fired_count(&self, via: &T) -> usize {
        self.transitions.iter().filter(|t| &t.via == via).count()
    }

    /// Path of states covered by the retained entries.
    ///
    /// Starts at the `from` state of the oldest retained transition and
    /// then lists the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the oldest and newest retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        match (self.transitions.front(), self.transitions.back()) {
            (Some(first), Some(last)) => last
                .timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok(),
            _ => None,
        }
    }
}
