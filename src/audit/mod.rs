//! Completeness audit for definitions.
//!
//! Lookups and execution are permissive at runtime: a misspelled or
//! forgotten identifier silently never fires or does nothing. The audit is
//! an opt-in development check that cross-references the tables against
//! the registries and reports every gap at once, using Stillwater's
//! `Validation` to accumulate instead of stopping at the first problem.
//! It never changes runtime behaviour.
//!
//! # Example
//!
//! ```rust
//! use flowtable::core::{StateRecord, TransitionRecord};
//! use flowtable::registry::Definition;
//!
//! let definition: Definition<String, String, String, ()> = Definition::from_records(
//!     "idle".to_string(),
//!     vec![StateRecord::new("idle".into()).transition("go".into())],
//!     vec![TransitionRecord::new("go".into(), "busy".into())],
//! );
//!
//! // "busy" is undeclared and "go" has no trigger
//! assert_eq!(definition.gaps().len(), 2);
//! assert!(definition.audit().is_failure());
//! ```

mod gap;

pub use gap::Gap;

use crate::core::Id;
use crate::registry::Definition;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::debug;

impl<S: Id, T: Id, A: Id, W> Definition<S, T, A, W> {
    /// Check the tables and registries for gaps, accumulating ALL of them.
    ///
    /// Seeded defaults do not count as registrations.
    pub fn audit(&self) -> Validation<(), NonEmptyVec<Gap<S, T, A>>> {
        let tables = self.tables();
        let mut checks: Vec<Validation<(), NonEmptyVec<Gap<S, T, A>>>> = Vec::new();

        if !tables.contains_state(tables.initial_state()) {
            checks.push(Validation::fail(Gap::UnknownInitialState(
                tables.initial_state().clone(),
            )));
        }

        let mut seen_states = HashSet::new();
        for record in tables.states() {
            if !seen_states.insert(&record.id) {
                checks.push(Validation::fail(Gap::DuplicateState(record.id.clone())));
            }
            for transition in &record.transitions {
                if !tables.contains_transition(transition) {
                    checks.push(Validation::fail(Gap::UndeclaredTransition {
                        state: record.id.clone(),
                        transition: transition.clone(),
                    }));
                }
            }
        }

        let listed: HashSet<&T> = tables
            .states()
            .iter()
            .flat_map(|record| record.transitions.iter())
            .collect();

        let mut seen_transitions = HashSet::new();
        for record in tables.transitions() {
            if !seen_transitions.insert(&record.id) {
                checks.push(Validation::fail(Gap::DuplicateTransition(record.id.clone())));
                continue;
            }
            if !tables.contains_state(&record.target) {
                checks.push(Validation::fail(Gap::UndeclaredTarget {
                    transition: record.id.clone(),
                    target: record.target.clone(),
                }));
            }
            if !listed.contains(&record.id) {
                checks.push(Validation::fail(Gap::OrphanTransition(record.id.clone())));
            }
            if !self.is_trigger_registered(&record.id) {
                checks.push(Validation::fail(Gap::UnregisteredTrigger(record.id.clone())));
            }
        }

        let mut seen_actions = HashSet::new();
        let referenced = tables
            .states()
            .iter()
            .flat_map(|record| record.referenced_actions())
            .chain(tables.transitions().iter().filter_map(|r| r.action.as_ref()));
        for action in referenced {
            if seen_actions.insert(action) && !self.is_action_registered(action) {
                checks.push(Validation::fail(Gap::UnregisteredAction(action.clone())));
            }
        }

        if checks.is_empty() {
            return Validation::success(());
        }
        debug!(gaps = checks.len(), "definition audit found gaps");
        Validation::all_vec(checks).map(|_| ())
    }

    /// The audit result as a plain list, empty when nothing is missing.
    pub fn gaps(&self) -> Vec<Gap<S, T, A>> {
        match self.audit() {
            Validation::Success(()) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }
}
