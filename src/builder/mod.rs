//! Builder API for ergonomic table and machine construction.
//!
//! This module provides fluent builders and macros for declaring tables
//! and starting machines with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;
pub mod tables;

pub use error::BuildError;
pub use machine::MachineBuilder;
pub use tables::TablesBuilder;

use crate::core::{Id, StateRecord, Tables, TransitionRecord};

/// Build tables for a straight chain of states.
///
/// `steps` lists `(transition, target)` pairs taken in order from
/// `initial`. Useful for tutorials and scripted sequences.
///
/// # Example
///
/// ```
/// use flowtable::builder::linear_tables;
/// use flowtable::core::Tables;
/// use flowtable::id_enum;
///
/// id_enum! {
///     enum Phase { Intro, Briefing, Deploy }
/// }
/// id_enum! {
///     enum Edge { Next, Begin }
/// }
/// id_enum! {
///     enum Act { Noop }
/// }
///
/// let tables: Tables<Phase, Edge, Act> = linear_tables(
///     Phase::Intro,
///     [(Edge::Next, Phase::Briefing), (Edge::Begin, Phase::Deploy)],
/// );
///
/// assert_eq!(tables.target_state_for_transition(&Edge::Begin), Some(&Phase::Deploy));
/// ```
pub fn linear_tables<S, T, A, I>(initial: S, steps: I) -> Tables<S, T, A>
where
    S: Id,
    T: Id,
    A: Id,
    I: IntoIterator<Item = (T, S)>,
{
    let mut states = Vec::new();
    let mut transitions = Vec::new();
    let mut from = initial.clone();
    for (transition, to) in steps {
        states.push(StateRecord::new(from).transition(transition.clone()));
        transitions.push(TransitionRecord::new(transition, to.clone()));
        from = to;
    }
    states.push(StateRecord::new(from));
    Tables::new(initial, states, transitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::id_enum! {
        enum Phase {
            Start,
            Middle,
            End,
        }
    }

    crate::id_enum! {
        enum Edge {
            Advance,
            Finish,
        }
    }

    crate::id_enum! {
        enum Act {
            Unused,
        }
    }

    #[test]
    fn linear_tables_chain_states() {
        let tables: Tables<Phase, Edge, Act> = linear_tables(
            Phase::Start,
            [(Edge::Advance, Phase::Middle), (Edge::Finish, Phase::End)],
        );

        assert_eq!(tables.initial_state(), &Phase::Start);
        assert_eq!(
            tables.transitions_for_state(&Phase::Start),
            Some(&[Edge::Advance][..])
        );
        assert_eq!(
            tables.transitions_for_state(&Phase::Middle),
            Some(&[Edge::Finish][..])
        );
        assert_eq!(tables.transitions_for_state(&Phase::End), Some(&[][..]));
    }

    #[test]
    fn linear_tables_without_steps_has_one_state() {
        let tables: Tables<Phase, Edge, Act> = linear_tables(Phase::Start, []);
        assert_eq!(tables.states().len(), 1);
        assert!(tables.contains_state(&Phase::Start));
    }
}
