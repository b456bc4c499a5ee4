//! Builder for constructing tables.

use crate::builder::error::BuildError;
use crate::core::{Id, StateRecord, Tables, TransitionRecord};

/// Builder for tables with a fluent API.
///
/// # Example
///
/// ```
/// use flowtable::builder::TablesBuilder;
/// use flowtable::core::StateRecord;
/// use flowtable::id_enum;
///
/// id_enum! {
///     enum Phase { Pick, Confirm }
/// }
/// id_enum! {
///     enum Edge { Picked, Cancelled }
/// }
/// id_enum! {
///     enum Act { ShowPrompt }
/// }
///
/// let tables = TablesBuilder::new()
///     .initial(Phase::Pick)
///     .state(StateRecord::new(Phase::Confirm).entry(Act::ShowPrompt))
///     .connect(Phase::Pick, Edge::Picked, Phase::Confirm)
///     .connect(Phase::Confirm, Edge::Cancelled, Phase::Pick)
///     .build()
///     .unwrap();
///
/// assert_eq!(tables.transitions_for_state(&Phase::Pick), Some(&[Edge::Picked][..]));
/// ```
pub struct TablesBuilder<S: Id, T: Id, A: Id> {
    initial: Option<S>,
    states: Vec<StateRecord<S, T, A>>,
    transitions: Vec<TransitionRecord<S, T, A>>,
}

impl<S: Id, T: Id, A: Id> TablesBuilder<S, T, A> {
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a state record.
    pub fn state(mut self, record: StateRecord<S, T, A>) -> Self {
        self.states.push(record);
        self
    }

    pub fn states<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = StateRecord<S, T, A>>,
    {
        self.states.extend(records);
        self
    }

    /// Add a transition record.
    pub fn transition(mut self, record: TransitionRecord<S, T, A>) -> Self {
        self.transitions.push(record);
        self
    }

    pub fn transitions<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = TransitionRecord<S, T, A>>,
    {
        self.transitions.extend(records);
        self
    }

    /// Declare `transition` from `from` to `to` and append it to the
    /// outgoing list of `from`, creating that state record if needed.
    pub fn connect(self, from: S, transition: T, to: S) -> Self {
        self.connect_record(from, TransitionRecord::new(transition, to))
    }

    /// Like [`TablesBuilder::connect`] but with a transition action.
    pub fn connect_with(self, from: S, transition: T, to: S, action: A) -> Self {
        self.connect_record(from, TransitionRecord::new(transition, to).action(action))
    }

    fn connect_record(mut self, from: S, record: TransitionRecord<S, T, A>) -> Self {
        let id = record.id.clone();
        match self.states.iter_mut().rev().find(|s| s.id == from) {
            Some(state) => state.transitions.push(id),
            None => self.states.push(StateRecord::new(from).transition(id)),
        }
        self.transitions.push(record);
        self
    }

    /// Build the tables.
    /// Returns an error if no initial state was given.
    pub fn build(self) -> Result<Tables<S, T, A>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        Ok(Tables::new(initial, self.states, self.transitions))
    }
}

impl<S: Id, T: Id, A: Id> Default for TablesBuilder<S, T, A> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::id_enum! {
        enum Phase {
            Count,
            Pick,
            Confirm,
        }
    }

    crate::id_enum! {
        enum Edge {
            Many,
            Single,
            Picked,
        }
    }

    crate::id_enum! {
        enum Act {
            AutoSelect,
            Highlight,
        }
    }

    #[test]
    fn builder_validates_initial_state() {
        let result = TablesBuilder::<Phase, Edge, Act>::new().build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn connect_appends_in_declaration_order() {
        let tables = TablesBuilder::<Phase, Edge, Act>::new()
            .initial(Phase::Count)
            .connect(Phase::Count, Edge::Single, Phase::Confirm)
            .connect(Phase::Count, Edge::Many, Phase::Pick)
            .connect(Phase::Pick, Edge::Picked, Phase::Confirm)
            .build()
            .unwrap();

        assert_eq!(
            tables.transitions_for_state(&Phase::Count),
            Some(&[Edge::Single, Edge::Many][..])
        );
        assert_eq!(
            tables.target_state_for_transition(&Edge::Picked),
            Some(&Phase::Confirm)
        );
    }

    #[test]
    fn connect_extends_declared_state() {
        let tables = TablesBuilder::new()
            .initial(Phase::Pick)
            .state(StateRecord::new(Phase::Pick).in_state(Act::Highlight))
            .connect_with(Phase::Pick, Edge::Picked, Phase::Confirm, Act::AutoSelect)
            .build()
            .unwrap();

        assert_eq!(tables.states().len(), 1);
        assert_eq!(
            tables.in_state_actions_for_state(&Phase::Pick),
            Some(&[Act::Highlight][..])
        );
        assert_eq!(
            tables.action_for_transition(&Edge::Picked),
            Some(&Act::AutoSelect)
        );
    }

    #[test]
    fn bulk_records_are_kept() {
        let tables = TablesBuilder::<Phase, Edge, Act>::new()
            .initial(Phase::Count)
            .states([StateRecord::new(Phase::Count), StateRecord::new(Phase::Pick)])
            .transitions([TransitionRecord::new(Edge::Many, Phase::Pick)])
            .build()
            .unwrap();

        assert_eq!(tables.states().len(), 2);
        assert_eq!(tables.transitions().len(), 1);
    }
}
