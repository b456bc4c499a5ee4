//! Builder for constructing machines.
//!
//! Flows supply their trigger and action maps here instead of overriding
//! hooks after construction. The maps are plain closures over the world,
//! so no flow-specific subtype is needed.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Id, Tables};
use crate::engine::{Clock, Machine, SystemClock};
use crate::registry::{ActionLogic, ActionResult, Definition, Trigger};

/// Builder for constructing machines with a fluent API.
pub struct MachineBuilder<S: Id, T: Id, A: Id, W, C: Clock = SystemClock> {
    tables: Option<Tables<S, T, A>>,
    start: Option<S>,
    triggers: Vec<(T, Trigger<W>)>,
    actions: Vec<(A, ActionLogic<W>)>,
    config: MachineConfig,
    clock: C,
}

impl<S: Id, T: Id, A: Id, W> MachineBuilder<S, T, A, W, SystemClock> {
    pub fn new() -> Self {
        Self {
            tables: None,
            start: None,
            triggers: Vec::new(),
            actions: Vec::new(),
            config: MachineConfig::default(),
            clock: SystemClock,
        }
    }
}

impl<S: Id, T: Id, A: Id, W, C: Clock> MachineBuilder<S, T, A, W, C> {
    /// Set the tables (required).
    pub fn tables(mut self, tables: Tables<S, T, A>) -> Self {
        self.tables = Some(tables);
        self
    }

    /// Start somewhere other than the tables' initial state.
    pub fn start_at(mut self, state: S) -> Self {
        self.start = Some(state);
        self
    }

    pub fn trigger<F>(mut self, transition: T, predicate: F) -> Self
    where
        F: Fn(&W) -> bool + 'static,
    {
        self.triggers.push((transition, Trigger::new(predicate)));
        self
    }

    /// Add triggers, typically a flow's trigger map.
    pub fn triggers<I>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = (T, Trigger<W>)>,
    {
        self.triggers.extend(triggers);
        self
    }

    pub fn action<F>(mut self, action: A, body: F) -> Self
    where
        F: FnMut(&mut W) -> ActionResult + 'static,
    {
        self.actions.push((action, ActionLogic::new(body)));
        self
    }

    /// Add action logic, typically a flow's action map.
    pub fn actions<I>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = (A, ActionLogic<W>)>,
    {
        self.actions.extend(actions);
        self
    }

    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn clock<C2: Clock>(self, clock: C2) -> MachineBuilder<S, T, A, W, C2> {
        MachineBuilder {
            tables: self.tables,
            start: self.start,
            triggers: self.triggers,
            actions: self.actions,
            config: self.config,
            clock,
        }
    }

    /// Seed the registries, apply registrations in order, and start the
    /// machine over `world`.
    pub fn build(self, world: &mut W) -> Result<Machine<'_, S, T, A, W, C>, BuildError> {
        let tables = self.tables.ok_or(BuildError::MissingTables)?;
        let start = self
            .start
            .unwrap_or_else(|| tables.initial_state().clone());

        let mut definition = Definition::new(tables);
        definition.register_triggers(self.triggers);
        definition.register_actions(self.actions);

        Ok(Machine::starting_at(definition, world, start)
            .with_config(self.config)
            .with_clock(self.clock))
    }
}

impl<S: Id, T: Id, A: Id, W> Default for MachineBuilder<S, T, A, W, SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}
