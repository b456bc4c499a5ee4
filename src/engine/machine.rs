//! Machine core and bounded driver loop.

use super::clock::{Clock, SystemClock};
use super::error::MachineError;
use super::step::Step;
use crate::config::MachineConfig;
use crate::core::{History, Id, Tables};
use crate::registry::Definition;
use std::time::Duration;
use tracing::{debug, trace};

/// A running flow over a borrowed world value.
///
/// The machine never owns the world. It holds a mutable borrow for its
/// whole lifetime, so callers feed input through [`Machine::world_mut`]
/// between ticks. Dropping the machine ends the flow.
pub struct Machine<'w, S: Id, T: Id, A: Id, W, C: Clock = SystemClock> {
    definition: Definition<S, T, A, W>,
    world: &'w mut W,
    current: S,
    history: History<S, T>,
    config: MachineConfig,
    clock: C,
}

impl<'w, S: Id, T: Id, A: Id, W> Machine<'w, S, T, A, W, SystemClock> {
    /// Start in the tables' declared initial state.
    pub fn new(definition: Definition<S, T, A, W>, world: &'w mut W) -> Self {
        let initial = definition.tables().initial_state().clone();
        Self::starting_at(definition, world, initial)
    }

    /// Start in an explicit state.
    pub fn starting_at(definition: Definition<S, T, A, W>, world: &'w mut W, initial: S) -> Self {
        let config = MachineConfig::default();
        Self {
            definition,
            world,
            history: History::new(initial.clone(), config.history_limit),
            current: initial,
            config,
            clock: SystemClock,
        }
    }
}

impl<'w, S: Id, T: Id, A: Id, W, C: Clock> Machine<'w, S, T, A, W, C> {
    /// Replace the time source used by the driver loop.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Machine<'w, S, T, A, W, C2> {
        Machine {
            definition: self.definition,
            world: self.world,
            current: self.current,
            history: self.history,
            config: self.config,
            clock,
        }
    }

    pub fn with_config(mut self, config: MachineConfig) -> Self {
        self.history.set_limit(config.history_limit);
        self.config = config;
        self
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn world(&self) -> &W {
        &*self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut *self.world
    }

    pub fn definition(&self) -> &Definition<S, T, A, W> {
        &self.definition
    }

    /// Registries stay open after start; flows may register lazily.
    pub fn definition_mut(&mut self) -> &mut Definition<S, T, A, W> {
        &mut self.definition
    }

    pub fn tables(&self) -> &Tables<S, T, A> {
        self.definition.tables()
    }

    pub fn history(&self) -> &History<S, T> {
        &self.history
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Decide what to do this cycle without changing anything.
    ///
    /// The first outgoing transition (in declaration order) whose trigger
    /// is true wins; later transitions are not evaluated. Transitions with
    /// no record in the transition table are skipped.
    pub fn update(&self) -> Step<S, T, A> {
        let tables = self.definition.tables();
        let world: &W = &*self.world;

        let fired = tables
            .transitions_for_state(&self.current)
            .unwrap_or_default()
            .iter()
            .filter_map(|t| tables.target_state_for_transition(t).map(|s| (t, s)))
            .find(|(t, _)| self.definition.is_triggered(t, world));

        match fired {
            None => Step::Stay {
                actions: tables
                    .in_state_actions_for_state(&self.current)
                    .map(<[A]>::to_vec)
                    .unwrap_or_default(),
            },
            Some((fired, target)) => {
                let actions = [
                    tables.exit_action_for_state(&self.current),
                    tables.action_for_transition(fired),
                    tables.entry_action_for_state(target),
                ]
                .into_iter()
                .flatten()
                .cloned()
                .collect();

                Step::Transition {
                    fired: fired.clone(),
                    actions,
                    target: target.clone(),
                }
            }
        }
    }

    /// Run one update/execute/advance cycle.
    ///
    /// If an action fails the remaining actions are skipped and the state
    /// is left unchanged.
    pub fn step(&mut self) -> Result<Step<S, T, A>, MachineError> {
        let step = self.update();

        for action in step.actions() {
            trace!(
                state = self.current.name(),
                action = action.name(),
                "running action"
            );
            self.definition
                .run_action(action, &mut *self.world)
                .map_err(|source| MachineError::Action {
                    action: action.name().to_string(),
                    state: self.current.name().to_string(),
                    source,
                })?;
        }

        if let Step::Transition { fired, target, .. } = &step {
            debug!(
                from = self.current.name(),
                via = fired.name(),
                to = target.name(),
                "transition fired"
            );
            let from = std::mem::replace(&mut self.current, target.clone());
            self.history.record(from, fired.clone(), target.clone());
        }

        Ok(step)
    }

    /// Drive the machine until `stop` holds or the configured budget is spent.
    pub fn update_until<F>(&mut self, stop: F) -> Result<(), MachineError>
    where
        F: FnMut(&Self) -> bool,
    {
        let budget = self.config.max_update();
        self.update_until_within(stop, budget)
    }

    /// Drive the machine until `stop` holds or `budget` has elapsed.
    ///
    /// Both conditions are checked between cycles only, so a slow action
    /// can overrun the budget. The two stop reasons are not distinguished;
    /// inspect the world or [`Machine::current_state`] to tell them apart.
    pub fn update_until_within<F>(
        &mut self,
        mut stop: F,
        budget: Duration,
    ) -> Result<(), MachineError>
    where
        F: FnMut(&Self) -> bool,
    {
        let started = self.clock.now();
        let mut cycles = 0usize;

        loop {
            if stop(&*self) {
                trace!(cycles, state = self.current.name(), "stop condition met");
                return Ok(());
            }

            let elapsed = self.clock.now().saturating_duration_since(started);
            if elapsed >= budget {
                trace!(
                    cycles,
                    elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                    state = self.current.name(),
                    "update budget spent"
                );
                return Ok(());
            }

            self.step()?;
            cycles += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StateRecord, TransitionRecord};
    use crate::engine::ManualClock;
    use crate::registry::ActionError;

    #[derive(Default)]
    struct World {
        go: bool,
        skip: bool,
        log: Vec<String>,
    }

    type Def = Definition<String, String, String, World>;

    fn s(value: &str) -> String {
        value.to_string()
    }

    fn logging(def: &mut Def, action: &str) {
        let name = action.to_string();
        def.register_action(s(action), move |w: &mut World| {
            w.log.push(name.clone());
            Ok(())
        });
    }

    fn definition() -> Def {
        let mut def = Definition::from_records(
            s("a"),
            vec![
                StateRecord::new(s("a"))
                    .in_state(s("tick_a"))
                    .exit(s("exit_a"))
                    .transition(s("a_to_b"))
                    .transition(s("a_to_c")),
                StateRecord::new(s("b")).entry(s("enter_b")),
                StateRecord::new(s("c")),
            ],
            vec![
                TransitionRecord::new(s("a_to_b"), s("b")).action(s("move_ab")),
                TransitionRecord::new(s("a_to_c"), s("c")),
            ],
        );
        for action in ["tick_a", "exit_a", "enter_b", "move_ab"] {
            logging(&mut def, action);
        }
        def
    }

    #[test]
    fn stays_when_nothing_fires() {
        let mut world = World::default();
        let machine = Machine::new(definition(), &mut world);

        assert_eq!(machine.update(), Step::Stay { actions: vec![s("tick_a")] });
        assert_eq!(machine.current_state(), "a");
    }

    #[test]
    fn update_orders_exit_transition_entry() {
        let mut world = World::default();
        let mut def = definition();
        def.register_trigger(s("a_to_b"), |w: &World| w.go);
        let mut machine = Machine::new(def, &mut world);
        machine.world_mut().go = true;

        assert_eq!(
            machine.update(),
            Step::Transition {
                fired: s("a_to_b"),
                actions: vec![s("exit_a"), s("move_ab"), s("enter_b")],
                target: s("b"),
            }
        );
    }

    #[test]
    fn update_drops_absent_action_slots() {
        let mut world = World::default();
        let mut def = definition();
        def.register_trigger(s("a_to_c"), |_: &World| true);
        let machine = Machine::new(def, &mut world);

        assert_eq!(machine.update().actions(), &[s("exit_a")]);
    }

    #[test]
    fn update_does_not_change_state() {
        let mut world = World::default();
        let mut def = definition();
        def.register_trigger(s("a_to_b"), |_: &World| true);
        let machine = Machine::new(def, &mut world);

        let first = machine.update();
        let second = machine.update();
        assert_eq!(first, second);
        assert_eq!(machine.current_state(), "a");
        assert!(machine.world().log.is_empty());
    }

    #[test]
    fn first_declared_trigger_wins() {
        let mut world = World::default();
        let mut def = definition();
        def.register_trigger(s("a_to_b"), |_: &World| true);
        def.register_trigger(s("a_to_c"), |_: &World| true);
        let machine = Machine::new(def, &mut world);

        assert_eq!(machine.update().fired(), Some(&s("a_to_b")));
    }

    #[test]
    fn later_transitions_are_not_evaluated_after_a_match() {
        use std::cell::Cell;
        use std::rc::Rc;

        let evaluated = Rc::new(Cell::new(false));
        let seen = Rc::clone(&evaluated);

        let mut world = World::default();
        let mut def = definition();
        def.register_trigger(s("a_to_b"), |_: &World| true);
        def.register_trigger(s("a_to_c"), move |_: &World| {
            seen.set(true);
            true
        });
        let machine = Machine::new(def, &mut world);

        machine.update();
        assert!(!evaluated.get());
    }

    #[test]
    fn transitions_without_records_are_skipped() {
        let mut world = World::default();
        let mut def: Def = Definition::from_records(
            s("a"),
            vec![StateRecord::new(s("a"))
                .transition(s("ghost"))
                .transition(s("real"))],
            vec![TransitionRecord::new(s("real"), s("b"))],
        );
        def.register_trigger(s("ghost"), |_: &World| true);
        def.register_trigger(s("real"), |_: &World| true);
        let machine = Machine::new(def, &mut world);

        assert_eq!(machine.update().fired(), Some(&s("real")));
    }

    #[test]
    fn unknown_current_state_is_absorbing() {
        let mut world = World::default();
        let machine = Machine::starting_at(definition(), &mut world, s("limbo"));

        assert_eq!(machine.update(), Step::Stay { actions: vec![] });
    }

    #[test]
    fn step_runs_actions_and_advances() {
        let mut world = World::default();
        let mut def = definition();
        def.register_trigger(s("a_to_b"), |w: &World| w.go);
        let mut machine = Machine::new(def, &mut world);

        machine.step().unwrap();
        assert_eq!(machine.current_state(), "a");
        assert_eq!(machine.world().log, vec!["tick_a"]);

        machine.world_mut().go = true;
        let step = machine.step().unwrap();
        assert!(step.is_transition());
        assert_eq!(machine.current_state(), "b");
        assert_eq!(
            machine.world().log,
            vec!["tick_a", "exit_a", "move_ab", "enter_b"]
        );
        assert_eq!(machine.history().visits(&s("b")), 1);
    }

    #[test]
    fn failing_action_keeps_state_and_propagates() {
        let mut world = World::default();
        let mut def = definition();
        def.register_trigger(s("a_to_b"), |_: &World| true);
        def.register_action(s("move_ab"), |_: &mut World| {
            Err(ActionError::Failed("blocked".into()))
        });
        let mut machine = Machine::new(def, &mut world);

        let err = machine.step().unwrap_err();
        assert_eq!(
            err,
            MachineError::Action {
                action: s("move_ab"),
                state: s("a"),
                source: ActionError::Failed("blocked".into()),
            }
        );
        assert_eq!(machine.current_state(), "a");
        assert_eq!(machine.world().log, vec!["exit_a"]);
        assert!(machine.history().is_empty());
    }

    #[test]
    fn update_until_stops_on_predicate_before_running() {
        let mut world = World::default();
        let mut machine = Machine::new(definition(), &mut world);

        machine.update_until(|_| true).unwrap();
        assert!(machine.world().log.is_empty());
    }

    #[test]
    fn update_until_respects_budget() {
        let mut world = World::default();
        let mut machine = Machine::new(definition(), &mut world)
            .with_clock(ManualClock::stepping(Duration::from_millis(10)));

        machine.update_until(|_| false).unwrap();

        // Readings at 0 (start), then 10, 20, 30, 40 run a cycle; 50 stops.
        assert_eq!(machine.world().log.len(), 4);
        assert_eq!(machine.current_state(), "a");
    }

    #[test]
    fn zero_budget_runs_nothing() {
        let mut world = World::default();
        let mut machine =
            Machine::new(definition(), &mut world).with_clock(ManualClock::new());

        machine
            .update_until_within(|_| false, Duration::ZERO)
            .unwrap();
        assert!(machine.world().log.is_empty());
    }

    #[test]
    fn config_budget_is_used() {
        let mut world = World::default();
        let mut machine = Machine::new(definition(), &mut world)
            .with_config(MachineConfig::default().with_max_update(Duration::from_millis(20)))
            .with_clock(ManualClock::stepping(Duration::from_millis(10)));

        machine.update_until(|_| false).unwrap();
        assert_eq!(machine.world().log.len(), 1);
    }

    #[test]
    fn stop_predicate_sees_world_flags() {
        let mut world = World::default();
        let mut def = definition();
        def.register_trigger(s("a_to_c"), |w: &World| w.skip);
        let mut machine = Machine::new(def, &mut world).with_clock(ManualClock::new());
        machine.world_mut().skip = true;

        machine
            .update_until(|m| m.current_state() == "c")
            .unwrap();
        assert_eq!(machine.current_state(), "c");
        assert_eq!(machine.history().len(), 1);
    }
}
