//! Tables paired with their trigger and action registries.

use super::action::{ActionError, ActionLogic, ActionResult};
use super::trigger::Trigger;
use crate::core::{Id, StateRecord, Tables, TransitionRecord};
use std::collections::HashMap;

/// Map from transition id to its trigger, as produced by a flow's setup code.
pub type TriggerMap<T, W> = HashMap<T, Trigger<W>>;

/// Map from action id to its logic, as produced by a flow's setup code.
pub type ActionMap<A, W> = HashMap<A, ActionLogic<W>>;

/// Registry slot. Seeded slots behave as the default (never fire / no-op)
/// and do not count as registrations.
enum Slot<F> {
    Seeded,
    Registered(F),
}

/// Tables plus the trigger and action registries for one flow.
///
/// Construction seeds a default no-op for every action referenced by the
/// state table and a never-firing trigger for every declared transition.
/// Registration overwrites: the latest registration for a key wins and
/// there is no removal.
///
/// # Example
///
/// ```rust
/// use flowtable::core::{StateRecord, TransitionRecord};
/// use flowtable::registry::Definition;
///
/// struct World {
///     ready: bool,
/// }
///
/// let mut definition: Definition<String, String, String, World> = Definition::from_records(
///     "wait".to_string(),
///     vec![StateRecord::new("wait".into()).transition("go".into())],
///     vec![TransitionRecord::new("go".into(), "done".into())],
/// );
///
/// let world = World { ready: true };
/// assert!(!definition.is_triggered(&"go".to_string(), &world));
///
/// definition.register_trigger("go".to_string(), |w: &World| w.ready);
/// assert!(definition.is_triggered(&"go".to_string(), &world));
/// ```
pub struct Definition<S: Id, T: Id, A: Id, W> {
    tables: Tables<S, T, A>,
    triggers: HashMap<T, Slot<Trigger<W>>>,
    actions: HashMap<A, Slot<ActionLogic<W>>>,
}

impl<S: Id, T: Id, A: Id, W> Definition<S, T, A, W> {
    /// Pair tables with freshly seeded registries.
    pub fn new(tables: Tables<S, T, A>) -> Self {
        let actions = tables
            .states()
            .iter()
            .flat_map(|record| record.referenced_actions())
            .map(|action| (action.clone(), Slot::Seeded))
            .collect();

        let triggers = tables
            .transitions()
            .iter()
            .map(|record| (record.id.clone(), Slot::Seeded))
            .collect();

        Self {
            tables,
            triggers,
            actions,
        }
    }

    /// Build tables from records and seed the registries.
    pub fn from_records(
        initial: S,
        states: Vec<StateRecord<S, T, A>>,
        transitions: Vec<TransitionRecord<S, T, A>>,
    ) -> Self {
        Self::new(Tables::new(initial, states, transitions))
    }

    pub fn tables(&self) -> &Tables<S, T, A> {
        &self.tables
    }

    /// Merge triggers into the registry. Later registrations win.
    pub fn register_triggers<I>(&mut self, triggers: I)
    where
        I: IntoIterator<Item = (T, Trigger<W>)>,
    {
        for (transition, trigger) in triggers {
            self.triggers.insert(transition, Slot::Registered(trigger));
        }
    }

    pub fn register_trigger<F>(&mut self, transition: T, predicate: F)
    where
        F: Fn(&W) -> bool + 'static,
    {
        self.register_triggers([(transition, Trigger::new(predicate))]);
    }

    /// Merge action logic into the registry. Later registrations win.
    pub fn register_actions<I>(&mut self, actions: I)
    where
        I: IntoIterator<Item = (A, ActionLogic<W>)>,
    {
        for (action, logic) in actions {
            self.actions.insert(action, Slot::Registered(logic));
        }
    }

    pub fn register_action<F>(&mut self, action: A, body: F)
    where
        F: FnMut(&mut W) -> ActionResult + 'static,
    {
        self.register_actions([(action, ActionLogic::new(body))]);
    }

    /// Evaluate the trigger for `transition`. Unregistered transitions never fire.
    pub fn is_triggered(&self, transition: &T, world: &W) -> bool {
        match self.triggers.get(transition) {
            Some(Slot::Registered(trigger)) => trigger.check(world),
            Some(Slot::Seeded) | None => false,
        }
    }

    /// Run the logic registered for `action`.
    ///
    /// Returns `Ok(false)` when nothing is registered, which is the same
    /// as running a no-op.
    pub fn run_action(&mut self, action: &A, world: &mut W) -> Result<bool, ActionError> {
        match self.actions.get_mut(action) {
            Some(Slot::Registered(logic)) => logic.run(world).map(|()| true),
            Some(Slot::Seeded) | None => Ok(false),
        }
    }

    pub fn is_trigger_registered(&self, transition: &T) -> bool {
        matches!(self.triggers.get(transition), Some(Slot::Registered(_)))
    }

    pub fn is_action_registered(&self, action: &A) -> bool {
        matches!(self.actions.get(action), Some(Slot::Registered(_)))
    }

    /// Whether the registry holds any slot, seeded or registered, for `action`.
    pub fn knows_action(&self, action: &A) -> bool {
        self.actions.contains_key(action)
    }

    /// Whether the registry holds any slot, seeded or registered, for `transition`.
    pub fn knows_trigger(&self, transition: &T) -> bool {
        self.triggers.contains_key(transition)
    }
}

impl<S: Id, T: Id, A: Id, W> From<Tables<S, T, A>> for Definition<S, T, A, W> {
    fn from(tables: Tables<S, T, A>) -> Self {
        Self::new(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct World {
        armed: bool,
        log: Vec<&'static str>,
    }

    type Def = Definition<String, String, String, World>;

    fn s(value: &str) -> String {
        value.to_string()
    }

    fn definition() -> Def {
        Definition::from_records(
            s("idle"),
            vec![
                StateRecord::new(s("idle"))
                    .in_state(s("poll"))
                    .exit(s("leave_idle"))
                    .transition(s("fire")),
                StateRecord::new(s("firing")).entry(s("enter_firing")),
            ],
            vec![TransitionRecord::new(s("fire"), s("firing")).action(s("shoot"))],
        )
    }

    #[test]
    fn construction_seeds_state_actions_and_transitions() {
        let def = definition();

        assert!(def.knows_action(&s("poll")));
        assert!(def.knows_action(&s("leave_idle")));
        assert!(def.knows_action(&s("enter_firing")));
        assert!(!def.knows_action(&s("shoot")));
        assert!(def.knows_trigger(&s("fire")));

        assert!(!def.is_action_registered(&s("poll")));
        assert!(!def.is_trigger_registered(&s("fire")));
    }

    #[test]
    fn seeded_and_unknown_triggers_never_fire() {
        let def = definition();
        let world = World {
            armed: true,
            ..World::default()
        };

        assert!(!def.is_triggered(&s("fire"), &world));
        assert!(!def.is_triggered(&s("unknown"), &world));
    }

    #[test]
    fn seeded_and_unknown_actions_are_noops() {
        let mut def = definition();
        let mut world = World::default();

        assert_eq!(def.run_action(&s("poll"), &mut world), Ok(false));
        assert_eq!(def.run_action(&s("unknown"), &mut world), Ok(false));
        assert!(world.log.is_empty());
    }

    #[test]
    fn registered_trigger_reads_world() {
        let mut def = definition();
        def.register_trigger(s("fire"), |w: &World| w.armed);

        assert!(!def.is_triggered(&s("fire"), &World::default()));
        assert!(def.is_triggered(
            &s("fire"),
            &World {
                armed: true,
                ..World::default()
            }
        ));
    }

    #[test]
    fn later_action_registration_wins() {
        let mut def = definition();
        def.register_action(s("shoot"), |w: &mut World| {
            w.log.push("first");
            Ok(())
        });
        def.register_action(s("shoot"), |w: &mut World| {
            w.log.push("second");
            Ok(())
        });

        let mut world = World::default();
        assert_eq!(def.run_action(&s("shoot"), &mut world), Ok(true));
        assert_eq!(world.log, vec!["second"]);
    }

    #[test]
    fn bulk_registration_accepts_maps() {
        let mut def = definition();
        let mut triggers: TriggerMap<String, World> = HashMap::new();
        triggers.insert(s("fire"), Trigger::always());
        let mut actions: ActionMap<String, World> = HashMap::new();
        actions.insert(
            s("poll"),
            ActionLogic::infallible(|w: &mut World| w.log.push("poll")),
        );

        def.register_triggers(triggers);
        def.register_actions(actions);

        let mut world = World::default();
        assert!(def.is_triggered(&s("fire"), &world));
        assert_eq!(def.run_action(&s("poll"), &mut world), Ok(true));
        assert_eq!(world.log, vec!["poll"]);
    }

    #[test]
    fn action_errors_are_returned() {
        let mut def = definition();
        def.register_action(s("shoot"), |_: &mut World| {
            Err(ActionError::Failed("jammed".into()))
        });

        let mut world = World::default();
        assert_eq!(
            def.run_action(&s("shoot"), &mut world),
            Err(ActionError::Failed("jammed".into()))
        );
    }
}
