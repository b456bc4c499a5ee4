//! Target Selection Flow
//!
//! This demo drives a tactical "pick a target, confirm, resolve" flow.
//!
//! Key concepts:
//! - Tables describe the flow; trigger and action maps attach behaviour
//! - Automatic states cascade inside one `update_until` call
//! - Input events are queued on the world between frames and drained by
//!   the action logic of the awaiting states
//! - The audit reports missing registrations before the flow runs
//!
//! Run with: RUST_LOG=debug cargo run --example target_selection

use flowtable::builder::{MachineBuilder, TablesBuilder};
use flowtable::core::{StateRecord, Tables};
use flowtable::engine::Machine;
use flowtable::id_enum;
use flowtable::registry::{ActionError, ActionLogic, ActionMap, Definition, Trigger, TriggerMap};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

id_enum! {
    enum Phase {
        Start,
        CountTargets,
        AwaitTarget,
        AwaitConfirm,
        Resolve,
        Done,
        Cancelled,
    }
}

id_enum! {
    enum Edge {
        Begin,
        NoTargets,
        SingleTarget,
        ManyTargets,
        TargetPicked,
        PickCancelled,
        Confirmed,
        Rejected,
        Finished,
    }
}

id_enum! {
    enum Act {
        CountTargets,
        AutoSelect,
        ShowTargetButtons,
        ReadTargetInput,
        HideTargetButtons,
        ShowConfirm,
        ReadConfirmInput,
        HideConfirm,
        ResolveAttack,
        MarkDone,
        MarkCancelled,
    }
}

#[derive(Debug, Clone, Copy)]
enum InputEvent {
    Click(usize),
    Accept,
    Decline,
    Escape,
}

#[derive(Debug)]
struct Unit {
    name: &'static str,
    in_range: bool,
    hit_points: i32,
}

#[derive(Debug, Default)]
struct World {
    units: Vec<Unit>,
    events: Vec<InputEvent>,
    valid_targets: Vec<usize>,
    selected: Option<usize>,
    confirmed: Option<bool>,
    cancelled: bool,
    active_widget: Option<&'static str>,
    outbox: Vec<String>,
    finished: bool,
}

fn tables() -> Tables<Phase, Edge, Act> {
    TablesBuilder::new()
        .initial(Phase::Start)
        .state(StateRecord::new(Phase::CountTargets).entry(Act::CountTargets))
        .state(
            StateRecord::new(Phase::AwaitTarget)
                .entry(Act::ShowTargetButtons)
                .in_state(Act::ReadTargetInput)
                .exit(Act::HideTargetButtons),
        )
        .state(
            StateRecord::new(Phase::AwaitConfirm)
                .entry(Act::ShowConfirm)
                .in_state(Act::ReadConfirmInput)
                .exit(Act::HideConfirm),
        )
        .state(StateRecord::new(Phase::Resolve).entry(Act::ResolveAttack))
        .state(StateRecord::new(Phase::Done).entry(Act::MarkDone))
        .state(StateRecord::new(Phase::Cancelled).entry(Act::MarkCancelled))
        .connect(Phase::Start, Edge::Begin, Phase::CountTargets)
        .connect(Phase::CountTargets, Edge::NoTargets, Phase::Cancelled)
        .connect_with(
            Phase::CountTargets,
            Edge::SingleTarget,
            Phase::AwaitConfirm,
            Act::AutoSelect,
        )
        .connect(Phase::CountTargets, Edge::ManyTargets, Phase::AwaitTarget)
        .connect(Phase::AwaitTarget, Edge::TargetPicked, Phase::AwaitConfirm)
        .connect(Phase::AwaitTarget, Edge::PickCancelled, Phase::Cancelled)
        .connect(Phase::AwaitConfirm, Edge::Confirmed, Phase::Resolve)
        .connect(Phase::AwaitConfirm, Edge::Rejected, Phase::CountTargets)
        .connect(Phase::Resolve, Edge::Finished, Phase::Done)
        .build()
        .expect("initial state is set")
}

fn triggers() -> TriggerMap<Edge, World> {
    let mut map: TriggerMap<Edge, World> = HashMap::new();
    map.insert(Edge::Begin, Trigger::always());
    map.insert(Edge::NoTargets, Trigger::new(|w: &World| w.valid_targets.is_empty()));
    map.insert(Edge::SingleTarget, Trigger::new(|w: &World| w.valid_targets.len() == 1));
    map.insert(Edge::ManyTargets, Trigger::new(|w: &World| w.valid_targets.len() > 1));
    map.insert(Edge::TargetPicked, Trigger::new(|w: &World| w.selected.is_some()));
    map.insert(Edge::PickCancelled, Trigger::new(|w: &World| w.cancelled));
    map.insert(Edge::Confirmed, Trigger::new(|w: &World| w.confirmed == Some(true)));
    map.insert(Edge::Rejected, Trigger::new(|w: &World| w.confirmed == Some(false)));
    map.insert(Edge::Finished, Trigger::always());
    map
}

fn actions() -> ActionMap<Act, World> {
    let mut map: ActionMap<Act, World> = HashMap::new();
    map.insert(
        Act::CountTargets,
        ActionLogic::infallible(|w: &mut World| {
            w.selected = None;
            w.confirmed = None;
            w.valid_targets = w
                .units
                .iter()
                .enumerate()
                .filter(|(_, u)| u.in_range && u.hit_points > 0)
                .map(|(i, _)| i)
                .collect();
        }),
    );
    map.insert(
        Act::AutoSelect,
        ActionLogic::infallible(|w: &mut World| w.selected = w.valid_targets.first().copied()),
    );
    map.insert(
        Act::ShowTargetButtons,
        ActionLogic::infallible(|w: &mut World| w.active_widget = Some("target buttons")),
    );
    map.insert(
        Act::ReadTargetInput,
        ActionLogic::infallible(|w: &mut World| {
            for event in std::mem::take(&mut w.events) {
                match event {
                    InputEvent::Click(i) if w.valid_targets.contains(&i) => w.selected = Some(i),
                    InputEvent::Escape => w.cancelled = true,
                    _ => {}
                }
            }
        }),
    );
    map.insert(
        Act::HideTargetButtons,
        ActionLogic::infallible(|w: &mut World| w.active_widget = None),
    );
    map.insert(
        Act::ShowConfirm,
        ActionLogic::infallible(|w: &mut World| w.active_widget = Some("confirm dialog")),
    );
    map.insert(
        Act::ReadConfirmInput,
        ActionLogic::infallible(|w: &mut World| {
            for event in std::mem::take(&mut w.events) {
                match event {
                    InputEvent::Accept => w.confirmed = Some(true),
                    InputEvent::Decline => w.confirmed = Some(false),
                    _ => {}
                }
            }
        }),
    );
    map.insert(
        Act::HideConfirm,
        ActionLogic::infallible(|w: &mut World| w.active_widget = None),
    );
    map.insert(
        Act::ResolveAttack,
        ActionLogic::new(|w: &mut World| {
            let index = w.selected.ok_or(ActionError::MissingField("selected"))?;
            let unit = w
                .units
                .get_mut(index)
                .ok_or_else(|| ActionError::Failed(format!("no unit at {index}")))?;
            unit.hit_points -= 4;
            let message = format!("{} takes 4 damage ({} left)", unit.name, unit.hit_points);
            w.outbox.push(message);
            Ok(())
        }),
    );
    map.insert(
        Act::MarkDone,
        ActionLogic::infallible(|w: &mut World| w.finished = true),
    );
    map.insert(
        Act::MarkCancelled,
        ActionLogic::infallible(|w: &mut World| {
            w.outbox.push("attack cancelled".to_string());
            w.finished = true;
        }),
    );
    map
}

/// Stop once the flow is parked, or once nothing would fire and no input
/// is waiting to be consumed.
fn settled(machine: &Machine<'_, Phase, Edge, Act, World>) -> bool {
    let world = machine.world();
    world.finished || (world.events.is_empty() && !machine.update().is_transition())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut audited: Definition<Phase, Edge, Act, World> = Definition::new(tables());
    audited.register_triggers(triggers());
    audited.register_actions(actions());
    let gaps = audited.gaps();
    println!("audit: {} gap(s)", gaps.len());
    for gap in &gaps {
        println!("  {gap}");
    }

    engage(
        "accept",
        vec![
            vec![],
            vec![InputEvent::Click(2)],
            vec![InputEvent::Click(1)],
            vec![InputEvent::Decline],
            vec![InputEvent::Click(0)],
            vec![InputEvent::Accept],
        ],
    );
    engage("escape", vec![vec![], vec![InputEvent::Escape]]);
}

/// Play one engagement; each script entry is the input that arrived since
/// the previous rendered frame.
fn engage(label: &str, script: Vec<Vec<InputEvent>>) {
    let mut world = World {
        units: vec![
            Unit {
                name: "Scout",
                in_range: true,
                hit_points: 6,
            },
            Unit {
                name: "Tank",
                in_range: true,
                hit_points: 12,
            },
            Unit {
                name: "Sniper",
                in_range: false,
                hit_points: 5,
            },
        ],
        ..World::default()
    };

    let mut machine = MachineBuilder::new()
        .tables(tables())
        .triggers(triggers())
        .actions(actions())
        .build(&mut world)
        .expect("tables are supplied");

    for (frame, input) in script.into_iter().enumerate() {
        machine.world_mut().events.extend(input);
        if let Err(err) = machine.update_until(settled) {
            eprintln!("[{label}] frame {frame}: {err}");
            return;
        }
        println!(
            "[{label}] frame {frame}: state={:?} widget={:?}",
            machine.current_state(),
            machine.world().active_widget
        );
        if machine.world().finished {
            break;
        }
    }

    for message in &machine.world().outbox {
        println!("[{label}] message: {message}");
    }
    println!(
        "[{label}] visited AwaitConfirm {} time(s)",
        machine.history().visits(&Phase::AwaitConfirm)
    );
}
