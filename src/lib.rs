//! Flowtable: a declarative, table-driven state machine engine
//!
//! Flowtable drives multi-step interaction flows ("pick a target, confirm,
//! resolve") from static tables instead of hand-written control flow.
//! The tables are pure data; behaviour is attached by registering trigger
//! predicates and action logic over a caller-owned world value.
//!
//! # Core Concepts
//!
//! - **Tables**: states (in-state, entry and exit actions plus ordered
//!   outgoing transitions) and transitions (target plus optional action)
//! - **Registries**: triggers decide when a transition fires, action logic
//!   mutates the world; unregistered ids never fire / do nothing
//! - **Machine**: `update` decides, `step` executes one decision, and
//!   `update_until` cascades through automatic states within a time budget
//! - **Audit**: optional check that reports every unregistered or
//!   undeclared identifier at once
//!
//! # Example
//!
//! ```rust
//! use flowtable::builder::{MachineBuilder, TablesBuilder};
//! use flowtable::core::StateRecord;
//! use flowtable::id_enum;
//!
//! id_enum! {
//!     enum Phase { A, B, C }
//! }
//! id_enum! {
//!     enum Edge { T1, T2 }
//! }
//! id_enum! {
//!     enum Act { EnterB, ExitB, EnterC }
//! }
//!
//! #[derive(Default)]
//! struct World {
//!     flag1: bool,
//!     flag2: bool,
//!     log: Vec<Act>,
//! }
//!
//! let tables = TablesBuilder::new()
//!     .initial(Phase::A)
//!     .state(StateRecord::new(Phase::A))
//!     .state(StateRecord::new(Phase::B).entry(Act::EnterB).exit(Act::ExitB))
//!     .state(StateRecord::new(Phase::C).entry(Act::EnterC))
//!     .connect(Phase::A, Edge::T1, Phase::B)
//!     .connect(Phase::B, Edge::T2, Phase::C)
//!     .build()
//!     .unwrap();
//!
//! let mut world = World { flag1: true, flag2: true, ..World::default() };
//! let mut machine = MachineBuilder::new()
//!     .tables(tables)
//!     .trigger(Edge::T1, |w: &World| w.flag1)
//!     .trigger(Edge::T2, |w: &World| w.flag2)
//!     .action(Act::EnterB, |w: &mut World| { w.log.push(Act::EnterB); Ok(()) })
//!     .action(Act::ExitB, |w: &mut World| { w.log.push(Act::ExitB); Ok(()) })
//!     .action(Act::EnterC, |w: &mut World| { w.log.push(Act::EnterC); Ok(()) })
//!     .build(&mut world)
//!     .unwrap();
//!
//! machine.update_until(|m| m.current_state() == &Phase::C).unwrap();
//!
//! assert_eq!(machine.current_state(), &Phase::C);
//! assert_eq!(machine.world().log, vec![Act::EnterB, Act::ExitB, Act::EnterC]);
//! ```

pub mod audit;
pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod registry;

// Re-export commonly used types
pub use audit::Gap;
pub use builder::{MachineBuilder, TablesBuilder};
pub use config::MachineConfig;
pub use core::{Id, StateRecord, Tables, TransitionRecord};
pub use engine::{Machine, MachineError, Step};
pub use registry::{ActionError, ActionLogic, Definition, Trigger};
