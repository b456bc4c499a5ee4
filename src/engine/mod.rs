//! Machine core and driver loop.
//!
//! This module is the runtime half of the engine:
//!
//! - **Machine**: holds the current state and a borrowed world value
//! - **update**: pure decision for one cycle (first triggered transition wins)
//! - **step**: executes one decision and applies the state change
//! - **update_until**: repeats `step` until a stop predicate holds or a
//!   wall-clock budget is spent, so automatic states cascade within one tick
//!
//! The engine is single-threaded and synchronous. Exactly one driver may
//! own a world at a time; the borrow checker enforces this.

mod clock;
mod error;
mod machine;
mod step;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::MachineError;
pub use machine::Machine;
pub use step::Step;
