//! Action logic run against the world value.

use thiserror::Error;

/// Errors raised by action logic.
///
/// The engine never recovers from these; they propagate out of the
/// driver loop wrapped in [`crate::engine::MachineError`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Action failed: {0}")]
    Failed(String),

    #[error("Required world field '{0}' is not set")]
    MissingField(&'static str),
}

pub type ActionResult = Result<(), ActionError>;

/// Side-effecting function executed against the world.
///
/// # Example
///
/// ```rust
/// use flowtable::registry::ActionLogic;
///
/// struct World {
///     events: Vec<&'static str>,
/// }
///
/// let mut drain = ActionLogic::infallible(|w: &mut World| w.events.clear());
///
/// let mut world = World { events: vec!["click"] };
/// drain.run(&mut world).unwrap();
/// assert!(world.events.is_empty());
/// ```
pub struct ActionLogic<W> {
    body: Box<dyn FnMut(&mut W) -> ActionResult>,
}

impl<W> ActionLogic<W> {
    /// Create action logic that may fail.
    pub fn new<F>(body: F) -> Self
    where
        F: FnMut(&mut W) -> ActionResult + 'static,
    {
        ActionLogic {
            body: Box::new(body),
        }
    }

    /// Create action logic that cannot fail.
    pub fn infallible<F>(mut body: F) -> Self
    where
        F: FnMut(&mut W) + 'static,
    {
        Self::new(move |world| {
            body(world);
            Ok(())
        })
    }

    pub fn noop() -> Self {
        Self::new(|_| Ok(()))
    }

    pub fn run(&mut self, world: &mut W) -> ActionResult {
        (self.body)(world)
    }
}

impl<W> std::fmt::Debug for ActionLogic<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ActionLogic")
    }
}
