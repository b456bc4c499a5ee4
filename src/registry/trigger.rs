//! Trigger predicates for deciding when a transition fires.
//!
//! Triggers are boolean functions over the world value. They must not
//! mutate anything; the engine may evaluate them any number of times.

/// Predicate that decides whether a transition fires this cycle.
///
/// # Example
///
/// ```rust
/// use flowtable::registry::Trigger;
///
/// struct World {
///     confirmed: bool,
/// }
///
/// let confirmed = Trigger::new(|w: &World| w.confirmed);
///
/// assert!(confirmed.check(&World { confirmed: true }));
/// assert!(!confirmed.check(&World { confirmed: false }));
/// ```
pub struct Trigger<W> {
    predicate: Box<dyn Fn(&W) -> bool>,
}

impl<W> Trigger<W> {
    /// Create a trigger from a predicate over the world.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&W) -> bool + 'static,
    {
        Trigger {
            predicate: Box::new(predicate),
        }
    }

    /// A trigger that always fires. Useful for automatic pass-through states.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// A trigger that never fires.
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    pub fn check(&self, world: &W) -> bool {
        (self.predicate)(world)
    }
}

impl<W> std::fmt::Debug for Trigger<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Trigger")
    }
}
