//! Decision produced by a single machine update.

/// Result of evaluating the current state once.
///
/// A step never changes the machine by itself; the driver executes its
/// actions and then applies the target state.
#[derive(Clone, Debug, PartialEq)]
pub enum Step<S, T, A> {
    /// No transition fired; run the state's in-state actions
    Stay { actions: Vec<A> },

    /// `fired` was the first triggered transition in declaration order.
    /// `actions` is exit, transition action, entry, with absent slots dropped.
    Transition { fired: T, actions: Vec<A>, target: S },
}

impl<S, T, A> Step<S, T, A> {
    /// Actions to run, in order.
    pub fn actions(&self) -> &[A] {
        match self {
            Step::Stay { actions } | Step::Transition { actions, .. } => actions,
        }
    }

    pub fn fired(&self) -> Option<&T> {
        match self {
            Step::Stay { .. } => None,
            Step::Transition { fired, .. } => Some(fired),
        }
    }

    pub fn target(&self) -> Option<&S> {
        match self {
            Step::Stay { .. } => None,
            Step::Transition { target, .. } => Some(target),
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, Step::Transition { .. })
    }
}
