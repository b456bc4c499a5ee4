//! Identifier trait for states, transitions and actions.
//!
//! Every key the engine stores (state ids, transition ids, action ids)
//! implements this trait. The engine only ever compares, hashes and
//! clones identifiers; `name` exists for logging and diagnostics.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for table identifiers.
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied into steps and history entries
/// - `Eq` + `Hash`: identifiers key the tables and registries
/// - `Debug`: identifiers appear in audit gaps
///
/// # Example
///
/// ```rust
/// use flowtable::core::Id;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Phase {
///     Pick,
///     Confirm,
/// }
///
/// impl Id for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pick => "Pick",
///             Self::Confirm => "Confirm",
///         }
///     }
/// }
///
/// assert_eq!(Phase::Confirm.name(), "Confirm");
/// ```
pub trait Id: Clone + Eq + Hash + Debug + 'static {
    /// Get the identifier's name for display/logging.
    fn name(&self) -> &str;
}

impl Id for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
