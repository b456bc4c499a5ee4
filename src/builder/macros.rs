//! Macros for ergonomic identifier declaration.

/// Declare a fieldless enum usable as a state, transition or action id.
///
/// The enum derives `Clone`, `Copy`, `Eq`, `Hash`, `Debug` and serde
/// traits, and implements [`crate::core::Id`] using the variant names.
///
/// # Example
///
/// ```
/// use flowtable::core::Id;
/// use flowtable::id_enum;
///
/// id_enum! {
///     pub enum AttackPhase {
///         CountTargets,
///         AwaitTarget,
///         AwaitConfirm,
///         Resolve,
///     }
/// }
///
/// assert_eq!(AttackPhase::AwaitConfirm.name(), "AwaitConfirm");
/// ```
#[macro_export]
macro_rules! id_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Id for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
