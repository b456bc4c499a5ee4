//! Build errors for table and machine builders.

use thiserror::Error;

/// Errors that can occur when building tables and machines.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No tables supplied. Call .tables(tables) before .build()")]
    MissingTables,
}
