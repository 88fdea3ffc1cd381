//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: foodgame_core::config::ConfigError,
    },

    /// The game loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: foodgame_core::runner::RunnerError,
    },

    /// Connecting to or writing the observation store failed.
    #[error("database error: {source}")]
    Db {
        /// The underlying database error.
        #[from]
        source: foodgame_db::DbError,
    },
}
