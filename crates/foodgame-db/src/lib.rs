//! Observation persistence for the food game.
//!
//! After each resolved turn the engine may hand every player's observation
//! to an [`ObservationStore`]. Two stores are provided:
//!
//! ```text
//! Game::observe -> Observation::to_record
//!     |
//!     +-- MemoryObservationStore   (in-process, tests and dry runs)
//!     |
//!     +-- PostgresObservationStore (observations table, JSONB record)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- The [`ObservationStore`] trait, game-id rules, and the
//!   in-memory store
//! - [`postgres`] -- `PostgreSQL` pool, migrations, and the SQL store
//! - [`error`] -- Shared error types

pub mod error;
pub mod postgres;
pub mod store;

pub use error::DbError;
pub use postgres::{ObservationRow, PostgresConfig, PostgresObservationStore, PostgresPool};
pub use store::{MemoryObservationStore, ObservationStore, StoreOutcome, StoredObservation};
