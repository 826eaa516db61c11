//! Dataset ingestion
//!
//! One-time CSV load of the Lichess game records into a [`Table`](crate::Table).

pub mod loader;

pub use loader::load_csv;
