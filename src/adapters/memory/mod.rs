//! In-memory adapters.
//!
//! Same semantics as the Postgres adapters without a database. Intended for
//! tests.

mod cellar_store;

pub use cellar_store::InMemoryCellar;
