//! PostgreSQL adapters.
//!
//! Repository and reader implementations backed by a shared `PgPool`.

mod review_repository;
mod seed;
mod user_repository;
mod wine_reader;
mod wine_repository;

pub use review_repository::{PostgresReviewRepository, PostgresTastingNoteRepository};
pub use seed::{seed_demo_cellar, DEMO_EMAIL, DEMO_PASSWORD};
pub use user_repository::PostgresUserRepository;
pub use wine_reader::PostgresWineReader;
pub use wine_repository::PostgresWineRepository;

/// Embedded migrations from `migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
