//! Wine Cellar server binary.
//!
//! Loads configuration from the environment, connects to PostgreSQL, wires
//! the adapters into `AppState` and serves the router.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use wine_cellar::adapters::auth::{BcryptPasswordHasher, CsrfTokens, SignedCookieSessions};
use wine_cellar::adapters::http::{app_router, with_http_layers, AppState, HttpSettings, Views};
use wine_cellar::adapters::postgres::{
    seed_demo_cellar, PostgresReviewRepository, PostgresTastingNoteRepository,
    PostgresUserRepository, PostgresWineReader, PostgresWineRepository, DEMO_EMAIL, MIGRATOR,
};
use wine_cellar::adapters::storage;
use wine_cellar::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use wine_cellar::config::{AppConfig, ConfigError, ValidationError};
use wine_cellar::domain::foundation::DomainError;
use wine_cellar::ports::PaymentProvider;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Seeding failed: {0}")]
    Seed(#[from] DomainError),

    #[error("Invalid page template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.server.log_level)));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let views = Arc::new(Views::new()?);

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    tracing::info!("Connected to database");

    if config.database.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("Migrations applied");
    }

    let users = Arc::new(PostgresUserRepository::new(pool.clone()));
    let wines = Arc::new(PostgresWineRepository::new(pool.clone()));
    let reviews = Arc::new(PostgresReviewRepository::new(pool.clone()));
    let hasher = Arc::new(BcryptPasswordHasher::new(config.session.bcrypt_cost));

    if config.database.seed && !config.is_production() {
        if seed_demo_cellar(users.as_ref(), wines.as_ref(), reviews.as_ref(), hasher.as_ref())
            .await?
        {
            tracing::info!(email = DEMO_EMAIL, "Seeded demo cellar");
        }
    }

    let payment_provider: Option<Arc<dyn PaymentProvider>> =
        match StripeConfig::from_payment_config(&config.payment) {
            Some(stripe) => Some(Arc::new(StripePaymentAdapter::new(stripe))),
            None => {
                tracing::warn!("Stripe is not configured, upgrades are disabled");
                None
            }
        };

    let state = AppState {
        users,
        wines,
        wine_reader: Arc::new(PostgresWineReader::new(pool.clone())),
        reviews,
        tasting_notes: Arc::new(PostgresTastingNoteRepository::new(pool)),
        images: storage::from_config(&config.storage),
        payment_provider,
        hasher,
        sessions: Arc::new(SignedCookieSessions::new(
            config.session.signing_secret(),
            config.session.max_age_secs,
        )),
        csrf: Arc::new(CsrfTokens::new(config.session.signing_secret())),
        views,
        settings: HttpSettings {
            base_url: config.payment.base_url(),
            secure_cookies: config.is_production(),
            allow_debug_tier: config.server.is_development(),
        },
    };

    let app = with_http_layers(
        app_router(state),
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
