//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `UserRepository` - Accounts and subscription fields
//! - `WineRepository` / `WineReader` - Wine writes and list/detail/export reads
//! - `ReviewRepository`, `TastingNoteRepository` - Child records of a wine
//!
//! ## External Services
//!
//! - `PaymentProvider` - Checkout, billing portal and webhook verification
//! - `ImageStorage` - Label photo storage
//!
//! ## Authentication
//!
//! - `PasswordHasher` - Password hashing and verification
//! - `SessionManager` - Signed session tokens

mod image_storage;
mod password_hasher;
mod payment_provider;
mod review_repository;
mod session_manager;
mod tasting_note_repository;
mod user_repository;
mod wine_reader;
mod wine_repository;

pub use image_storage::{ImageStorage, ImageUpload};
pub use password_hasher::{PasswordCheck, PasswordHasher};
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    PortalSession, WebhookEvent, WebhookEventData, WebhookEventType,
};
pub use review_repository::ReviewRepository;
pub use session_manager::SessionManager;
pub use tasting_note_repository::TastingNoteRepository;
pub use user_repository::{SubscriberLookup, UserRepository};
pub use wine_reader::{ExportRow, WineReader};
pub use wine_repository::WineRepository;
