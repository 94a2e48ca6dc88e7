//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each handler takes its ports as `Arc<dyn Port>` and exposes a single
//! `handle` method.

pub mod handlers;

pub use handlers::account::{
    DeleteAccountCommand, DeleteAccountHandler, ExportCellarHandler, ExportCellarQuery,
    LogInCommand, LogInHandler, SignUpCommand, SignUpHandler, SignUpNext,
    UpdateSettingsCommand, UpdateSettingsHandler, UpdateSettingsResult,
};
pub use handlers::cellar::{
    AddReviewCommand, AddReviewHandler, AddTastingNoteCommand, AddTastingNoteHandler,
    AddWineCommand, AddWineHandler, DeleteReviewCommand, DeleteReviewHandler,
    DeleteTastingNoteCommand, DeleteTastingNoteHandler, DeleteWineCommand, DeleteWineHandler,
    EditReviewCommand, EditReviewHandler, EditWineCommand, EditWineHandler,
    GetWineDetailsHandler, GetWineDetailsQuery, ListWinesHandler, ListWinesQuery,
    UpdateQuantityCommand, UpdateQuantityHandler, WineAllowanceHandler, WineAllowanceQuery,
};
pub use handlers::subscription::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
    OpenBillingPortalCommand, OpenBillingPortalHandler, StartCheckoutCommand,
    StartCheckoutHandler,
};
