//! Shared application state for the HTTP adapter.

use std::sync::Arc;

use crate::application::handlers::account::{
    DeleteAccountHandler, ExportCellarHandler, LogInHandler, SignUpHandler, UpdateSettingsHandler,
};
use crate::application::handlers::cellar::{
    AddReviewHandler, AddTastingNoteHandler, AddWineHandler, DeleteReviewHandler,
    DeleteTastingNoteHandler, DeleteWineHandler, EditReviewHandler, EditWineHandler,
    GetWineDetailsHandler, ListWinesHandler, UpdateQuantityHandler, WineAllowanceHandler,
};
use crate::application::handlers::subscription::{
    HandlePaymentWebhookHandler, OpenBillingPortalHandler, StartCheckoutHandler,
};
use crate::ports::{
    ImageStorage, PasswordHasher, PaymentProvider, ReviewRepository, SessionManager,
    TastingNoteRepository, UserRepository, WineReader, WineRepository,
};

use crate::adapters::auth::CsrfTokens;

use super::error::AppError;
use super::views::Views;

/// Settings the HTTP layer needs beyond its ports.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Absolute base URL used for Stripe redirects, e.g. `https://cellar.example.com`.
    pub base_url: String,

    /// Adds `Secure` to the session and CSRF cookies.
    pub secure_cookies: bool,

    /// Lets the settings page override the subscription tier.
    pub allow_debug_tier: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            secure_cookies: false,
            allow_debug_tier: false,
        }
    }
}

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub wines: Arc<dyn WineRepository>,
    pub wine_reader: Arc<dyn WineReader>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub tasting_notes: Arc<dyn TastingNoteRepository>,
    pub images: Arc<dyn ImageStorage>,
    /// `None` when Stripe isn't configured.
    pub payment_provider: Option<Arc<dyn PaymentProvider>>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub sessions: Arc<dyn SessionManager>,
    pub csrf: Arc<CsrfTokens>,
    pub views: Arc<Views>,
    pub settings: HttpSettings,
}

impl AppState {
    // ════════════════════════════════════════════════════════════════════════════
    // Account
    // ════════════════════════════════════════════════════════════════════════════

    pub fn sign_up_handler(&self) -> SignUpHandler {
        SignUpHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn log_in_handler(&self) -> LogInHandler {
        LogInHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn update_settings_handler(&self) -> UpdateSettingsHandler {
        UpdateSettingsHandler::new(self.users.clone())
    }

    pub fn delete_account_handler(&self) -> DeleteAccountHandler {
        DeleteAccountHandler::new(self.users.clone())
    }

    pub fn export_cellar_handler(&self) -> ExportCellarHandler {
        ExportCellarHandler::new(self.wine_reader.clone())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Cellar
    // ════════════════════════════════════════════════════════════════════════════

    pub fn list_wines_handler(&self) -> ListWinesHandler {
        ListWinesHandler::new(self.users.clone(), self.wine_reader.clone())
    }

    pub fn wine_allowance_handler(&self) -> WineAllowanceHandler {
        WineAllowanceHandler::new(self.users.clone(), self.wines.clone())
    }

    pub fn add_wine_handler(&self) -> AddWineHandler {
        AddWineHandler::new(self.users.clone(), self.wines.clone(), self.images.clone())
    }

    pub fn edit_wine_handler(&self) -> EditWineHandler {
        EditWineHandler::new(self.wines.clone(), self.images.clone())
    }

    pub fn update_quantity_handler(&self) -> UpdateQuantityHandler {
        UpdateQuantityHandler::new(self.wines.clone())
    }

    pub fn delete_wine_handler(&self) -> DeleteWineHandler {
        DeleteWineHandler::new(self.wines.clone(), self.images.clone())
    }

    pub fn wine_details_handler(&self) -> GetWineDetailsHandler {
        GetWineDetailsHandler::new(self.users.clone(), self.wine_reader.clone())
    }

    pub fn add_review_handler(&self) -> AddReviewHandler {
        AddReviewHandler::new(self.users.clone(), self.wines.clone(), self.reviews.clone())
    }

    pub fn edit_review_handler(&self) -> EditReviewHandler {
        EditReviewHandler::new(self.wines.clone(), self.reviews.clone())
    }

    pub fn delete_review_handler(&self) -> DeleteReviewHandler {
        DeleteReviewHandler::new(self.wines.clone(), self.reviews.clone())
    }

    pub fn add_tasting_note_handler(&self) -> AddTastingNoteHandler {
        AddTastingNoteHandler::new(
            self.users.clone(),
            self.wines.clone(),
            self.tasting_notes.clone(),
        )
    }

    pub fn delete_tasting_note_handler(&self) -> DeleteTastingNoteHandler {
        DeleteTastingNoteHandler::new(
            self.users.clone(),
            self.wines.clone(),
            self.tasting_notes.clone(),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Subscription
    // ════════════════════════════════════════════════════════════════════════════

    fn payment_provider(&self) -> Result<Arc<dyn PaymentProvider>, AppError> {
        self.payment_provider
            .clone()
            .ok_or(AppError::PaymentsDisabled)
    }

    pub fn start_checkout_handler(&self) -> Result<StartCheckoutHandler, AppError> {
        Ok(StartCheckoutHandler::new(
            self.users.clone(),
            self.payment_provider()?,
            self.settings.base_url.clone(),
        ))
    }

    pub fn billing_portal_handler(&self) -> Result<OpenBillingPortalHandler, AppError> {
        Ok(OpenBillingPortalHandler::new(
            self.users.clone(),
            self.payment_provider()?,
            self.settings.base_url.clone(),
        ))
    }

    pub fn webhook_handler(&self) -> Result<HandlePaymentWebhookHandler, AppError> {
        Ok(HandlePaymentWebhookHandler::new(
            self.users.clone(),
            self.payment_provider()?,
        ))
    }
}
