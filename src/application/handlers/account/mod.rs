//! Account handlers.
//!
//! ## Commands
//! - Signing up and logging in
//! - Updating settings (currency, development tier override)
//! - Deleting the account with everything it owns
//!
//! ## Queries
//! - Exporting the cellar as CSV

mod delete_account;
mod export_cellar;
mod log_in;
mod password;
mod sign_up;
mod update_settings;

// Commands
pub use delete_account::{DeleteAccountCommand, DeleteAccountHandler, DeleteAccountResult};
pub use log_in::{LogInCommand, LogInHandler, LogInResult};
pub use sign_up::{SignUpCommand, SignUpHandler, SignUpNext, SignUpResult};
pub use update_settings::{UpdateSettingsCommand, UpdateSettingsHandler, UpdateSettingsResult};

// Queries
pub use export_cellar::{
    ExportCellarHandler, ExportCellarQuery, ExportCellarResult, EXPORT_FILE_NAME,
};
