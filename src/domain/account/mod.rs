//! Account domain - users, credentials and per-user settings.

mod errors;
mod user;
mod values;

pub use errors::AccountError;
pub use user::User;
pub use values::{Credentials, Currency, Email, SignupPlan, MIN_PASSWORD_LEN};
