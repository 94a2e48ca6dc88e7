//! DeleteAccountHandler - Command handler for closing an account.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct DeleteAccountCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct DeleteAccountResult {
    pub user_id: UserId,
}

/// Removes the user together with every wine, review and tasting note
/// they own. The repository does this in one transaction.
pub struct DeleteAccountHandler {
    users: Arc<dyn UserRepository>,
}

impl DeleteAccountHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: DeleteAccountCommand,
    ) -> Result<DeleteAccountResult, AccountError> {
        self.users.delete_with_wines(&cmd.user_id).await?;

        tracing::info!(user_id = %cmd.user_id, "Account deleted");
        Ok(DeleteAccountResult {
            user_id: cmd.user_id,
        })
    }
}
