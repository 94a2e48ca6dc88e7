//! AddTastingNoteHandler - Command handler for recording a tasting note.

use std::sync::Arc;

use crate::domain::cellar::{CellarError, TastingNote};
use crate::domain::foundation::{Timestamp, UserId, WineId};
use crate::ports::{TastingNoteRepository, UserRepository, WineRepository};

use super::access;

#[derive(Debug, Clone)]
pub struct AddTastingNoteCommand {
    pub user_id: UserId,
    pub wine_id: WineId,
    pub note: String,
}

#[derive(Debug, Clone)]
pub struct AddTastingNoteResult {
    pub note: TastingNote,
}

/// Pro only. Notes are dated today.
pub struct AddTastingNoteHandler {
    users: Arc<dyn UserRepository>,
    wines: Arc<dyn WineRepository>,
    notes: Arc<dyn TastingNoteRepository>,
}

impl AddTastingNoteHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        wines: Arc<dyn WineRepository>,
        notes: Arc<dyn TastingNoteRepository>,
    ) -> Self {
        Self { users, wines, notes }
    }

    pub async fn handle(
        &self,
        cmd: AddTastingNoteCommand,
    ) -> Result<AddTastingNoteResult, CellarError> {
        let user = access::load_user(self.users.as_ref(), &cmd.user_id).await?;
        access::require_pro(&user)?;

        let wine = access::owned_wine(self.wines.as_ref(), &cmd.wine_id, &user.id).await?;
        let note = TastingNote::create(wine.id, &cmd.note, Timestamp::now())?;
        self.notes.create(&note).await?;

        tracing::info!(user_id = %user.id, wine_id = %wine.id, "Tasting note added");
        Ok(AddTastingNoteResult { note })
    }
}
