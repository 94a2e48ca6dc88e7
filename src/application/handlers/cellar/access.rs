//! Lookups shared by the cellar handlers: the acting user, tier gates and
//! ownership checks through a record's wine.

use crate::domain::account::User;
use crate::domain::cellar::{CellarError, Review, TastingNote, Wine};
use crate::domain::foundation::{ReviewId, TastingNoteId, UserId, WineId};
use crate::ports::{ReviewRepository, TastingNoteRepository, UserRepository, WineRepository};

pub(super) async fn load_user(
    users: &dyn UserRepository,
    user_id: &UserId,
) -> Result<User, CellarError> {
    users
        .find_by_id(user_id)
        .await?
        .ok_or(CellarError::NotFound("User"))
}

/// Reviews, tasting notes and search share one switch.
pub(super) fn require_pro(user: &User) -> Result<(), CellarError> {
    if user.is_pro() {
        Ok(())
    } else {
        tracing::debug!(user_id = %user.id, "Pro feature refused on free tier");
        Err(CellarError::ProRequired)
    }
}

/// Another user's wine is reported as missing.
pub(super) async fn owned_wine(
    wines: &dyn WineRepository,
    wine_id: &WineId,
    user_id: &UserId,
) -> Result<Wine, CellarError> {
    wines
        .find_owned(wine_id, user_id)
        .await?
        .ok_or_else(CellarError::wine_not_found)
}

/// A review on someone else's wine is forbidden rather than missing.
pub(super) async fn owned_review(
    reviews: &dyn ReviewRepository,
    wines: &dyn WineRepository,
    review_id: &ReviewId,
    user_id: &UserId,
) -> Result<Review, CellarError> {
    let review = reviews
        .find_by_id(review_id)
        .await?
        .ok_or_else(CellarError::review_not_found)?;
    ensure_wine_owned(wines, &review.wine_id, user_id).await?;
    Ok(review)
}

pub(super) async fn owned_tasting_note(
    notes: &dyn TastingNoteRepository,
    wines: &dyn WineRepository,
    note_id: &TastingNoteId,
    user_id: &UserId,
) -> Result<TastingNote, CellarError> {
    let note = notes
        .find_by_id(note_id)
        .await?
        .ok_or_else(CellarError::tasting_note_not_found)?;
    ensure_wine_owned(wines, &note.wine_id, user_id).await?;
    Ok(note)
}

async fn ensure_wine_owned(
    wines: &dyn WineRepository,
    wine_id: &WineId,
    user_id: &UserId,
) -> Result<(), CellarError> {
    match wines.find_owned(wine_id, user_id).await? {
        Some(_) => Ok(()),
        None => {
            tracing::warn!(user_id = %user_id, wine_id = %wine_id, "Access to another user's wine refused");
            Err(CellarError::Forbidden)
        }
    }
}
