//! AddReviewHandler - Command handler for attaching a review to a wine.

use std::sync::Arc;

use crate::domain::cellar::{CellarError, Review, ReviewDraft, ReviewForm};
use crate::domain::foundation::{Timestamp, UserId, WineId};
use crate::ports::{ReviewRepository, UserRepository, WineRepository};

use super::access;

#[derive(Debug, Clone)]
pub struct AddReviewCommand {
    pub user_id: UserId,
    pub wine_id: WineId,
    pub form: ReviewForm,
}

#[derive(Debug, Clone)]
pub struct AddReviewResult {
    pub review: Review,
}

/// Pro only.
pub struct AddReviewHandler {
    users: Arc<dyn UserRepository>,
    wines: Arc<dyn WineRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl AddReviewHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        wines: Arc<dyn WineRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            users,
            wines,
            reviews,
        }
    }

    pub async fn handle(&self, cmd: AddReviewCommand) -> Result<AddReviewResult, CellarError> {
        let user = access::load_user(self.users.as_ref(), &cmd.user_id).await?;
        access::require_pro(&user)?;

        let draft = ReviewDraft::from_form(cmd.form, &Timestamp::now().date_string())?;
        let wine = access::owned_wine(self.wines.as_ref(), &cmd.wine_id, &user.id).await?;

        let review = Review::create(wine.id, draft);
        self.reviews.create(&review).await?;

        tracing::info!(user_id = %user.id, wine_id = %wine.id, review_id = %review.id, "Review added");
        Ok(AddReviewResult { review })
    }
}
