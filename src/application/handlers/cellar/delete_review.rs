//! DeleteReviewHandler - Command handler for removing a review.

use std::sync::Arc;

use crate::domain::cellar::CellarError;
use crate::domain::foundation::{ReviewId, UserId, WineId};
use crate::ports::{ReviewRepository, WineRepository};

use super::access;

#[derive(Debug, Clone)]
pub struct DeleteReviewCommand {
    pub user_id: UserId,
    pub review_id: ReviewId,
}

#[derive(Debug, Clone)]
pub struct DeleteReviewResult {
    /// The wine the review belonged to.
    pub wine_id: WineId,
}

pub struct DeleteReviewHandler {
    wines: Arc<dyn WineRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl DeleteReviewHandler {
    pub fn new(wines: Arc<dyn WineRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { wines, reviews }
    }

    pub async fn handle(&self, cmd: DeleteReviewCommand) -> Result<DeleteReviewResult, CellarError> {
        let review = access::owned_review(
            self.reviews.as_ref(),
            self.wines.as_ref(),
            &cmd.review_id,
            &cmd.user_id,
        )
        .await?;

        self.reviews.delete(&review.id).await?;

        tracing::info!(user_id = %cmd.user_id, review_id = %review.id, "Review deleted");
        Ok(DeleteReviewResult {
            wine_id: review.wine_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::cellar::{Review, ReviewDraft, ReviewForm};
    use crate::domain::subscription::SubscriptionTier;

    #[tokio::test]
    async fn owner_deletes_review() {
        let store = test_support::store();
        let owner = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Pro).await;
        let other = test_support::insert_user(&store, "b@example.com", SubscriptionTier::Pro).await;
        let wine = test_support::insert_wine(&store, &owner.id, "Barolo").await;
        let form = ReviewForm {
            reviewer: "Me".to_string(),
            content: "Good".to_string(),
            ..ReviewForm::default()
        };
        let review = Review::create(wine.id, ReviewDraft::from_form(form, "2024-01-01").unwrap());
        ReviewRepository::create(store.as_ref(), &review).await.unwrap();
        let handler = DeleteReviewHandler::new(store.clone(), store.clone());

        let refused = handler
            .handle(DeleteReviewCommand {
                user_id: other.id,
                review_id: review.id,
            })
            .await
            .unwrap_err();
        assert_eq!(refused, CellarError::Forbidden);
        assert_eq!(store.review_count(), 1);

        let result = handler
            .handle(DeleteReviewCommand {
                user_id: owner.id,
                review_id: review.id,
            })
            .await
            .unwrap();
        assert_eq!(result.wine_id, wine.id);
        assert_eq!(store.review_count(), 0);
    }
}
