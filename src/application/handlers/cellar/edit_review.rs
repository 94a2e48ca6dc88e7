//! EditReviewHandler - Command handler for changing a review.

use std::sync::Arc;

use crate::domain::cellar::{CellarError, Review, ReviewDraft, ReviewForm};
use crate::domain::foundation::{ReviewId, UserId};
use crate::ports::{ReviewRepository, WineRepository};

use super::access;

#[derive(Debug, Clone)]
pub struct EditReviewCommand {
    pub user_id: UserId,
    pub review_id: ReviewId,
    pub form: ReviewForm,
}

#[derive(Debug, Clone)]
pub struct EditReviewResult {
    pub review: Review,
}

pub struct EditReviewHandler {
    wines: Arc<dyn WineRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl EditReviewHandler {
    pub fn new(wines: Arc<dyn WineRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { wines, reviews }
    }

    pub async fn handle(&self, cmd: EditReviewCommand) -> Result<EditReviewResult, CellarError> {
        let mut review = access::owned_review(
            self.reviews.as_ref(),
            self.wines.as_ref(),
            &cmd.review_id,
            &cmd.user_id,
        )
        .await?;

        // A blank date keeps the original one.
        let draft = ReviewDraft::from_form(cmd.form, &review.date)?;
        review.apply(draft);
        self.reviews.update(&review).await?;

        tracing::info!(user_id = %cmd.user_id, review_id = %review.id, "Review updated");
        Ok(EditReviewResult { review })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCellar;
    use crate::application::handlers::test_support;
    use crate::domain::subscription::SubscriptionTier;

    async fn seeded() -> (Arc<InMemoryCellar>, UserId, Review) {
        let store = test_support::store();
        let user = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Pro).await;
        let wine = test_support::insert_wine(&store, &user.id, "Barolo").await;
        let form = ReviewForm {
            reviewer: "Me".to_string(),
            content: "First impression".to_string(),
            ..ReviewForm::default()
        };
        let review = Review::create(wine.id, ReviewDraft::from_form(form, "2023-05-01").unwrap());
        ReviewRepository::create(store.as_ref(), &review).await.unwrap();
        (store, user.id, review)
    }

    #[tokio::test]
    async fn updates_review_and_keeps_date_when_blank() {
        let (store, user_id, review) = seeded().await;
        let handler = EditReviewHandler::new(store.clone(), store.clone());

        let result = handler
            .handle(EditReviewCommand {
                user_id,
                review_id: review.id,
                form: ReviewForm {
                    reviewer: "Me".to_string(),
                    content: "Opened up nicely".to_string(),
                    ..ReviewForm::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(result.review.content, "Opened up nicely");
        assert_eq!(result.review.date, "2023-05-01");
        let stored = ReviewRepository::find_by_id(store.as_ref(), &review.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.content, "Opened up nicely");
    }

    #[tokio::test]
    async fn review_on_another_users_wine_is_forbidden() {
        let (store, _owner, review) = seeded().await;
        let intruder = test_support::insert_user(&store, "b@example.com", SubscriptionTier::Pro).await;

        let err = EditReviewHandler::new(store.clone(), store)
            .handle(EditReviewCommand {
                user_id: intruder.id,
                review_id: review.id,
                form: ReviewForm {
                    reviewer: "X".to_string(),
                    content: "Y".to_string(),
                    ..ReviewForm::default()
                },
            })
            .await
            .unwrap_err();

        assert_eq!(err, CellarError::Forbidden);
    }

    #[tokio::test]
    async fn missing_review_is_not_found() {
        let (store, user_id, _review) = seeded().await;

        let err = EditReviewHandler::new(store.clone(), store)
            .handle(EditReviewCommand {
                user_id,
                review_id: ReviewId::new(),
                form: ReviewForm::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, CellarError::review_not_found());
    }
}
