//! GetWineDetailsHandler - Query handler for the details page.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::cellar::{CellarError, WineDetails};
use crate::domain::foundation::{UserId, WineId};
use crate::ports::{UserRepository, WineReader};

use super::access;

#[derive(Debug, Clone)]
pub struct GetWineDetailsQuery {
    pub user_id: UserId,
    pub wine_id: WineId,
}

#[derive(Debug, Clone)]
pub struct GetWineDetailsResult {
    pub user: User,
    pub details: WineDetails,
}

pub struct GetWineDetailsHandler {
    users: Arc<dyn UserRepository>,
    reader: Arc<dyn WineReader>,
}

impl GetWineDetailsHandler {
    pub fn new(users: Arc<dyn UserRepository>, reader: Arc<dyn WineReader>) -> Self {
        Self { users, reader }
    }

    pub async fn handle(
        &self,
        query: GetWineDetailsQuery,
    ) -> Result<GetWineDetailsResult, CellarError> {
        let user = access::load_user(self.users.as_ref(), &query.user_id).await?;
        let details = self
            .reader
            .details(&user.id, &query.wine_id)
            .await?
            .ok_or_else(CellarError::wine_not_found)?;

        Ok(GetWineDetailsResult { user, details })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::cellar::TastingNote;
    use crate::domain::foundation::Timestamp;
    use crate::domain::subscription::SubscriptionTier;
    use crate::ports::TastingNoteRepository;

    #[tokio::test]
    async fn returns_wine_with_children() {
        let store = test_support::store();
        let user = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Pro).await;
        let wine = test_support::insert_wine(&store, &user.id, "Barolo").await;
        let note = TastingNote::create(wine.id, "Tar and roses", Timestamp::now()).unwrap();
        TastingNoteRepository::create(store.as_ref(), &note).await.unwrap();

        let result = GetWineDetailsHandler::new(store.clone(), store)
            .handle(GetWineDetailsQuery {
                user_id: user.id,
                wine_id: wine.id,
            })
            .await
            .unwrap();

        assert_eq!(result.details.wine.id, wine.id);
        assert_eq!(result.details.tasting_notes.len(), 1);
        assert!(result.details.reviews.is_empty());
        assert!(result.user.is_pro());
    }

    #[tokio::test]
    async fn other_users_wine_is_not_found() {
        let store = test_support::store();
        let owner = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Pro).await;
        let other = test_support::insert_user(&store, "b@example.com", SubscriptionTier::Pro).await;
        let wine = test_support::insert_wine(&store, &owner.id, "Barolo").await;

        let err = GetWineDetailsHandler::new(store.clone(), store)
            .handle(GetWineDetailsQuery {
                user_id: other.id,
                wine_id: wine.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CellarError::wine_not_found());
    }
}
