//! UpdateQuantityHandler - Command handler for the +/- bottle buttons.

use std::sync::Arc;

use crate::domain::cellar::{CellarError, QuantityAction};
use crate::domain::foundation::{UserId, WineId};
use crate::ports::WineRepository;

use super::access;

#[derive(Debug, Clone)]
pub struct UpdateQuantityCommand {
    pub user_id: UserId,
    pub wine_id: WineId,
    pub action: QuantityAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQuantityResult {
    pub wine_id: WineId,
    pub quantity: i32,
}

pub struct UpdateQuantityHandler {
    wines: Arc<dyn WineRepository>,
}

impl UpdateQuantityHandler {
    pub fn new(wines: Arc<dyn WineRepository>) -> Self {
        Self { wines }
    }

    pub async fn handle(
        &self,
        cmd: UpdateQuantityCommand,
    ) -> Result<UpdateQuantityResult, CellarError> {
        let wine = access::owned_wine(self.wines.as_ref(), &cmd.wine_id, &cmd.user_id).await?;
        let quantity = cmd.action.apply(wine.quantity);

        if quantity != wine.quantity {
            self.wines.set_quantity(&wine.id, &cmd.user_id, quantity).await?;
        }

        Ok(UpdateQuantityResult {
            wine_id: wine.id,
            quantity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::subscription::SubscriptionTier;

    #[tokio::test]
    async fn increments_and_decrements() {
        let store = test_support::store();
        let user = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Free).await;
        let wine = test_support::insert_wine(&store, &user.id, "Barolo").await;
        let handler = UpdateQuantityHandler::new(store.clone());

        let up = handler
            .handle(UpdateQuantityCommand {
                user_id: user.id,
                wine_id: wine.id,
                action: QuantityAction::Increment,
            })
            .await
            .unwrap();
        assert_eq!(up.quantity, wine.quantity + 1);

        let down = handler
            .handle(UpdateQuantityCommand {
                user_id: user.id,
                wine_id: wine.id,
                action: QuantityAction::Decrement,
            })
            .await
            .unwrap();
        assert_eq!(down.quantity, wine.quantity);
        let stored = store.find_owned(&wine.id, &user.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, wine.quantity);
    }

    #[tokio::test]
    async fn decrement_stops_at_zero() {
        let store = test_support::store();
        let user = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Free).await;
        let wine = test_support::insert_wine(&store, &user.id, "Barolo").await;
        store.set_quantity(&wine.id, &user.id, 0).await.unwrap();

        let result = UpdateQuantityHandler::new(store)
            .handle(UpdateQuantityCommand {
                user_id: user.id,
                wine_id: wine.id,
                action: QuantityAction::Decrement,
            })
            .await
            .unwrap();

        assert_eq!(result.quantity, 0);
    }

    #[tokio::test]
    async fn other_users_wine_is_not_found() {
        let store = test_support::store();
        let owner = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Free).await;
        let other = test_support::insert_user(&store, "b@example.com", SubscriptionTier::Free).await;
        let wine = test_support::insert_wine(&store, &owner.id, "Barolo").await;

        let err = UpdateQuantityHandler::new(store)
            .handle(UpdateQuantityCommand {
                user_id: other.id,
                wine_id: wine.id,
                action: QuantityAction::Increment,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CellarError::wine_not_found());
    }
}
