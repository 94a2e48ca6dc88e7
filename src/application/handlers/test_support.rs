//! Fixtures shared by handler tests.

use std::sync::Arc;

use crate::adapters::auth::BcryptPasswordHasher;
use crate::adapters::memory::InMemoryCellar;
use crate::domain::account::{Email, User};
use crate::domain::cellar::{Wine, WineDraft, WineForm};
use crate::domain::foundation::UserId;
use crate::domain::subscription::SubscriptionTier;
use crate::ports::{PasswordHasher, UserRepository, WineRepository};

/// Lowest bcrypt cost, keeps tests fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn store() -> Arc<InMemoryCellar> {
    Arc::new(InMemoryCellar::new())
}

pub fn hasher() -> Arc<dyn PasswordHasher> {
    Arc::new(BcryptPasswordHasher::new(TEST_BCRYPT_COST))
}

pub async fn insert_user(store: &InMemoryCellar, email: &str, tier: SubscriptionTier) -> User {
    let mut user = User::new(Email::parse(email).unwrap(), "unused-hash");
    user.subscription_tier = tier;
    UserRepository::create(store, &user).await.unwrap();
    user
}

pub fn wine_form(name: &str) -> WineForm {
    WineForm {
        name: name.to_string(),
        producer: "Producer".to_string(),
        vintage: "2019".to_string(),
        quantity: "2".to_string(),
        price: "24.50".to_string(),
        ..WineForm::default()
    }
}

pub async fn insert_wine(store: &InMemoryCellar, owner: &UserId, name: &str) -> Wine {
    let wine = Wine::create(*owner, WineDraft::from_form(wine_form(name)).unwrap(), None);
    WineRepository::create(store, &wine).await.unwrap();
    wine
}
