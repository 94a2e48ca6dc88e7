//! WineAllowanceHandler - Query handler telling the add form whether the
//! user may add another wine.

use std::sync::Arc;

use crate::domain::cellar::CellarError;
use crate::domain::foundation::UserId;
use crate::domain::subscription::TierLimits;
use crate::ports::{UserRepository, WineRepository};

use super::access;

#[derive(Debug, Clone)]
pub struct WineAllowanceQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WineAllowanceResult {
    pub limits: TierLimits,
    pub wine_count: u32,
    pub limit_reached: bool,
}

pub struct WineAllowanceHandler {
    users: Arc<dyn UserRepository>,
    wines: Arc<dyn WineRepository>,
}

impl WineAllowanceHandler {
    pub fn new(users: Arc<dyn UserRepository>, wines: Arc<dyn WineRepository>) -> Self {
        Self { users, wines }
    }

    pub async fn handle(&self, query: WineAllowanceQuery) -> Result<WineAllowanceResult, CellarError> {
        let user = access::load_user(self.users.as_ref(), &query.user_id).await?;
        let limits = user.limits();
        let wine_count = self.wines.count_for_user(&user.id).await?;

        Ok(WineAllowanceResult {
            limit_reached: limits.wine_limit_reached(wine_count),
            limits,
            wine_count,
        })
    }
}
