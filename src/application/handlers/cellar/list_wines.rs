//! ListWinesHandler - Query handler for the cellar list view.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::cellar::{CellarError, FilterOptions, ListParams, WineListQuery, WinePage};
use crate::domain::foundation::UserId;
use crate::ports::{UserRepository, WineReader};

use super::access;

#[derive(Debug, Clone)]
pub struct ListWinesQuery {
    pub user_id: UserId,
    pub params: ListParams,
}

#[derive(Debug, Clone)]
pub struct ListWinesResult {
    pub user: User,
    /// The query actually run, after tier restrictions.
    pub query: WineListQuery,
    pub page: WinePage,
    /// Only populated for Pro users.
    pub filter_options: Option<FilterOptions>,
}

pub struct ListWinesHandler {
    users: Arc<dyn UserRepository>,
    reader: Arc<dyn WineReader>,
}

impl ListWinesHandler {
    pub fn new(users: Arc<dyn UserRepository>, reader: Arc<dyn WineReader>) -> Self {
        Self { users, reader }
    }

    pub async fn handle(&self, query: ListWinesQuery) -> Result<ListWinesResult, CellarError> {
        let user = access::load_user(self.users.as_ref(), &query.user_id).await?;
        let limits = user.limits();

        let list_query = WineListQuery::from_params(&query.params).restricted_to(limits.search_enabled);
        let page = self.reader.list(&user.id, &list_query).await?;

        let filter_options = if limits.search_enabled {
            Some(self.reader.filter_options(&user.id).await?)
        } else {
            None
        };

        Ok(ListWinesResult {
            user,
            query: list_query,
            page,
            filter_options,
        })
    }
}
