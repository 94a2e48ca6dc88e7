//! Wine reader port (read side).
//!
//! Query-optimized views for the list, details and export pages.

use crate::domain::cellar::{FilterOptions, WineDetails, WineListQuery, WinePage};
use crate::domain::foundation::{DomainError, UserId, WineId};
use async_trait::async_trait;

/// One line of the CSV export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub name: String,
    pub producer: String,
    pub vintage: i32,
    pub is_non_vintage: bool,
    pub grape: String,
    pub country: String,
    pub region: String,
    pub quantity: i32,
    pub price: f64,
    pub location: String,
    pub rating: String,
    pub notes: String,
}

#[async_trait]
pub trait WineReader: Send + Sync {
    /// One page of the user's wines.
    ///
    /// The query has already been restricted to the user's tier. The
    /// returned pagination has the requested page clamped to the last page.
    async fn list(&self, user_id: &UserId, query: &WineListQuery) -> Result<WinePage, DomainError>;

    /// Distinct values across all of the user's wines.
    async fn filter_options(&self, user_id: &UserId) -> Result<FilterOptions, DomainError>;

    /// Returns `None` if the wine doesn't exist or isn't the user's.
    async fn details(
        &self,
        user_id: &UserId,
        wine_id: &WineId,
    ) -> Result<Option<WineDetails>, DomainError>;

    /// All of the user's wines, ordered by name.
    async fn export_rows(&self, user_id: &UserId) -> Result<Vec<ExportRow>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wine_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn WineReader) {}
    }
}
