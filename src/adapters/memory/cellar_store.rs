//! In-memory implementation of every persistence port.
//!
//! One shared store backs the user, wine, review and tasting note
//! repositories and the wine reader, so reads see earlier writes the way
//! they would against Postgres. Used by handler and HTTP tests.

use std::cmp::Ordering;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::account::{Currency, User};
use crate::domain::cellar::{
    FilterOptions, Pagination, Review, SortDirection, SortField, TastingNote, VintageFilter, Wine,
    WineDetails, WineListQuery, WinePage,
};
use crate::domain::foundation::{
    DomainError, ErrorCode, ReviewId, TastingNoteId, Timestamp, UserId, WineId,
};
use crate::domain::subscription::{SubscriptionChange, SubscriptionIdUpdate, SubscriptionTier};
use crate::ports::{
    ExportRow, ReviewRepository, SubscriberLookup, TastingNoteRepository, UserRepository,
    WineReader, WineRepository,
};

#[derive(Default)]
struct CellarState {
    users: Vec<User>,
    wines: Vec<Wine>,
    reviews: Vec<Review>,
    tasting_notes: Vec<TastingNote>,
}

impl CellarState {
    fn user_mut(&mut self, id: &UserId) -> Result<&mut User, DomainError> {
        self.users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found"))
    }

    fn owned_wine_mut(&mut self, id: &WineId, user_id: &UserId) -> Result<&mut Wine, DomainError> {
        self.wines
            .iter_mut()
            .find(|w| w.id == *id && w.user_id == *user_id)
            .ok_or_else(|| DomainError::new(ErrorCode::WineNotFound, "Wine not found"))
    }

    fn remove_wines(&mut self, doomed: &[WineId]) {
        self.reviews.retain(|r| !doomed.contains(&r.wine_id));
        self.tasting_notes.retain(|n| !doomed.contains(&n.wine_id));
        self.wines.retain(|w| !doomed.contains(&w.id));
    }

    fn matches_search(&self, wine: &Wine, term: &str) -> bool {
        let hit = |text: &str| text.to_lowercase().contains(term);
        hit(&wine.name)
            || hit(&wine.producer)
            || hit(&wine.region)
            || hit(&wine.category)
            || self
                .reviews
                .iter()
                .filter(|r| r.wine_id == wine.id)
                .any(|r| hit(&r.content) || hit(&r.reviewer))
            || self
                .tasting_notes
                .iter()
                .filter(|n| n.wine_id == wine.id)
                .any(|n| hit(&n.note))
    }

    fn matches_filters(wine: &Wine, query: &WineListQuery) -> bool {
        let filters = &query.filters;
        let eq = |filter: &Option<String>, value: &str| filter.as_deref().map_or(true, |f| f == value);

        eq(&filters.category, &wine.category)
            && eq(&filters.country, &wine.country)
            && eq(&filters.region, &wine.region)
            && eq(&filters.producer, &wine.producer)
            && match filters.vintage {
                None => true,
                Some(VintageFilter::NonVintage) => wine.is_non_vintage,
                Some(VintageFilter::Year(year)) => wine.vintage == year,
            }
    }
}

fn compare(a: &Wine, b: &Wine, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Category => a.category.cmp(&b.category),
        SortField::Producer => a.producer.cmp(&b.producer),
        SortField::Region => a.region.cmp(&b.region),
        SortField::Vintage => a.vintage.cmp(&b.vintage),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn distinct_sorted(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut values: Vec<String> = values.filter(|v| !v.is_empty()).collect();
    values.sort();
    values.dedup();
    values
}

/// Shared in-memory store.
///
/// Wrap in an `Arc` and hand the same instance to every port that needs it.
#[derive(Default)]
pub struct InMemoryCellar {
    state: RwLock<CellarState>,
}

impl InMemoryCellar {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, CellarState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CellarState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // === Test Helpers ===

    pub fn user_count(&self) -> usize {
        self.read().users.len()
    }

    pub fn wine_count(&self) -> usize {
        self.read().wines.len()
    }

    pub fn review_count(&self) -> usize {
        self.read().reviews.len()
    }

    pub fn tasting_note_count(&self) -> usize {
        self.read().tasting_notes.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryCellar {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut state = self.write();
        if state
            .users
            .iter()
            .any(|u| u.email.as_str() == user.email.as_str())
        {
            return Err(DomainError::new(ErrorCode::EmailTaken, "Email already exists"));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.read().users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .read()
            .users
            .iter()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .read()
            .users
            .iter()
            .find(|u| u.stripe_customer_id.as_deref() == Some(customer_id))
            .cloned())
    }

    async fn update_password_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError> {
        let mut state = self.write();
        let user = state.user_mut(id)?;
        user.password_hash = hash.to_string();
        user.updated_at = Timestamp::now();
        Ok(())
    }

    async fn update_currency(&self, id: &UserId, currency: &Currency) -> Result<(), DomainError> {
        let mut state = self.write();
        let user = state.user_mut(id)?;
        user.currency = currency.clone();
        user.updated_at = Timestamp::now();
        Ok(())
    }

    async fn update_tier(&self, id: &UserId, tier: SubscriptionTier) -> Result<(), DomainError> {
        let mut state = self.write();
        let user = state.user_mut(id)?;
        user.subscription_tier = tier;
        user.updated_at = Timestamp::now();
        Ok(())
    }

    async fn apply_subscription_change(
        &self,
        lookup: &SubscriberLookup,
        change: &SubscriptionChange,
    ) -> Result<Option<UserId>, DomainError> {
        let mut state = self.write();
        let user = state.users.iter_mut().find(|u| match lookup {
            SubscriberLookup::User(id) => u.id == *id,
            SubscriberLookup::StripeCustomer(customer_id) => {
                u.stripe_customer_id.as_deref() == Some(customer_id.as_str())
            }
        });
        let Some(user) = user else {
            return Ok(None);
        };

        user.subscription_status = Some(change.status.as_str().to_string());
        if let Some(tier) = change.tier {
            user.subscription_tier = tier;
        }
        if let Some(customer_id) = &change.stripe_customer_id {
            user.stripe_customer_id = Some(customer_id.clone());
        }
        match &change.subscription_id {
            SubscriptionIdUpdate::Keep => {}
            SubscriptionIdUpdate::Set(id) => user.subscription_id = Some(id.clone()),
            SubscriptionIdUpdate::Clear => user.subscription_id = None,
        }
        user.updated_at = Timestamp::now();
        Ok(Some(user.id))
    }

    async fn delete_with_wines(&self, id: &UserId) -> Result<(), DomainError> {
        let mut state = self.write();
        state.user_mut(id)?;

        let doomed: Vec<WineId> = state
            .wines
            .iter()
            .filter(|w| w.user_id == *id)
            .map(|w| w.id)
            .collect();
        state.remove_wines(&doomed);
        state.users.retain(|u| u.id != *id);
        Ok(())
    }
}

#[async_trait]
impl WineRepository for InMemoryCellar {
    async fn create(&self, wine: &Wine) -> Result<(), DomainError> {
        self.write().wines.push(wine.clone());
        Ok(())
    }

    async fn update(&self, wine: &Wine) -> Result<(), DomainError> {
        let mut state = self.write();
        let stored = state.owned_wine_mut(&wine.id, &wine.user_id)?;
        *stored = wine.clone();
        stored.updated_at = Timestamp::now();
        Ok(())
    }

    async fn find_owned(&self, id: &WineId, user_id: &UserId) -> Result<Option<Wine>, DomainError> {
        Ok(self
            .read()
            .wines
            .iter()
            .find(|w| w.id == *id && w.user_id == *user_id)
            .cloned())
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u32, DomainError> {
        Ok(self
            .read()
            .wines
            .iter()
            .filter(|w| w.user_id == *user_id)
            .count() as u32)
    }

    async fn set_quantity(
        &self,
        id: &WineId,
        user_id: &UserId,
        quantity: i32,
    ) -> Result<(), DomainError> {
        let mut state = self.write();
        let wine = state.owned_wine_mut(id, user_id)?;
        wine.quantity = quantity;
        wine.updated_at = Timestamp::now();
        Ok(())
    }

    async fn delete_owned(&self, id: &WineId, user_id: &UserId) -> Result<(), DomainError> {
        let mut state = self.write();
        state.owned_wine_mut(id, user_id)?;
        state.remove_wines(&[*id]);
        Ok(())
    }

    async fn has_any(&self) -> Result<bool, DomainError> {
        Ok(!self.read().wines.is_empty())
    }
}

#[async_trait]
impl WineReader for InMemoryCellar {
    async fn list(&self, user_id: &UserId, query: &WineListQuery) -> Result<WinePage, DomainError> {
        let state = self.read();
        let term = query.search.as_ref().map(|s| s.to_lowercase());

        let mut wines: Vec<Wine> = state
            .wines
            .iter()
            .filter(|w| w.user_id == *user_id)
            .filter(|w| CellarState::matches_filters(w, query))
            .filter(|w| term.as_deref().map_or(true, |t| state.matches_search(w, t)))
            .cloned()
            .collect();

        wines.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort);
            let ordering = match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.id.cmp(&b.id))
        });

        let pagination = Pagination::new(query.page, wines.len() as u64);
        let wines = wines
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();

        Ok(WinePage { wines, pagination })
    }

    async fn filter_options(&self, user_id: &UserId) -> Result<FilterOptions, DomainError> {
        let state = self.read();
        let owned: Vec<&Wine> = state.wines.iter().filter(|w| w.user_id == *user_id).collect();

        let mut vintages: Vec<i32> = owned.iter().map(|w| w.vintage).filter(|v| *v > 0).collect();
        vintages.sort_unstable_by(|a, b| b.cmp(a));
        vintages.dedup();

        Ok(FilterOptions {
            categories: distinct_sorted(owned.iter().map(|w| w.category.clone())),
            countries: distinct_sorted(owned.iter().map(|w| w.country.clone())),
            regions: distinct_sorted(owned.iter().map(|w| w.region.clone())),
            producers: distinct_sorted(owned.iter().map(|w| w.producer.clone())),
            vintages,
            has_nv: owned.iter().any(|w| w.is_non_vintage),
        })
    }

    async fn details(
        &self,
        user_id: &UserId,
        wine_id: &WineId,
    ) -> Result<Option<WineDetails>, DomainError> {
        let state = self.read();
        let Some(wine) = state
            .wines
            .iter()
            .find(|w| w.id == *wine_id && w.user_id == *user_id)
        else {
            return Ok(None);
        };

        let mut reviews: Vec<Review> = state
            .reviews
            .iter()
            .filter(|r| r.wine_id == *wine_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut tasting_notes: Vec<TastingNote> = state
            .tasting_notes
            .iter()
            .filter(|n| n.wine_id == *wine_id)
            .cloned()
            .collect();
        tasting_notes.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        Ok(Some(WineDetails {
            wine: wine.clone(),
            reviews,
            tasting_notes,
        }))
    }

    async fn export_rows(&self, user_id: &UserId) -> Result<Vec<ExportRow>, DomainError> {
        let state = self.read();
        let mut wines: Vec<&Wine> = state.wines.iter().filter(|w| w.user_id == *user_id).collect();
        wines.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Ok(wines
            .into_iter()
            .map(|w| ExportRow {
                name: w.name.clone(),
                producer: w.producer.clone(),
                vintage: w.vintage,
                is_non_vintage: w.is_non_vintage,
                grape: w.grape.clone(),
                country: w.country.clone(),
                region: w.region.clone(),
                quantity: w.quantity,
                price: w.price,
                location: w.location.clone(),
                rating: w.rating.clone(),
                notes: w.notes.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryCellar {
    async fn create(&self, review: &Review) -> Result<(), DomainError> {
        self.write().reviews.push(review.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError> {
        Ok(self.read().reviews.iter().find(|r| r.id == *id).cloned())
    }

    async fn update(&self, review: &Review) -> Result<(), DomainError> {
        let mut state = self.write();
        let stored = state
            .reviews
            .iter_mut()
            .find(|r| r.id == review.id)
            .ok_or_else(|| DomainError::new(ErrorCode::ReviewNotFound, "Review not found"))?;
        *stored = review.clone();
        Ok(())
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), DomainError> {
        let mut state = self.write();
        let before = state.reviews.len();
        state.reviews.retain(|r| r.id != *id);
        if state.reviews.len() == before {
            return Err(DomainError::new(ErrorCode::ReviewNotFound, "Review not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl TastingNoteRepository for InMemoryCellar {
    async fn create(&self, note: &TastingNote) -> Result<(), DomainError> {
        self.write().tasting_notes.push(note.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TastingNoteId) -> Result<Option<TastingNote>, DomainError> {
        Ok(self.read().tasting_notes.iter().find(|n| n.id == *id).cloned())
    }

    async fn delete(&self, id: &TastingNoteId) -> Result<(), DomainError> {
        let mut state = self.write();
        let before = state.tasting_notes.len();
        state.tasting_notes.retain(|n| n.id != *id);
        if state.tasting_notes.len() == before {
            return Err(DomainError::new(
                ErrorCode::TastingNoteNotFound,
                "Tasting note not found",
            ));
        }
        Ok(())
    }
}
