//! Cellar domain - wines and what users write about them.
//!
//! Every record here is scoped to its owner. Reviews and tasting notes
//! hang off a wine and are deleted with it.

mod details;
mod errors;
mod links;
mod list_query;
mod review;
mod tasting_note;
mod wine;

pub use details::WineDetails;
pub use errors::CellarError;
pub use links::{page_url, safe_url, sort_url};
pub use list_query::{
    FilterOptions, ListParams, Pagination, SortDirection, SortField, VintageFilter,
    WineFilters, WineListQuery, WinePage, PAGE_SIZE,
};
pub use review::{normalize_link, Review, ReviewDraft, ReviewForm};
pub use tasting_note::TastingNote;
pub use wine::{QuantityAction, Wine, WineDraft, WineForm, DEFAULT_BOTTLE_SIZE};
