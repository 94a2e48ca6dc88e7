//! Cellar handlers.
//!
//! ## Commands
//! - Adding, editing and deleting wines, and adjusting bottle counts
//! - Adding, editing and deleting reviews (Pro)
//! - Adding and deleting tasting notes (Pro)
//!
//! ## Queries
//! - The list view with search, filters, sorting and paging
//! - The details page
//! - Whether the free-tier wine limit has been reached

mod access;
mod add_review;
mod add_tasting_note;
mod add_wine;
mod delete_review;
mod delete_tasting_note;
mod delete_wine;
mod edit_review;
mod edit_wine;
mod get_wine_details;
mod list_wines;
mod update_quantity;
mod wine_allowance;

// Commands
pub use add_review::{AddReviewCommand, AddReviewHandler, AddReviewResult};
pub use add_tasting_note::{AddTastingNoteCommand, AddTastingNoteHandler, AddTastingNoteResult};
pub use add_wine::{AddWineCommand, AddWineHandler, AddWineResult};
pub use delete_review::{DeleteReviewCommand, DeleteReviewHandler, DeleteReviewResult};
pub use delete_tasting_note::{
    DeleteTastingNoteCommand, DeleteTastingNoteHandler, DeleteTastingNoteResult,
};
pub use delete_wine::{DeleteWineCommand, DeleteWineHandler, DeleteWineResult};
pub use edit_review::{EditReviewCommand, EditReviewHandler, EditReviewResult};
pub use edit_wine::{EditWineCommand, EditWineHandler, EditWineResult};
pub use update_quantity::{UpdateQuantityCommand, UpdateQuantityHandler, UpdateQuantityResult};

// Queries
pub use get_wine_details::{GetWineDetailsHandler, GetWineDetailsQuery, GetWineDetailsResult};
pub use list_wines::{ListWinesHandler, ListWinesQuery, ListWinesResult};
pub use wine_allowance::{WineAllowanceHandler, WineAllowanceQuery, WineAllowanceResult};
