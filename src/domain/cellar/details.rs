use serde::Serialize;

use super::{Review, TastingNote, Wine};

/// A wine with everything attached to it, for the details page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WineDetails {
    pub wine: Wine,
    /// Newest first.
    pub reviews: Vec<Review>,
    /// Newest first.
    pub tasting_notes: Vec<TastingNote>,
}
