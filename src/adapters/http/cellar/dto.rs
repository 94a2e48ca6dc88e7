//! Form payloads for cellar pages.
//!
//! Every POST that targets an existing record carries its id in a hidden
//! `id` field.

use std::str::FromStr;

use serde::Deserialize;

use crate::adapters::http::error::AppError;
use crate::domain::cellar::ReviewForm;

/// Parses an id from a form field or path segment.
pub fn parse_id<T: FromStr>(raw: &str) -> Result<T, AppError> {
    raw.parse::<T>().map_err(|_| AppError::BadRequest("Invalid ID"))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IdForm {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuantityForm {
    pub id: String,
    pub action: String,
}

/// Review fields plus the id of the wine (add) or review (edit).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewPayload {
    pub id: String,
    pub reviewer: String,
    pub date: String,
    pub rating: String,
    pub content: String,
    pub link: String,
}

impl ReviewPayload {
    pub fn into_parts(self) -> (String, ReviewForm) {
        (
            self.id,
            ReviewForm {
                reviewer: self.reviewer,
                date: self.date,
                rating: self.rating,
                content: self.content,
                link: self.link,
            },
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TastingNotePayload {
    pub id: String,
    pub note: String,
}
