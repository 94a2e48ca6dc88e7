//! Reviews attached to a wine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReviewId, Timestamp, ValidationError, WineId};

/// A critic's or personal review of a wine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub wine_id: WineId,
    pub reviewer: String,
    pub date: String,
    pub rating: String,
    pub content: String,
    pub link: String,
    pub created_at: Timestamp,
}

/// Raw review form fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewForm {
    pub reviewer: String,
    pub date: String,
    pub rating: String,
    pub content: String,
    pub link: String,
}

/// Validated review fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub reviewer: String,
    pub date: String,
    pub rating: String,
    pub content: String,
    pub link: String,
}

impl ReviewDraft {
    /// Reviewer and content are required; a blank date becomes `today`.
    pub fn from_form(form: ReviewForm, today: &str) -> Result<Self, ValidationError> {
        let reviewer = form.reviewer.trim().to_string();
        if reviewer.is_empty() {
            return Err(ValidationError::empty_field("reviewer"));
        }
        let content = form.content.trim().to_string();
        if content.is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        let date = match form.date.trim() {
            "" => today.to_string(),
            d => d.to_string(),
        };
        Ok(Self {
            reviewer,
            date,
            rating: form.rating.trim().to_string(),
            content,
            link: normalize_link(&form.link),
        })
    }
}

impl Review {
    pub fn create(wine_id: WineId, draft: ReviewDraft) -> Self {
        Self {
            id: ReviewId::new(),
            wine_id,
            reviewer: draft.reviewer,
            date: draft.date,
            rating: draft.rating,
            content: draft.content,
            link: draft.link,
            created_at: Timestamp::now(),
        }
    }

    pub fn apply(&mut self, draft: ReviewDraft) {
        self.reviewer = draft.reviewer;
        self.date = draft.date;
        self.rating = draft.rating;
        self.content = draft.content;
        self.link = draft.link;
    }
}

/// Adds `https://` to links typed without a scheme.
pub fn normalize_link(raw: &str) -> String {
    let link = raw.trim();
    if link.is_empty() {
        return String::new();
    }
    let lower = link.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{}", link)
    }
}
