//! Dated tasting notes attached to a wine.

use serde::Serialize;

use crate::domain::foundation::{TastingNoteId, Timestamp, ValidationError, WineId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TastingNote {
    pub id: TastingNoteId,
    pub wine_id: WineId,
    /// `YYYY-MM-DD`
    pub date: String,
    pub note: String,
    pub created_at: Timestamp,
}

impl TastingNote {
    /// Creates a note dated on the day it was written.
    pub fn create(wine_id: WineId, note: &str, now: Timestamp) -> Result<Self, ValidationError> {
        let note = note.trim();
        if note.is_empty() {
            return Err(ValidationError::empty_field("note"));
        }
        Ok(Self {
            id: TastingNoteId::new(),
            wine_id,
            date: now.date_string(),
            note: note.to_string(),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn note_is_dated_today() {
        let now = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 9, 14, 21, 0, 0).unwrap());
        let note = TastingNote::create(WineId::new(), "Cherry, leather", now).unwrap();
        assert_eq!(note.date, "2024-09-14");
        assert_eq!(note.note, "Cherry, leather");
    }

    #[test]
    fn empty_note_is_rejected() {
        assert!(TastingNote::create(WineId::new(), "  ", Timestamp::now()).is_err());
    }
}
