//! Wine records and the form draft they are built from.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError, WineId};

/// Bottle size used when the form leaves it blank.
pub const DEFAULT_BOTTLE_SIZE: &str = "75cl";

/// A wine in a user's cellar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wine {
    pub id: WineId,
    pub user_id: UserId,
    pub name: String,
    pub producer: String,
    /// Zero for non-vintage wines.
    pub vintage: i32,
    pub is_non_vintage: bool,
    pub grape: String,
    pub country: String,
    pub region: String,
    pub quantity: i32,
    pub price: f64,
    pub abv: f64,
    pub location: String,
    pub rating: String,
    pub drinking_window: String,
    pub notes: String,
    pub image_url: String,
    pub wine_type: String,
    pub category: String,
    pub sub_category: String,
    pub bottle_size: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Wine {
    /// Creates a new wine owned by `user_id` from a validated draft.
    pub fn create(user_id: UserId, draft: WineDraft, image_url: Option<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: WineId::new(),
            user_id,
            name: draft.name,
            producer: draft.producer,
            vintage: draft.vintage,
            is_non_vintage: draft.is_non_vintage,
            grape: draft.grape,
            country: draft.country,
            region: draft.region,
            quantity: draft.quantity,
            price: draft.price,
            abv: draft.abv,
            location: draft.location,
            rating: draft.rating,
            drinking_window: draft.drinking_window,
            notes: draft.notes,
            image_url: image_url.unwrap_or_default(),
            wine_type: draft.wine_type,
            category: draft.category,
            sub_category: draft.sub_category,
            bottle_size: draft.bottle_size,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites every editable field. The image is handled separately.
    pub fn apply(&mut self, draft: WineDraft) {
        self.name = draft.name;
        self.producer = draft.producer;
        self.vintage = draft.vintage;
        self.is_non_vintage = draft.is_non_vintage;
        self.grape = draft.grape;
        self.country = draft.country;
        self.region = draft.region;
        self.quantity = draft.quantity;
        self.price = draft.price;
        self.abv = draft.abv;
        self.location = draft.location;
        self.rating = draft.rating;
        self.drinking_window = draft.drinking_window;
        self.notes = draft.notes;
        self.wine_type = draft.wine_type;
        self.category = draft.category;
        self.sub_category = draft.sub_category;
        self.bottle_size = draft.bottle_size;
        self.updated_at = Timestamp::now();
    }

    /// Vintage as shown to users: the year, or `NV`.
    pub fn vintage_label(&self) -> String {
        if self.is_non_vintage || self.vintage == 0 {
            "NV".to_string()
        } else {
            self.vintage.to_string()
        }
    }
}

/// Raw wine form fields, exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WineForm {
    pub name: String,
    pub producer: String,
    pub vintage: String,
    pub is_non_vintage: Option<String>,
    pub grape: String,
    pub country: String,
    pub region: String,
    pub quantity: String,
    pub price: String,
    pub abv: String,
    pub location: String,
    pub rating: String,
    pub drinking_window: String,
    pub notes: String,
    #[serde(rename = "type")]
    pub wine_type: String,
    pub category: String,
    pub sub_category: String,
    pub bottle_size: String,
}

/// Normalized, validated wine fields.
#[derive(Debug, Clone, PartialEq)]
pub struct WineDraft {
    pub name: String,
    pub producer: String,
    pub vintage: i32,
    pub is_non_vintage: bool,
    pub grape: String,
    pub country: String,
    pub region: String,
    pub quantity: i32,
    pub price: f64,
    pub abv: f64,
    pub location: String,
    pub rating: String,
    pub drinking_window: String,
    pub notes: String,
    pub wine_type: String,
    pub category: String,
    pub sub_category: String,
    pub bottle_size: String,
}

impl WineDraft {
    /// Normalizes a submitted form.
    ///
    /// A blank, unparsable or zero vintage means non-vintage, as does the
    /// NV checkbox. Unparsable numbers fall back to zero and negative
    /// quantities clamp to zero.
    pub fn from_form(form: WineForm) -> Result<Self, ValidationError> {
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let parsed_vintage = form.vintage.trim().parse::<i32>().unwrap_or(0);
        let nv_checked = form
            .is_non_vintage
            .as_deref()
            .map(|v| matches!(v.trim(), "on" | "true" | "1"))
            .unwrap_or(false);
        let is_non_vintage = nv_checked || parsed_vintage <= 0;
        let vintage = if is_non_vintage { 0 } else { parsed_vintage };

        let bottle_size = match form.bottle_size.trim() {
            "" => DEFAULT_BOTTLE_SIZE.to_string(),
            size => size.to_string(),
        };

        Ok(Self {
            name,
            producer: form.producer.trim().to_string(),
            vintage,
            is_non_vintage,
            grape: form.grape.trim().to_string(),
            country: form.country.trim().to_string(),
            region: form.region.trim().to_string(),
            quantity: form.quantity.trim().parse::<i32>().unwrap_or(0).max(0),
            price: parse_amount(&form.price),
            abv: parse_amount(&form.abv),
            location: form.location.trim().to_string(),
            rating: form.rating.trim().to_string(),
            drinking_window: form.drinking_window.trim().to_string(),
            notes: form.notes.trim().to_string(),
            wine_type: form.wine_type.trim().to_string(),
            category: form.category.trim().to_string(),
            sub_category: form.sub_category.trim().to_string(),
            bottle_size,
        })
    }
}

fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Direction of a one-bottle quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityAction {
    Increment,
    Decrement,
}

impl QuantityAction {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim() {
            "increment" => Ok(QuantityAction::Increment),
            "decrement" => Ok(QuantityAction::Decrement),
            other => Err(ValidationError::invalid_format(
                "action",
                format!("unknown action '{}'", other),
            )),
        }
    }

    /// Quantity after the action. Never drops below zero.
    pub fn apply(&self, quantity: i32) -> i32 {
        match self {
            QuantityAction::Increment => quantity.saturating_add(1),
            QuantityAction::Decrement => quantity.saturating_sub(1).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn form(name: &str, vintage: &str) -> WineForm {
        WineForm {
            name: name.to_string(),
            vintage: vintage.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn name_is_required() {
        assert!(WineDraft::from_form(form("   ", "2019")).is_err());
    }

    #[test]
    fn blank_vintage_means_non_vintage() {
        let draft = WineDraft::from_form(form("Champagne", "")).unwrap();
        assert!(draft.is_non_vintage);
        assert_eq!(draft.vintage, 0);
    }

    #[test]
    fn zero_vintage_means_non_vintage() {
        let draft = WineDraft::from_form(form("Champagne", "0")).unwrap();
        assert!(draft.is_non_vintage);
    }

    #[test]
    fn nv_checkbox_overrides_year() {
        let mut f = form("Champagne", "2015");
        f.is_non_vintage = Some("on".into());
        let draft = WineDraft::from_form(f).unwrap();
        assert!(draft.is_non_vintage);
        assert_eq!(draft.vintage, 0);
    }

    #[test]
    fn year_is_kept_when_present() {
        let draft = WineDraft::from_form(form("Barolo", "2016")).unwrap();
        assert!(!draft.is_non_vintage);
        assert_eq!(draft.vintage, 2016);
    }

    #[test]
    fn bottle_size_defaults_to_75cl() {
        let draft = WineDraft::from_form(form("Barolo", "2016")).unwrap();
        assert_eq!(draft.bottle_size, "75cl");

        let mut f = form("Barolo", "2016");
        f.bottle_size = "150cl".into();
        assert_eq!(WineDraft::from_form(f).unwrap().bottle_size, "150cl");
    }

    #[test]
    fn bad_numbers_fall_back_to_zero() {
        let mut f = form("Barolo", "2016");
        f.quantity = "-4".into();
        f.price = "abc".into();
        f.abv = "13.5".into();
        let draft = WineDraft::from_form(f).unwrap();
        assert_eq!(draft.quantity, 0);
        assert_eq!(draft.price, 0.0);
        assert_eq!(draft.abv, 13.5);
    }

    #[test]
    fn vintage_label_shows_nv() {
        let draft = WineDraft::from_form(form("Cava", "")).unwrap();
        let wine = Wine::create(UserId::new(), draft, None);
        assert_eq!(wine.vintage_label(), "NV");
        assert_eq!(wine.image_url, "");
    }

    #[test]
    fn apply_replaces_fields_but_keeps_identity() {
        let draft = WineDraft::from_form(form("Cava", "")).unwrap();
        let mut wine = Wine::create(UserId::new(), draft, Some("/img.png".into()));
        let id = wine.id;
        wine.apply(WineDraft::from_form(form("Rioja", "2018")).unwrap());
        assert_eq!(wine.id, id);
        assert_eq!(wine.name, "Rioja");
        assert_eq!(wine.vintage, 2018);
        assert_eq!(wine.image_url, "/img.png");
    }

    #[test]
    fn quantity_action_parses_known_values() {
        assert_eq!(QuantityAction::parse("increment").unwrap(), QuantityAction::Increment);
        assert_eq!(QuantityAction::parse("decrement").unwrap(), QuantityAction::Decrement);
        assert!(QuantityAction::parse("double").is_err());
    }

    #[test]
    fn decrement_floors_at_zero() {
        assert_eq!(QuantityAction::Decrement.apply(0), 0);
        assert_eq!(QuantityAction::Decrement.apply(3), 2);
        assert_eq!(QuantityAction::Increment.apply(3), 4);
    }

    proptest! {
        #[test]
        fn quantity_never_negative(start in -5i32..1000, steps in proptest::collection::vec(any::<bool>(), 0..50)) {
            let mut q = start.max(0);
            for up in steps {
                let action = if up { QuantityAction::Increment } else { QuantityAction::Decrement };
                q = action.apply(q);
                prop_assert!(q >= 0);
            }
        }

        #[test]
        fn non_vintage_always_has_zero_year(vintage in "\\PC{0,6}") {
            let draft = WineDraft::from_form(form("Any", &vintage)).unwrap();
            prop_assert_eq!(draft.is_non_vintage, draft.vintage == 0);
        }
    }
}
