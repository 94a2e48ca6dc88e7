//! URL helpers for rendered pages.

use url::form_urlencoded;

use super::list_query::{SortDirection, SortField};

/// Only lets through URLs that are safe to put in `href`/`src`.
pub fn safe_url(raw: &str) -> &str {
    const ALLOWED: [&str; 5] = ["http://", "https://", "mailto:", "/", "data:"];
    if ALLOWED.iter().any(|prefix| raw.starts_with(prefix)) {
        raw
    } else {
        ""
    }
}

fn encode(mut pairs: Vec<(String, String)>) -> String {
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Link for a column header: sorts by `field`, toggling to descending
/// when the column is already sorted ascending. Resets the page.
pub fn sort_url(
    params: &[(String, String)],
    field: SortField,
    current_sort: SortField,
    current_direction: SortDirection,
) -> String {
    let direction = if field == current_sort && current_direction == SortDirection::Asc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };

    let mut pairs: Vec<(String, String)> = params
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), "sort" | "direction" | "page"))
        .cloned()
        .collect();
    pairs.push(("sort".into(), field.as_str().into()));
    pairs.push(("direction".into(), direction.as_str().into()));

    format!("?{}", encode(pairs))
}

/// Link to `page` keeping every other parameter.
pub fn page_url(params: &[(String, String)], page: u32) -> String {
    let mut pairs: Vec<(String, String)> = params
        .iter()
        .filter(|(k, _)| k != "page")
        .cloned()
        .collect();
    pairs.push(("page".into(), page.to_string()));
    format!("?{}", encode(pairs))
}
