//! Search, filter, sort and pagination parameters for the wine list.
//!
//! Everything here is pure. The Postgres reader turns a [`WineListQuery`]
//! into SQL; only allow-listed column names ever reach the ORDER BY.

use serde::Serialize;

use super::wine::Wine;

/// Wines shown per list page.
pub const PAGE_SIZE: u32 = 10;

/// Columns the list may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Name,
    Category,
    Producer,
    Region,
    Vintage,
    Quantity,
    CreatedAt,
}

impl SortField {
    /// Unknown or missing values sort by name.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).unwrap_or_default() {
            "category" => SortField::Category,
            "producer" => SortField::Producer,
            "region" => SortField::Region,
            "vintage" => SortField::Vintage,
            "quantity" => SortField::Quantity,
            "created_at" => SortField::CreatedAt,
            _ => SortField::Name,
        }
    }

    /// Query-string value, which is also the column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Category => "category",
            SortField::Producer => "producer",
            SortField::Region => "region",
            SortField::Vintage => "vintage",
            SortField::Quantity => "quantity",
            SortField::CreatedAt => "created_at",
        }
    }

    /// Newest, fullest and youngest first; text columns alphabetical.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            SortField::Vintage | SortField::Quantity | SortField::CreatedAt => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: Option<&str>, field: SortField) -> Self {
        match raw.map(str::trim) {
            Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            _ => field.default_direction(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Vintage filter: `NV` or a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VintageFilter {
    NonVintage,
    Year(i32),
}

impl VintageFilter {
    /// Returns `None` for blank or unrecognised input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("nv") {
            return Some(VintageFilter::NonVintage);
        }
        raw.parse::<i32>().ok().map(VintageFilter::Year)
    }
}

/// Exact-match attribute filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WineFilters {
    pub category: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub producer: Option<String>,
    pub vintage: Option<VintageFilter>,
}

impl WineFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.country.is_none()
            && self.region.is_none()
            && self.producer.is_none()
            && self.vintage.is_none()
    }
}

/// Query-string parameters of `GET /`.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub producer: Option<String>,
    pub vintage: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<String>,
}

impl ListParams {
    /// Builds the parameters from decoded query pairs. A repeated key keeps
    /// its first value; unknown keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "q" => &mut params.q,
                "category" => &mut params.category,
                "country" => &mut params.country,
                "region" => &mut params.region,
                "producer" => &mut params.producer,
                "vintage" => &mut params.vintage,
                "sort" => &mut params.sort,
                "direction" => &mut params.direction,
                "page" => &mut params.page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }
}

/// A parsed list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WineListQuery {
    pub search: Option<String>,
    pub filters: WineFilters,
    pub sort: SortField,
    pub direction: SortDirection,
    /// Requested page, at least 1. Clamped to the last page once the
    /// total is known.
    pub page: u32,
}

impl Default for WineListQuery {
    fn default() -> Self {
        Self {
            search: None,
            filters: WineFilters::default(),
            sort: SortField::Name,
            direction: SortDirection::Asc,
            page: 1,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl WineListQuery {
    pub fn from_params(params: &ListParams) -> Self {
        let sort = SortField::parse(params.sort.as_deref());
        let direction = SortDirection::parse(params.direction.as_deref(), sort);
        let page = params
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .map(|p| p.min(u32::MAX as i64) as u32)
            .unwrap_or(1);

        Self {
            search: non_blank(&params.q),
            filters: WineFilters {
                category: non_blank(&params.category),
                country: non_blank(&params.country),
                region: non_blank(&params.region),
                producer: non_blank(&params.producer),
                vintage: params.vintage.as_deref().and_then(VintageFilter::parse),
            },
            sort,
            direction,
            page,
        }
    }

    /// Drops search and filters when the user's tier doesn't include them.
    /// Sorting and paging stay available to everyone.
    pub fn restricted_to(mut self, search_enabled: bool) -> Self {
        if !search_enabled {
            self.search = None;
            self.filters = WineFilters::default();
        }
        self
    }

    /// Case-insensitive `LIKE` pattern for the search term, with the
    /// wildcard characters in the term itself escaped.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|term| {
            let mut escaped = String::with_capacity(term.len() + 2);
            escaped.push('%');
            for ch in term.to_lowercase().chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    escaped.push('\\');
                }
                escaped.push(ch);
            }
            escaped.push('%');
            escaped
        })
    }
}

/// Page position within a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl Pagination {
    /// Clamps the requested page into `1..=total_pages`. An empty result
    /// set reports zero pages and stays on page 1.
    pub fn new(requested: u32, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(PAGE_SIZE as u64).min(u32::MAX as u64) as u32;
        let current = if total_pages == 0 {
            1
        } else {
            requested.clamp(1, total_pages)
        };
        Self {
            current,
            total_pages,
            total_items,
        }
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE as i64
    }

    pub fn offset(&self) -> i64 {
        (self.current as i64 - 1) * PAGE_SIZE as i64
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    pub fn prev(&self) -> u32 {
        self.current.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> u32 {
        self.current.saturating_add(1)
    }

    pub fn pages(&self) -> impl Iterator<Item = u32> {
        1..=self.total_pages
    }
}

/// Distinct values offered in the Pro filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub countries: Vec<String>,
    pub regions: Vec<String>,
    pub producers: Vec<String>,
    /// Descending.
    pub vintages: Vec<i32>,
    pub has_nv: bool,
}

/// One page of the list.
#[derive(Debug, Clone, PartialEq)]
pub struct WinePage {
    pub wines: Vec<Wine>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(pairs: &[(&str, &str)]) -> ListParams {
        ListParams::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let p = params(&[("page", "1"), ("page", "2"), ("utm_source", "mail"), ("q", "")]);
        assert_eq!(p.page.as_deref(), Some("1"));
        assert_eq!(p.q.as_deref(), Some(""));
        assert_eq!(WineListQuery::from_params(&p).page, 1);
    }

    // ════════════════════════════════════════════════════════════════════
    // Sorting
    // ════════════════════════════════════════════════════════════════════

    #[test]
    fn unknown_sort_field_falls_back_to_name() {
        let q = WineListQuery::from_params(&params(&[("sort", "id; DROP TABLE wines")]));
        assert_eq!(q.sort, SortField::Name);
        assert_eq!(q.direction, SortDirection::Asc);
    }

    #[test]
    fn numeric_fields_default_to_descending() {
        for field in ["vintage", "quantity", "created_at"] {
            let q = WineListQuery::from_params(&params(&[("sort", field)]));
            assert_eq!(q.direction, SortDirection::Desc, "{}", field);
        }
        let q = WineListQuery::from_params(&params(&[("sort", "region")]));
        assert_eq!(q.direction, SortDirection::Asc);
    }

    #[test]
    fn explicit_direction_wins() {
        let q = WineListQuery::from_params(&params(&[("sort", "vintage"), ("direction", "asc")]));
        assert_eq!(q.direction, SortDirection::Asc);
        let q = WineListQuery::from_params(&params(&[("sort", "name"), ("direction", "sideways")]));
        assert_eq!(q.direction, SortDirection::Asc);
    }

    // ════════════════════════════════════════════════════════════════════
    // Filters and search
    // ════════════════════════════════════════════════════════════════════

    #[test]
    fn vintage_filter_parses_nv_and_years() {
        assert_eq!(VintageFilter::parse("NV"), Some(VintageFilter::NonVintage));
        assert_eq!(VintageFilter::parse("2015"), Some(VintageFilter::Year(2015)));
        assert_eq!(VintageFilter::parse("old"), None);
        assert_eq!(VintageFilter::parse(""), None);
    }

    #[test]
    fn blank_filters_are_ignored() {
        let q = WineListQuery::from_params(&params(&[("category", " "), ("q", "")]));
        assert!(q.filters.is_empty());
        assert!(q.search.is_none());
    }

    #[test]
    fn free_users_lose_search_and_filters_but_keep_sort() {
        let q = WineListQuery::from_params(&params(&[
            ("q", "rioja"),
            ("country", "Spain"),
            ("sort", "vintage"),
            ("page", "2"),
        ]))
        .restricted_to(false);
        assert!(q.search.is_none());
        assert!(q.filters.is_empty());
        assert_eq!(q.sort, SortField::Vintage);
        assert_eq!(q.page, 2);
    }

    #[test]
    fn pro_users_keep_search_and_filters() {
        let q = WineListQuery::from_params(&params(&[("q", "rioja"), ("country", "Spain")]))
            .restricted_to(true);
        assert_eq!(q.search.as_deref(), Some("rioja"));
        assert_eq!(q.filters.country.as_deref(), Some("Spain"));
    }

    #[test]
    fn search_pattern_is_lowercased_and_escaped() {
        let q = WineListQuery::from_params(&params(&[("q", "100%_Pinot")]));
        assert_eq!(q.search_pattern().as_deref(), Some("%100\\%\\_pinot%"));
    }

    // ════════════════════════════════════════════════════════════════════
    // Pagination
    // ════════════════════════════════════════════════════════════════════

    #[test]
    fn invalid_page_becomes_first() {
        for raw in ["0", "-3", "abc", ""] {
            let q = WineListQuery::from_params(&params(&[("page", raw)]));
            assert_eq!(q.page, 1, "{}", raw);
        }
    }

    #[test]
    fn page_beyond_end_is_clamped() {
        let p = Pagination::new(9, 23);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.current, 3);
        assert_eq!(p.offset(), 20);
        assert!(p.has_prev());
        assert!(!p.has_next());
    }

    #[test]
    fn empty_result_stays_on_page_one() {
        let p = Pagination::new(4, 0);
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.current, 1);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.pages().count(), 0);
    }

    #[test]
    fn page_list_covers_all_pages() {
        let p = Pagination::new(2, 30);
        assert_eq!(p.pages().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(p.prev(), 1);
        assert_eq!(p.next(), 3);
    }

    proptest! {
        #[test]
        fn clamped_page_is_always_in_range(requested in 0u32..1000, total in 0u64..500) {
            let p = Pagination::new(requested, total);
            prop_assert!(p.current >= 1);
            if p.total_pages > 0 {
                prop_assert!(p.current <= p.total_pages);
                prop_assert!((p.offset() as u64) < total);
            }
        }
    }
}
