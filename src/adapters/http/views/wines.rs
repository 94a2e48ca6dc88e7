//! Cellar list, details and the add/edit form.

use handlebars::RenderError;
use serde_json::{json, Value};

use crate::domain::account::User;
use crate::domain::cellar::{
    page_url, sort_url, FilterOptions, SortDirection, SortField, VintageFilter, Wine,
    WineDetails, WineListQuery, WinePage, DEFAULT_BOTTLE_SIZE,
};

use super::{options, Nav, Views};

const SORTABLE: [(SortField, &str); 6] = [
    (SortField::Name, "Name"),
    (SortField::Producer, "Producer"),
    (SortField::Vintage, "Vintage"),
    (SortField::Region, "Region"),
    (SortField::Category, "Category"),
    (SortField::Quantity, "Qty"),
];

fn price(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

/// Which form to render.
#[derive(Debug, Clone, Copy)]
pub enum WineFormMode<'a> {
    Add { limit_reached: bool },
    Edit(&'a Wine),
}

impl Views {
    /// `params` are the raw query pairs, reused to build sort and page links.
    pub fn list_page(
        &self,
        user: &User,
        csrf_token: &str,
        query: &WineListQuery,
        page: &WinePage,
        filters: Option<&FilterOptions>,
        params: &[(String, String)],
    ) -> Result<String, RenderError> {
        let currency = user.currency.as_str();
        let wines: Vec<Value> = page
            .wines
            .iter()
            .map(|wine| {
                json!({
                    "id": wine.id.to_string(),
                    "name": wine.name,
                    "producer": wine.producer,
                    "vintage": wine.vintage_label(),
                    "region": wine.region,
                    "category": wine.category,
                    "quantity": wine.quantity,
                    "price": price(wine.price, currency),
                })
            })
            .collect();

        let columns: Vec<Value> = SORTABLE
            .iter()
            .map(|&(field, label)| {
                let marker = match (query.sort == field, query.direction) {
                    (true, SortDirection::Asc) => " ▲",
                    (true, SortDirection::Desc) => " ▼",
                    (false, _) => "",
                };
                json!({
                    "label": label,
                    "marker": marker,
                    "url": sort_url(params, field, query.sort, query.direction),
                })
            })
            .collect();

        self.page(
            "wine_list",
            "My cellar",
            Nav::signed_in(user),
            csrf_token,
            json!({
                "filters": filters.map(|f| filter_options(query, f)),
                "search": query.search.as_deref().unwrap_or(""),
                "sort": query.sort.as_str(),
                "direction": query.direction.as_str(),
                "columns": columns,
                "wines": wines,
                "pagination": pagination(page, params),
            }),
        )
    }

    pub fn details_page(
        &self,
        user: &User,
        csrf_token: &str,
        details: &WineDetails,
    ) -> Result<String, RenderError> {
        let wine = &details.wine;
        let facts = [
            ("Grape", wine.grape.clone()),
            ("Country", wine.country.clone()),
            ("Region", wine.region.clone()),
            ("Type", wine.wine_type.clone()),
            ("Category", wine.category.clone()),
            ("Sub-category", wine.sub_category.clone()),
            ("Bottle size", wine.bottle_size.clone()),
            ("ABV", format!("{:.1}%", wine.abv)),
            ("Quantity", wine.quantity.to_string()),
            ("Price", price(wine.price, user.currency.as_str())),
            ("Location", wine.location.clone()),
            ("Rating", wine.rating.clone()),
            ("Drinking window", wine.drinking_window.clone()),
        ]
        .into_iter()
        .map(|(label, value)| json!({ "label": label, "value": value }))
        .collect::<Vec<_>>();

        let reviews: Vec<Value> = details
            .reviews
            .iter()
            .map(|review| {
                json!({
                    "id": review.id.to_string(),
                    "reviewer": review.reviewer,
                    "date": review.date,
                    "rating": review.rating,
                    "content": review.content,
                    "link": review.link,
                })
            })
            .collect();

        let tasting_notes: Vec<Value> = details
            .tasting_notes
            .iter()
            .map(|note| json!({ "id": note.id.to_string(), "date": note.date, "note": note.note }))
            .collect();

        self.page(
            "wine_details",
            &wine.name,
            Nav::signed_in(user),
            csrf_token,
            json!({
                "wine": {
                    "id": wine.id.to_string(),
                    "name": wine.name,
                    "producer": wine.producer,
                    "vintage": wine.vintage_label(),
                    "image_url": wine.image_url,
                    "notes": wine.notes,
                },
                "facts": facts,
                "is_pro": user.is_pro(),
                "reviews": reviews,
                "tasting_notes": tasting_notes,
            }),
        )
    }

    pub fn wine_form_page(
        &self,
        user: &User,
        csrf_token: &str,
        mode: WineFormMode<'_>,
    ) -> Result<String, RenderError> {
        let (title, data) = match mode {
            WineFormMode::Add { limit_reached } => (
                "Add wine",
                json!({
                    "limit_reached": limit_reached,
                    "action": "/add",
                    "wine": { "quantity": 1 },
                }),
            ),
            WineFormMode::Edit(wine) => (
                "Edit wine",
                json!({
                    "limit_reached": false,
                    "action": format!("/edit/{}", wine.id),
                    "wine": form_values(wine),
                }),
            ),
        };

        let mut data = data;
        if let Value::Object(fields) = &mut data {
            fields.insert("title".to_string(), Value::from(title));
            fields.insert("default_bottle_size".to_string(), Value::from(DEFAULT_BOTTLE_SIZE));
        }

        self.page("wine_form", title, Nav::signed_in(user), csrf_token, data)
    }
}

fn filter_options(query: &WineListQuery, filters: &FilterOptions) -> Value {
    let current = |value: &Option<String>| value.clone().unwrap_or_default();
    let vintage = match query.filters.vintage {
        Some(VintageFilter::NonVintage) => "NV".to_string(),
        Some(VintageFilter::Year(year)) => year.to_string(),
        None => String::new(),
    };
    let mut vintages: Vec<String> = filters.vintages.iter().map(|v| v.to_string()).collect();
    if filters.has_nv {
        vintages.push("NV".to_string());
    }

    json!({
        "categories": options(filters.categories.iter().map(String::as_str), &current(&query.filters.category)),
        "countries": options(filters.countries.iter().map(String::as_str), &current(&query.filters.country)),
        "regions": options(filters.regions.iter().map(String::as_str), &current(&query.filters.region)),
        "producers": options(filters.producers.iter().map(String::as_str), &current(&query.filters.producer)),
        "vintages": options(vintages.iter().map(String::as_str), &vintage),
    })
}

/// `null` when everything fits on one page.
fn pagination(page: &WinePage, params: &[(String, String)]) -> Value {
    let p = &page.pagination;
    if p.total_pages <= 1 {
        return Value::Null;
    }

    let pages: Vec<Value> = p
        .pages()
        .map(|n| json!({ "number": n, "current": n == p.current, "url": page_url(params, n) }))
        .collect();

    json!({
        "prev": p.has_prev().then(|| page_url(params, p.prev())),
        "next": p.has_next().then(|| page_url(params, p.next())),
        "pages": pages,
    })
}

fn form_values(wine: &Wine) -> Value {
    let vintage = if !wine.is_non_vintage && wine.vintage > 0 {
        wine.vintage.to_string()
    } else {
        String::new()
    };

    json!({
        "name": wine.name,
        "producer": wine.producer,
        "vintage": vintage,
        "is_non_vintage": wine.is_non_vintage,
        "grape": wine.grape,
        "country": wine.country,
        "region": wine.region,
        "wine_type": wine.wine_type,
        "category": wine.category,
        "sub_category": wine.sub_category,
        "bottle_size": wine.bottle_size,
        "quantity": wine.quantity,
        "price": format!("{:.2}", wine.price),
        "abv": format!("{:.1}", wine.abv),
        "location": wine.location,
        "rating": wine.rating,
        "drinking_window": wine.drinking_window,
        "notes": wine.notes,
    })
}
