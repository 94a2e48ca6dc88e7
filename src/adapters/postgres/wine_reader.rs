//! PostgreSQL implementation of WineReader.
//!
//! The list query is assembled with `sqlx::QueryBuilder`. User input only
//! ever reaches the SQL as bind parameters; the ORDER BY column comes from
//! the `SortField` allow-list.

use std::collections::HashMap;

use crate::domain::cellar::{
    FilterOptions, Pagination, Review, TastingNote, VintageFilter, Wine, WineDetails,
    WineListQuery, WinePage,
};
use crate::domain::foundation::{DomainError, UserId, WineId};
use crate::ports::{ExportRow, WineReader};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::review_repository::{ReviewRow, TastingNoteRow};
use super::wine_repository::{WineRow, WINE_COLUMNS};

/// Text columns matched by the keyword search.
const SEARCH_COLUMNS: [&str; 7] = [
    "wines.name",
    "wines.producer",
    "wines.region",
    "wines.category",
    "reviews.content",
    "reviews.reviewer",
    "tasting_notes.note",
];

pub struct PostgresWineReader {
    pool: PgPool,
}

impl PostgresWineReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn distinct_text(&self, user_id: &UserId, column: &str) -> Result<Vec<String>, DomainError> {
        let sql = format!(
            "SELECT DISTINCT {col} FROM wines WHERE user_id = $1 AND {col} <> '' ORDER BY {col}",
            col = column
        );
        let rows: Vec<(String,)> = sqlx::query_as(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("load filter options", e))?;
        Ok(rows.into_iter().map(|(v,)| v).collect())
    }
}

/// Appends `FROM ... WHERE ...` for the user's wines, with the search joins
/// and filter predicates the query asks for.
fn push_scope(qb: &mut QueryBuilder<'_, Postgres>, user_id: Uuid, query: &WineListQuery) {
    qb.push(" FROM wines");
    if query.search.is_some() {
        qb.push(" LEFT JOIN reviews ON reviews.wine_id = wines.id");
        qb.push(" LEFT JOIN tasting_notes ON tasting_notes.wine_id = wines.id");
    }

    qb.push(" WHERE wines.user_id = ");
    qb.push_bind(user_id);

    if let Some(pattern) = query.search_pattern() {
        qb.push(" AND (");
        for (i, column) in SEARCH_COLUMNS.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(format!("LOWER({}) LIKE ", column));
            qb.push_bind(pattern.clone());
        }
        qb.push(")");
    }

    let filters = &query.filters;
    for (column, value) in [
        ("wines.category", &filters.category),
        ("wines.country", &filters.country),
        ("wines.region", &filters.region),
        ("wines.producer", &filters.producer),
    ] {
        if let Some(value) = value {
            qb.push(format!(" AND {} = ", column));
            qb.push_bind(value.clone());
        }
    }

    match filters.vintage {
        Some(VintageFilter::NonVintage) => {
            qb.push(" AND wines.is_non_vintage = TRUE");
        }
        Some(VintageFilter::Year(year)) => {
            qb.push(" AND wines.vintage = ");
            qb.push_bind(year);
        }
        None => {}
    }
}

fn push_order(qb: &mut QueryBuilder<'_, Postgres>, query: &WineListQuery) {
    qb.push(format!(
        " ORDER BY wines.{} {}, wines.id",
        query.sort.as_str(),
        query.direction.as_sql()
    ));
}

fn push_page(qb: &mut QueryBuilder<'_, Postgres>, pagination: &Pagination) {
    qb.push(" LIMIT ");
    qb.push_bind(pagination.limit());
    qb.push(" OFFSET ");
    qb.push_bind(pagination.offset());
}

#[async_trait]
impl WineReader for PostgresWineReader {
    async fn list(&self, user_id: &UserId, query: &WineListQuery) -> Result<WinePage, DomainError> {
        let user = *user_id.as_uuid();
        let searching = query.search.is_some();

        let mut count_qb = QueryBuilder::new(if searching {
            "SELECT COUNT(DISTINCT wines.id)"
        } else {
            "SELECT COUNT(*)"
        });
        push_scope(&mut count_qb, user, query);
        let (total,): (i64,) = count_qb
            .build_query_as()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("count wines", e))?;

        let pagination = Pagination::new(query.page, total.max(0) as u64);

        if !searching {
            let mut qb = QueryBuilder::new(format!("SELECT {}", WINE_COLUMNS));
            push_scope(&mut qb, user, query);
            push_order(&mut qb, query);
            push_page(&mut qb, &pagination);
            let rows: Vec<WineRow> = qb
                .build_query_as()
                .fetch_all(&self.pool)
                .await
                .map_err(|e| DomainError::database("list wines", e))?;
            return Ok(WinePage {
                wines: rows.into_iter().map(Wine::from).collect(),
                pagination,
            });
        }

        // The joins can repeat a wine, so page over distinct ids first.
        let sort_column = format!("wines.{}", query.sort.as_str());
        let mut ids_qb = QueryBuilder::new(format!("SELECT wines.id, {}", sort_column));
        push_scope(&mut ids_qb, user, query);
        ids_qb.push(format!(" GROUP BY wines.id, {}", sort_column));
        push_order(&mut ids_qb, query);
        push_page(&mut ids_qb, &pagination);
        let ids: Vec<Uuid> = ids_qb
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("search wines", e))?;

        if ids.is_empty() {
            return Ok(WinePage {
                wines: Vec::new(),
                pagination,
            });
        }

        let sql = format!("SELECT {} FROM wines WHERE wines.id = ANY($1)", WINE_COLUMNS);
        let rows: Vec<WineRow> = sqlx::query_as(&sql)
            .bind(&ids[..])
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("load wines", e))?;

        let mut by_id: HashMap<Uuid, Wine> = rows
            .into_iter()
            .map(Wine::from)
            .map(|wine| (*wine.id.as_uuid(), wine))
            .collect();
        let wines = ids.iter().filter_map(|id| by_id.remove(id)).collect();

        Ok(WinePage { wines, pagination })
    }

    async fn filter_options(&self, user_id: &UserId) -> Result<FilterOptions, DomainError> {
        let vintages: Vec<(i32,)> = sqlx::query_as(
            "SELECT DISTINCT vintage FROM wines WHERE user_id = $1 AND vintage > 0 ORDER BY vintage DESC",
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("load vintages", e))?;

        let (has_nv,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM wines WHERE user_id = $1 AND is_non_vintage)",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("check non-vintage wines", e))?;

        Ok(FilterOptions {
            categories: self.distinct_text(user_id, "category").await?,
            countries: self.distinct_text(user_id, "country").await?,
            regions: self.distinct_text(user_id, "region").await?,
            producers: self.distinct_text(user_id, "producer").await?,
            vintages: vintages.into_iter().map(|(v,)| v).collect(),
            has_nv,
        })
    }

    async fn details(
        &self,
        user_id: &UserId,
        wine_id: &WineId,
    ) -> Result<Option<WineDetails>, DomainError> {
        let sql = format!(
            "SELECT {} FROM wines WHERE wines.id = $1 AND wines.user_id = $2",
            WINE_COLUMNS
        );
        let wine: Option<WineRow> = sqlx::query_as(&sql)
            .bind(wine_id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("load wine", e))?;

        let Some(wine) = wine else {
            return Ok(None);
        };

        let reviews: Vec<ReviewRow> = sqlx::query_as(
            "SELECT id, wine_id, reviewer, date, rating, content, link, created_at \
             FROM reviews WHERE wine_id = $1 ORDER BY created_at DESC",
        )
        .bind(wine_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("load reviews", e))?;

        let notes: Vec<TastingNoteRow> = sqlx::query_as(
            "SELECT id, wine_id, date, note, created_at \
             FROM tasting_notes WHERE wine_id = $1 ORDER BY date DESC, created_at DESC",
        )
        .bind(wine_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("load tasting notes", e))?;

        Ok(Some(WineDetails {
            wine: Wine::from(wine),
            reviews: reviews.into_iter().map(Review::from).collect(),
            tasting_notes: notes.into_iter().map(TastingNote::from).collect(),
        }))
    }

    async fn export_rows(&self, user_id: &UserId) -> Result<Vec<ExportRow>, DomainError> {
        let sql = format!(
            "SELECT {} FROM wines WHERE wines.user_id = $1 ORDER BY wines.name, wines.id",
            WINE_COLUMNS
        );
        let rows: Vec<WineRow> = sqlx::query_as(&sql)
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("export wines", e))?;

        Ok(rows
            .into_iter()
            .map(Wine::from)
            .map(|w| ExportRow {
                name: w.name,
                producer: w.producer,
                vintage: w.vintage,
                is_non_vintage: w.is_non_vintage,
                grape: w.grape,
                country: w.country,
                region: w.region,
                quantity: w.quantity,
                price: w.price,
                location: w.location,
                rating: w.rating,
                notes: w.notes,
            })
            .collect())
    }
}
