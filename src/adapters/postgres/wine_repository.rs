//! PostgreSQL implementation of WineRepository.

use crate::domain::cellar::Wine;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, WineId};
use crate::ports::WineRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub(crate) const WINE_COLUMNS: &str = "wines.id, wines.user_id, wines.name, wines.producer, \
     wines.vintage, wines.is_non_vintage, wines.grape, wines.country, wines.region, \
     wines.quantity, wines.price, wines.abv, wines.location, wines.rating, \
     wines.drinking_window, wines.notes, wines.image_url, wines.wine_type, wines.category, \
     wines.sub_category, wines.bottle_size, wines.created_at, wines.updated_at";

pub struct PostgresWineRepository {
    pool: PgPool,
}

impl PostgresWineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a wine.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct WineRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    producer: String,
    vintage: i32,
    is_non_vintage: bool,
    grape: String,
    country: String,
    region: String,
    quantity: i32,
    price: f64,
    abv: f64,
    location: String,
    rating: String,
    drinking_window: String,
    notes: String,
    image_url: String,
    wine_type: String,
    category: String,
    sub_category: String,
    bottle_size: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WineRow> for Wine {
    fn from(row: WineRow) -> Self {
        Wine {
            id: WineId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            name: row.name,
            producer: row.producer,
            vintage: row.vintage,
            is_non_vintage: row.is_non_vintage,
            grape: row.grape,
            country: row.country,
            region: row.region,
            quantity: row.quantity,
            price: row.price,
            abv: row.abv,
            location: row.location,
            rating: row.rating,
            drinking_window: row.drinking_window,
            notes: row.notes,
            image_url: row.image_url,
            wine_type: row.wine_type,
            category: row.category,
            sub_category: row.sub_category,
            bottle_size: row.bottle_size,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

pub(crate) fn wine_not_found() -> DomainError {
    DomainError::new(ErrorCode::WineNotFound, "Wine not found")
}

#[async_trait]
impl WineRepository for PostgresWineRepository {
    async fn create(&self, wine: &Wine) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO wines (
                id, user_id, name, producer, vintage, is_non_vintage, grape, country,
                region, quantity, price, abv, location, rating, drinking_window, notes,
                image_url, wine_type, category, sub_category, bottle_size,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23
            )
            "#,
        )
        .bind(wine.id.as_uuid())
        .bind(wine.user_id.as_uuid())
        .bind(&wine.name)
        .bind(&wine.producer)
        .bind(wine.vintage)
        .bind(wine.is_non_vintage)
        .bind(&wine.grape)
        .bind(&wine.country)
        .bind(&wine.region)
        .bind(wine.quantity)
        .bind(wine.price)
        .bind(wine.abv)
        .bind(&wine.location)
        .bind(&wine.rating)
        .bind(&wine.drinking_window)
        .bind(&wine.notes)
        .bind(&wine.image_url)
        .bind(&wine.wine_type)
        .bind(&wine.category)
        .bind(&wine.sub_category)
        .bind(&wine.bottle_size)
        .bind(wine.created_at.as_datetime())
        .bind(wine.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("save wine", e))?;

        Ok(())
    }

    async fn update(&self, wine: &Wine) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE wines SET
                name = $3, producer = $4, vintage = $5, is_non_vintage = $6,
                grape = $7, country = $8, region = $9, quantity = $10, price = $11,
                abv = $12, location = $13, rating = $14, drinking_window = $15,
                notes = $16, image_url = $17, wine_type = $18, category = $19,
                sub_category = $20, bottle_size = $21, updated_at = $22
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(wine.id.as_uuid())
        .bind(wine.user_id.as_uuid())
        .bind(&wine.name)
        .bind(&wine.producer)
        .bind(wine.vintage)
        .bind(wine.is_non_vintage)
        .bind(&wine.grape)
        .bind(&wine.country)
        .bind(&wine.region)
        .bind(wine.quantity)
        .bind(wine.price)
        .bind(wine.abv)
        .bind(&wine.location)
        .bind(&wine.rating)
        .bind(&wine.drinking_window)
        .bind(&wine.notes)
        .bind(&wine.image_url)
        .bind(&wine.wine_type)
        .bind(&wine.category)
        .bind(&wine.sub_category)
        .bind(&wine.bottle_size)
        .bind(wine.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update wine", e))?;

        if result.rows_affected() == 0 {
            return Err(wine_not_found());
        }
        Ok(())
    }

    async fn find_owned(&self, id: &WineId, user_id: &UserId) -> Result<Option<Wine>, DomainError> {
        let sql = format!(
            "SELECT {} FROM wines WHERE wines.id = $1 AND wines.user_id = $2",
            WINE_COLUMNS
        );
        let row: Option<WineRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("load wine", e))?;
        Ok(row.map(Wine::from))
    }

    async fn count_for_user(&self, user_id: &UserId) -> Result<u32, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM wines WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("count wines", e))?;
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn set_quantity(
        &self,
        id: &WineId,
        user_id: &UserId,
        quantity: i32,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE wines SET quantity = $3, updated_at = NOW() WHERE id = $1 AND user_id = $2",
        )
        .bind(id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(quantity.max(0))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update quantity", e))?;

        if result.rows_affected() == 0 {
            return Err(wine_not_found());
        }
        Ok(())
    }

    async fn delete_owned(&self, id: &WineId, user_id: &UserId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin transaction", e))?;

        for (table, operation) in [("reviews", "delete reviews"), ("tasting_notes", "delete tasting notes")] {
            let sql = format!(
                "DELETE FROM {} WHERE wine_id IN (SELECT id FROM wines WHERE id = $1 AND user_id = $2)",
                table
            );
            sqlx::query(&sql)
                .bind(id.as_uuid())
                .bind(user_id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::database(operation, e))?;
        }

        let result = sqlx::query("DELETE FROM wines WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("delete wine", e))?;

        if result.rows_affected() == 0 {
            return Err(wine_not_found());
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("commit wine deletion", e))?;
        Ok(())
    }

    async fn has_any(&self) -> Result<bool, DomainError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM wines)")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("check wines", e))?;
        Ok(exists)
    }
}
