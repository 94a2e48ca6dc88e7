//! PostgreSQL implementations of ReviewRepository and TastingNoteRepository.

use crate::domain::cellar::{Review, TastingNote};
use crate::domain::foundation::{
    DomainError, ErrorCode, ReviewId, TastingNoteId, Timestamp, WineId,
};
use crate::ports::{ReviewRepository, TastingNoteRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ReviewRow {
    id: Uuid,
    wine_id: Uuid,
    reviewer: String,
    date: String,
    rating: String,
    content: String,
    link: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: ReviewId::from_uuid(row.id),
            wine_id: WineId::from_uuid(row.wine_id),
            reviewer: row.reviewer,
            date: row.date,
            rating: row.rating,
            content: row.content,
            link: row.link,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct TastingNoteRow {
    id: Uuid,
    wine_id: Uuid,
    date: String,
    note: String,
    created_at: DateTime<Utc>,
}

impl From<TastingNoteRow> for TastingNote {
    fn from(row: TastingNoteRow) -> Self {
        TastingNote {
            id: TastingNoteId::from_uuid(row.id),
            wine_id: WineId::from_uuid(row.wine_id),
            date: row.date,
            note: row.note,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn create(&self, review: &Review) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, wine_id, reviewer, date, rating, content, link, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(review.wine_id.as_uuid())
        .bind(&review.reviewer)
        .bind(&review.date)
        .bind(&review.rating)
        .bind(&review.content)
        .bind(&review.link)
        .bind(review.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("save review", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError> {
        let row: Option<ReviewRow> = sqlx::query_as(
            "SELECT id, wine_id, reviewer, date, rating, content, link, created_at \
             FROM reviews WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("load review", e))?;
        Ok(row.map(Review::from))
    }

    async fn update(&self, review: &Review) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE reviews SET reviewer = $2, date = $3, rating = $4, content = $5, link = $6
            WHERE id = $1
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(&review.reviewer)
        .bind(&review.date)
        .bind(&review.rating)
        .bind(&review.content)
        .bind(&review.link)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update review", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ReviewNotFound, "Review not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete review", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ReviewNotFound, "Review not found"));
        }
        Ok(())
    }
}

pub struct PostgresTastingNoteRepository {
    pool: PgPool,
}

impl PostgresTastingNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TastingNoteRepository for PostgresTastingNoteRepository {
    async fn create(&self, note: &TastingNote) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO tasting_notes (id, wine_id, date, note, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(note.id.as_uuid())
        .bind(note.wine_id.as_uuid())
        .bind(&note.date)
        .bind(&note.note)
        .bind(note.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("save tasting note", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &TastingNoteId) -> Result<Option<TastingNote>, DomainError> {
        let row: Option<TastingNoteRow> = sqlx::query_as(
            "SELECT id, wine_id, date, note, created_at FROM tasting_notes WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("load tasting note", e))?;
        Ok(row.map(TastingNote::from))
    }

    async fn delete(&self, id: &TastingNoteId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM tasting_notes WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("delete tasting note", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::TastingNoteNotFound,
                "Tasting note not found",
            ));
        }
        Ok(())
    }
}
