//! PostgreSQL implementation of UserRepository.

use crate::domain::account::{Currency, Email, User};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::subscription::{SubscriptionChange, SubscriptionIdUpdate, SubscriptionTier};
use crate::ports::{SubscriberLookup, UserRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, email, password_hash, currency, subscription_tier, \
     subscription_status, stripe_customer_id, subscription_id, created_at, updated_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("load user", e))?;
        row.map(User::try_from).transpose()
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    currency: String,
    subscription_tier: String,
    subscription_status: Option<String>,
    stripe_customer_id: Option<String>,
    subscription_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_uuid(row.id),
            email: Email::from_trusted(row.email),
            password_hash: row.password_hash,
            currency: Currency::from_stored(&row.currency),
            subscription_tier: parse_tier(&row.subscription_tier)?,
            subscription_status: row.subscription_status,
            stripe_customer_id: row.stripe_customer_id,
            subscription_id: row.subscription_id,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_tier(s: &str) -> Result<SubscriptionTier, DomainError> {
    match s.to_lowercase().as_str() {
        "free" | "" => Ok(SubscriptionTier::Free),
        "pro" => Ok(SubscriptionTier::Pro),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid tier value: {}", s),
        )),
    }
}

fn user_not_found() -> DomainError {
    DomainError::new(ErrorCode::UserNotFound, "User not found")
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, password_hash, currency, subscription_tier,
                subscription_status, stripe_customer_id, subscription_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.currency.as_str())
        .bind(user.subscription_tier.as_str())
        .bind(&user.subscription_status)
        .bind(&user.stripe_customer_id)
        .bind(&user.subscription_id)
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("users_email_key") {
                    return DomainError::new(ErrorCode::EmailTaken, "Email already exists");
                }
            }
            DomainError::database("save user", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("load user", e))?;
        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", &email.trim().to_lowercase()).await
    }

    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<User>, DomainError> {
        self.find_one("stripe_customer_id", customer_id).await
    }

    async fn update_password_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.as_uuid())
                .bind(hash)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::database("update password", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }
        Ok(())
    }

    async fn update_currency(&self, id: &UserId, currency: &Currency) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET currency = $2, updated_at = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .bind(currency.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("update currency", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }
        Ok(())
    }

    async fn update_tier(&self, id: &UserId, tier: SubscriptionTier) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE users SET subscription_tier = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(tier.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("update tier", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }
        Ok(())
    }

    async fn apply_subscription_change(
        &self,
        lookup: &SubscriberLookup,
        change: &SubscriptionChange,
    ) -> Result<Option<UserId>, DomainError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE users SET updated_at = NOW(), subscription_status = ");
        qb.push_bind(change.status.as_str().to_string());

        if let Some(tier) = change.tier {
            qb.push(", subscription_tier = ");
            qb.push_bind(tier.as_str());
        }
        if let Some(customer_id) = &change.stripe_customer_id {
            qb.push(", stripe_customer_id = ");
            qb.push_bind(customer_id.clone());
        }
        match &change.subscription_id {
            SubscriptionIdUpdate::Keep => {}
            SubscriptionIdUpdate::Set(id) => {
                qb.push(", subscription_id = ");
                qb.push_bind(id.clone());
            }
            SubscriptionIdUpdate::Clear => {
                qb.push(", subscription_id = NULL");
            }
        }

        match lookup {
            SubscriberLookup::User(id) => {
                qb.push(" WHERE id = ");
                qb.push_bind(*id.as_uuid());
            }
            SubscriberLookup::StripeCustomer(customer_id) => {
                qb.push(" WHERE stripe_customer_id = ");
                qb.push_bind(customer_id.clone());
            }
        }
        qb.push(" RETURNING id");

        let updated: Option<(Uuid,)> = qb
            .build_query_as()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("update subscription", e))?;

        Ok(updated.map(|(id,)| UserId::from_uuid(id)))
    }

    async fn delete_with_wines(&self, id: &UserId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("begin transaction", e))?;

        sqlx::query(
            "DELETE FROM reviews WHERE wine_id IN (SELECT id FROM wines WHERE user_id = $1)",
        )
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("delete reviews", e))?;

        sqlx::query(
            "DELETE FROM tasting_notes WHERE wine_id IN (SELECT id FROM wines WHERE user_id = $1)",
        )
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database("delete tasting notes", e))?;

        sqlx::query("DELETE FROM wines WHERE user_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("delete wines", e))?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(user_not_found());
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("commit account deletion", e))?;
        Ok(())
    }
}
