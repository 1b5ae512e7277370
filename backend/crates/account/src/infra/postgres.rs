//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{TokenDigest, UserName, UserPassword};
use crate::error::{AccountError, AccountResult};

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_USER: &str = r#"
    SELECT
        user_id,
        user_name,
        password_hash,
        token_digest,
        coins,
        tokens,
        created_at,
        last_heartbeat_at,
        active_since
    FROM users
"#;

impl UserRepository for PgAccountRepository {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                password_hash,
                token_digest,
                coins,
                tokens,
                created_at,
                last_heartbeat_at,
                active_since
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.token_digest.as_bytes().as_slice())
        .bind(user.coins)
        .bind(user.tokens)
        .bind(user.created_at)
        .bind(user.last_heartbeat_at)
        .bind(user.active_since)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            // Lost a registration race on the unique user_name
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AccountError::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name = $1)",
        )
        .bind(user_name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE user_name = $1"))
            .bind(user_name.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_token_digest(&self, digest: &TokenDigest) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE token_digest = $1"))
            .bind(digest.as_bytes().as_slice())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update_token_digest(
        &self,
        user_name: &UserName,
        digest: &TokenDigest,
    ) -> AccountResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE users SET
                token_digest = $2,
                last_heartbeat_at = NOW()
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .bind(digest.as_bytes().as_slice())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(AccountError::UserNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    password_hash: String,
    token_digest: Vec<u8>,
    coins: i64,
    tokens: i64,
    created_at: DateTime<Utc>,
    last_heartbeat_at: DateTime<Utc>,
    active_since: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountResult<User> {
        let token_digest = TokenDigest::from_slice(&self.token_digest)
            .ok_or_else(|| AccountError::Internal("Invalid token digest in database".to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.user_name),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            token_digest,
            coins: self.coins,
            tokens: self.tokens,
            created_at: self.created_at,
            last_heartbeat_at: self.last_heartbeat_at,
            active_since: self.active_since,
        })
    }
}
