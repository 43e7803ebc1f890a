//! Postgres-backed stores.
//!
//! Uses a shared `sqlx` connection pool; every operation is a single query
//! (updates re-fetch the joined row, making it two). Unique-constraint
//! violations are mapped back to [`StoreError::Conflict`] so the application
//! pre-checks stay advisory.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use quill_core::{Account, AccountId, Post, PostId};

use crate::account_store::{AccountStore, NewAccount};
use crate::error::{StoreError, UniqueField};
use crate::post_store::{AuthorSummary, NewPost, PostStore, PostUpdate, PostWithAuthor};

const SCHEMA_SQL: &str = include_str!("../migrations/0001_init.sql");

/// Create the schema if it does not exist. Used by `seed_admin` and
/// deployments; idempotent.
pub async fn init_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;
    Ok(())
}

fn map_unique_violation(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        // 23505: unique_violation, 23503: foreign_key_violation
        match db.code().as_deref() {
            Some("23505") => {
                let field = match db.constraint() {
                    Some("accounts_email_key") => UniqueField::Email,
                    _ => UniqueField::Username,
                };
                return StoreError::Conflict(field);
            }
            Some("23503") => return StoreError::ForeignKey,
            _ => {}
        }
    }
    StoreError::Database(err)
}

fn account_from_row(row: &PgRow) -> Result<Account, sqlx::Error> {
    Ok(Account {
        id: AccountId::from_uuid(row.try_get("id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        is_admin: row.try_get("is_admin")?,
        created_at: row.try_get("created_at")?,
    })
}

fn post_from_row(row: &PgRow) -> Result<PostWithAuthor, sqlx::Error> {
    let author_id = AccountId::from_uuid(row.try_get("author_id")?);
    Ok(PostWithAuthor {
        post: Post {
            id: PostId::from_uuid(row.try_get("id")?),
            title: row.try_get("title")?,
            content: row.try_get("content")?,
            author_id,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        },
        author: AuthorSummary {
            id: author_id,
            username: row.try_get("author_username")?,
        },
    })
}

const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash, is_admin, created_at";

const POST_SELECT: &str = r#"
SELECT
    p.id,
    p.title,
    p.content,
    p.author_id,
    p.created_at,
    p.updated_at,
    a.username AS author_username
FROM posts p
JOIN accounts a ON a.id = p.author_id
"#;

/// Postgres-backed [`AccountStore`].
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by(&self, column: &str, value: &str) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = $1");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| account_from_row(&r)).transpose().map_err(Into::into)
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, new: NewAccount) -> Result<Account, StoreError> {
        let id = AccountId::new();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, email, password_hash, is_admin, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(new.is_admin)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(Account {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            is_admin: new.is_admin,
            created_at,
        })
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, StoreError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| account_from_row(&r)).transpose().map_err(Into::into)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, StoreError> {
        self.find_by("LOWER(email)", &email.to_lowercase()).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        self.find_by("username", username).await
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let sql =
            format!("SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter()
            .map(account_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn set_role(
        &self,
        id: AccountId,
        is_admin: bool,
    ) -> Result<Option<Account>, StoreError> {
        let result = sqlx::query("UPDATE accounts SET is_admin = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(is_admin)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}

/// Postgres-backed [`PostStore`].
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: PostId) -> Result<Option<PostWithAuthor>, StoreError> {
        let sql = format!("{POST_SELECT} WHERE p.id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| post_from_row(&r)).transpose().map_err(Into::into)
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, new: NewPost) -> Result<PostWithAuthor, StoreError> {
        let id = PostId::new();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(id.as_uuid())
        .bind(&new.title)
        .bind(&new.content)
        .bind(new.author_id.as_uuid())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        self.fetch(id).await?.ok_or(StoreError::ForeignKey)
    }

    async fn get(&self, id: PostId) -> Result<Option<PostWithAuthor>, StoreError> {
        self.fetch(id).await
    }

    async fn list(&self) -> Result<Vec<PostWithAuthor>, StoreError> {
        let sql = format!("{POST_SELECT} ORDER BY p.created_at DESC, p.id DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter()
            .map(post_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn update(
        &self,
        id: PostId,
        changes: PostUpdate,
    ) -> Result<Option<PostWithAuthor>, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(changes.title)
        .bind(changes.content)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.fetch(id).await
    }

    async fn delete(&self, id: PostId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
