//! Out-of-band administrator bootstrap.
//!
//! Registration can only create regular accounts; the first administrator is
//! seeded with this binary. Idempotent: skips when the admin email already
//! exists.

use anyhow::Context;
use sqlx::PgPool;

use quill_storage::{init_schema, AccountStore, NewAccount, PgAccountStore};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@example.com";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    quill_observability::init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "123456".to_string());

    let pool = PgPool::connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;
    init_schema(&pool).await.context("failed to apply schema")?;

    let accounts = PgAccountStore::new(pool);

    if accounts.find_by_email(ADMIN_EMAIL).await?.is_some() {
        tracing::info!(email = ADMIN_EMAIL, "admin account already exists, skipping");
        return Ok(());
    }

    let password_hash = quill_auth::hash_password(&password)?;
    let admin = accounts
        .insert(NewAccount {
            username: ADMIN_USERNAME.to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash,
            is_admin: true,
        })
        .await?;

    tracing::info!(account_id = %admin.id, email = ADMIN_EMAIL, "admin account created");
    Ok(())
}
