//! Store wiring.
//!
//! In-memory stores by default (dev/test); Postgres when
//! `USE_PERSISTENT_STORES=true`. Handlers only ever see the trait objects.

use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use quill_storage::{
    init_schema, AccountStore, InMemoryAccountStore, InMemoryPostStore, MemoryState,
    PgAccountStore, PgPostStore, PostStore,
};

use crate::config::AppConfig;

/// The stores a request handler can reach.
pub struct AppServices {
    pub accounts: Arc<dyn AccountStore>,
    pub posts: Arc<dyn PostStore>,
}

impl AppServices {
    pub fn in_memory() -> Self {
        let state = MemoryState::new();
        Self {
            accounts: Arc::new(InMemoryAccountStore::new(state.clone())),
            posts: Arc::new(InMemoryPostStore::new(state)),
        }
    }

    pub async fn postgres(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("failed to connect to Postgres")?;
        init_schema(&pool).await.context("failed to apply schema")?;

        Ok(Self {
            accounts: Arc::new(PgAccountStore::new(pool.clone())),
            posts: Arc::new(PgPostStore::new(pool)),
        })
    }
}

pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    if config.use_persistent_stores {
        let url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;
        AppServices::postgres(url).await
    } else {
        Ok(AppServices::in_memory())
    }
}
