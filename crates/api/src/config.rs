//! Process-wide configuration.
//!
//! Read from the environment once at startup and injected into `build_app`;
//! nothing reads ambient globals afterwards, which keeps tests free to
//! substitute secrets and stores.

/// Runtime configuration for the API process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: String,
    /// When true, use the Postgres stores instead of the in-memory ones.
    pub use_persistent_stores: bool,
    /// Postgres connection string (required with persistent stores).
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("QUILL_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("QUILL_JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let bind_addr =
            std::env::var("QUILL_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let use_persistent_stores = std::env::var("USE_PERSISTENT_STORES")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        Self {
            bind_addr,
            jwt_secret,
            use_persistent_stores,
            database_url: std::env::var("DATABASE_URL").ok(),
        }
    }
}
