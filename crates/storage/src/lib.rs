//! `quill-storage` — persistence boundary.
//!
//! Repository traits plus two implementations: an in-memory store for
//! dev/test and a Postgres store over `sqlx` for production. Email and
//! username uniqueness is ultimately arbitrated by the store itself (unique
//! constraints in Postgres, an insert-time check under the write lock in
//! memory); application-level pre-checks are advisory only.

pub mod account_store;
pub mod error;
pub mod memory;
pub mod post_store;
pub mod postgres;

pub use account_store::{AccountStore, NewAccount};
pub use error::{StoreError, UniqueField};
pub use memory::{InMemoryAccountStore, InMemoryPostStore, MemoryState};
pub use post_store::{AuthorSummary, NewPost, PostStore, PostUpdate, PostWithAuthor};
pub use postgres::{init_schema, PgAccountStore, PgPostStore};
