//! `quill-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod account;
pub mod error;
pub mod id;
pub mod post;
pub mod validate;

pub use account::Account;
pub use error::DomainError;
pub use id::{AccountId, PostId};
pub use post::Post;
pub use validate::Violation;
