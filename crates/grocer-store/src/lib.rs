//! # Grocer Store
//!
//! In-process record stores for the grocer storefront. Each record type (categories,
//! products, orders, offers, service areas) lives in its own [`RecordStore`]: a Tokio task
//! that owns the records and serves requests from a channel one at a time.
//!
//! ## Layers
//!
//! 1. **Record** ([`Record`]): the domain type plus its payloads (draft, patch, filter,
//!    action) and lifecycle hooks.
//! 2. **Store** ([`RecordStore`]): the request loop, id assignment, uniqueness checks.
//! 3. **Client** ([`StoreClient`], [`RecordClient`]): the cloneable async handle and the
//!    trait domain clients implement to get `get`/`list`/`delete`.
//!
//! ## Context Injection
//!
//! Stores are created first and wired when started: [`RecordStore::run`] takes the
//! record's `Context` (for example the product client an order uses to reserve stock).
//! As long as the dependency graph is acyclic, dropping the clients shuts every store down.
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers a real [`StoreClient`] from scripted expectations.

pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod store;
pub mod tracing;

pub use client::StoreClient;
pub use client_trait::RecordClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
pub use record::Record;
pub use store::RecordStore;
