//! # Record Trait
//!
//! A [`Record`] is anything a [`RecordStore`](crate::RecordStore) can own: a category, a
//! product, an order. The trait names the payload types used for each request (draft,
//! patch, filter, action) so the store loop is written once and a `ProductDraft` can never
//! be sent to the category store.
//!
//! # Provided Methods (Hooks)
//! Lifecycle hooks with default implementations:
//! - [`Record::on_create`]
//! - [`Record::on_delete`]
//! - [`Record::unique_key`]
//!
//! Override them only when the record needs validation against other stores or a
//! store-wide uniqueness constraint.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Contract for a record type managed by a [`RecordStore`](crate::RecordStore).
///
/// # Async & Context
/// Hooks are async so they can call other stores (an order reserving product stock).
/// The `Context` associated type carries those dependencies; it is handed to
/// [`RecordStore::run`](crate::RecordStore::run) rather than to the constructor, so stores
/// can be created first and wired afterwards.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier. Ordered, so listings come back in creation order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload for creating a record.
    type Draft: Send + Sync + Debug;

    /// Payload for a partial update.
    type Patch: Send + Sync + Debug;

    /// Selection criteria for `List` requests.
    type Filter: Send + Sync + Debug;

    /// Record-specific operations beyond CRUD (e.g. reserving stock).
    type Action: Send + Sync + Debug;

    /// Result of an [`Action`](Record::Action).
    type Outcome: Send + Sync + Debug;

    /// Dependencies injected at `run()`. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per record type, shared by every request.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its store-assigned id and the draft.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Result<Self, Self::Error>;

    /// Whether this record is selected by `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Store-wide unique key (a slug, a code). Two records with equal keys are rejected.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Runs after `from_draft`, before the record is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies a patch in place.
    async fn on_update(&mut self, patch: Self::Patch, ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Runs before the record is removed. An error keeps the record.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::Outcome, Self::Error>;
}
