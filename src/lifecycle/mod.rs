//! # Storefront Lifecycle
//!
//! [`StorefrontSystem`] is the one place where stores are created, wired together and
//! stopped.
//!
//! ## Wiring
//!
//! Stores are created first and given their dependencies when they start running
//! (`store.run(context)`): the product store gets a category client, the order store a
//! product client. The graph is acyclic, so dropping the clients stops everything:
//!
//! ```text
//! drop(OrderClient) ─▶ Order store exits ─▶ drops its ProductClient
//!                                            └▶ Product store exits ─▶ drops CategoryClient
//! ```
//!
//! ## Gateway selection
//!
//! With a `[backend]` section in the config, storefront screens read through
//! [`RestGateway`](crate::gateway::RestGateway); without one they read the local stores
//! through [`StoreGateway`](crate::gateway::StoreGateway). Orders, offers and service
//! areas always go through the local stores, which hold no stock for backend products,
//! so a backend-fed system is read-only: `checkout()` and `admin()` return
//! [`SystemError::ReadOnly`].

pub mod storefront;

pub use storefront::*;
