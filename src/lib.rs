//! # Grocer
//!
//! Storefront and admin console for a grocery delivery service: category browsing,
//! product listing, cart, checkout, order confirmation, and an admin panel for offers,
//! service areas, products and orders.
//!
//! ## Module Tour
//!
//! ### 1. Reading the catalog ([`gateway`], [`view`])
//! Every storefront screen is an actor ([`view::ScreenController`]) that fetches through
//! a [`gateway::DataGateway`] and publishes a [`view::ScreenSnapshot`]. Results are tagged
//! with the cycle and route key that requested them, so a slow answer for an old route
//! never overwrites the current one. [`view::transform`] derives the highlight rows (on
//! sale, most stocked) from a fetched list.
//!
//! ### 2. Owning the data ([`category_actor`], [`product_actor`], [`order_actor`], [`offer_actor`], [`area_actor`])
//! One [`grocer_store::RecordStore`] per resource. Each `*_actor` module holds the
//! record's validation, actions and error type; [`clients`] wraps each store in a typed
//! client.
//!
//! ### 3. Buying ([`cart`], [`checkout`], [`session`])
//! The cart lives in the [`session::AppContext`] together with the identity provider and
//! the browser-event hub ([`notify`]). Checkout validates delivery and offer, then
//! creates the order, which reserves stock.
//!
//! ### 4. Running it ([`lifecycle`], [`config`], [`admin`])
//! [`lifecycle::StorefrontSystem`] starts and wires the stores from a
//! [`config::StorefrontConfig`] and hands out screens, checkout and the
//! [`admin::AdminConsole`].
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod admin;
pub mod area_actor;
pub mod cart;
pub mod category_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod gateway;
pub mod icons;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod offer_actor;
pub mod order_actor;
pub mod product_actor;
pub mod session;
pub mod view;
