//! # Screens and their view state
//!
//! - [`controller`]: the per-screen actor that runs fetch cycles
//! - [`screens`]: what each screen fetches
//! - [`state`]: [`ViewState`], [`ViewError`], [`ScreenSnapshot`]
//! - [`transform`]: derived product views (on sale, most stocked, by category)

pub mod controller;
pub mod screens;
pub mod state;
pub mod transform;

pub use controller::{FetchPlan, ScreenController, ScreenError, ScreenHandle, Snapshot};
pub use screens::{
    CatalogScreen, CategoryData, CategoryScreen, HomeData, HomeScreen, OrderConfirmationScreen,
    OrdersScreen,
};
pub use state::{ScreenSnapshot, ViewError, ViewState, GENERIC_FAILURE_MESSAGE};
pub use transform::{filter_by_category, select_most_stocked, select_on_sale, TOP_N};
