//! Plain data types for the storefront. Store behaviour for each lives in the matching
//! `*_actor` module as an impl of [`Record`](grocer_store::Record).

/// Declares a store-assigned identifier: a `u32` newtype that serializes as the bare
/// number and displays with a resource prefix (`product_12`).
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub(crate) use record_id;

pub mod area;
pub mod category;
pub mod offer;
pub mod order;
pub mod product;

pub use area::*;
pub use category::*;
pub use offer::*;
pub use order::*;
pub use product::*;

/// Rounds a money amount to whole cents.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// A usable money amount: finite and not negative.
pub(crate) fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount >= 0.0
}
