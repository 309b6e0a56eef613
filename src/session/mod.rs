//! Session and app-wide context.
//!
//! The identity provider and the cart used to be reachable from anywhere. Here they live
//! in an [`AppContext`] built at startup ([`AppContext::init`]), handed explicitly to
//! checkout and screens, and torn down at exit ([`AppContext::teardown`]).

pub mod context;
pub mod identity;

pub use context::AppContext;
pub use identity::{IdentityError, IdentityProvider, LocalIdentity, Role, Session};
