//! Application-wide context, created once at the root and passed to whatever needs it.

use super::identity::{IdentityError, IdentityProvider, Session};
use crate::cart::Cart;
use crate::notify::{BrowserEvent, EventHub};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

const EVENT_CAPACITY: usize = 32;

/// Identity, cart and browser events for one running app.
///
/// Cloning is cheap and every clone shares the same cart and event hub. The cart lock is
/// only taken inside [`with_cart`](Self::with_cart) and never across an `.await`.
#[derive(Clone)]
pub struct AppContext {
    identity: Arc<dyn IdentityProvider>,
    cart: Arc<Mutex<Cart>>,
    events: Arc<EventHub<BrowserEvent>>,
}

impl AppContext {
    pub fn init(identity: Arc<dyn IdentityProvider>) -> Self {
        info!("App context initialized");
        Self {
            identity,
            cart: Arc::new(Mutex::new(Cart::new())),
            events: Arc::new(EventHub::new(EVENT_CAPACITY)),
        }
    }

    pub async fn session(&self) -> Result<Option<Session>, IdentityError> {
        self.identity.current_session().await
    }

    /// Signs out and empties the cart.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        self.identity.sign_out().await?;
        self.with_cart(Cart::clear);
        Ok(())
    }

    pub fn with_cart<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// A copy of the cart as it is now.
    pub fn cart(&self) -> Cart {
        self.with_cart(|cart| cart.clone())
    }

    pub fn events(&self) -> &EventHub<BrowserEvent> {
        &self.events
    }

    /// Ends every event subscription and empties the cart.
    pub fn teardown(self) {
        self.events.close();
        self.with_cart(Cart::clear);
        info!("App context torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryId, Product, ProductId};
    use crate::session::{LocalIdentity, Role};

    fn context() -> AppContext {
        let identity =
            LocalIdentity::signed_in(Session::new("u1", "u1@example.com", Role::Customer));
        AppContext::init(Arc::new(identity))
    }

    #[tokio::test]
    async fn test_clones_share_the_cart() {
        let ctx = context();
        let other = ctx.clone();
        let bread = Product::new(ProductId(1), "Bread", 45.0, CategoryId(1));

        ctx.with_cart(|cart| cart.add(&bread, 2)).unwrap();
        assert_eq!(other.cart().item_count(), 2);
    }

    #[tokio::test]
    async fn test_sign_out_clears_cart() {
        let ctx = context();
        let bread = Product::new(ProductId(1), "Bread", 45.0, CategoryId(1));
        ctx.with_cart(|cart| cart.add(&bread, 1)).unwrap();

        ctx.sign_out().await.unwrap();
        assert_eq!(ctx.session().await, Ok(None));
        assert!(ctx.cart().is_empty());
    }

    #[tokio::test]
    async fn test_teardown_ends_subscriptions() {
        let ctx = context();
        let mut subscription = ctx.events().subscribe();
        let survivor = ctx.clone();

        ctx.teardown();
        assert_eq!(subscription.recv().await, None);
        assert_eq!(survivor.events().publish(BrowserEvent::Installed), 0);
    }
}
