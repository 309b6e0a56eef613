//! # Checkout
//!
//! Turns the context's cart into an order:
//!
//! 1. a signed-in session and a non-empty cart are required
//! 2. the postal code must belong to an active service area, which sets the delivery fee
//! 3. an optional offer code must be active and its minimum order met
//! 4. the order store reserves stock while creating the order
//! 5. once the order exists, exactly the ordered quantities leave the cart

use crate::area_actor::AreaError;
use crate::cart::Cart;
use crate::clients::{AreaClient, OfferClient, OrderClient};
use crate::model::{round_cents, DeliveryDetails, OrderDraft, OrderId, OrderStatus, ServiceArea};
use crate::offer_actor::OfferError;
use crate::order_actor::OrderError;
use crate::session::{AppContext, IdentityError};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Sign in to place an order")]
    NotSignedIn,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Delivery address must not be empty")]
    MissingAddress,

    #[error("We do not deliver to {0} yet")]
    NotServiced(String),

    #[error("Unknown offer code: {0}")]
    UnknownOffer(String),

    #[error("Offer {0} has expired")]
    OfferInactive(String),

    #[error("Offer {code} needs an order of at least {min_order:.2}")]
    MinimumNotMet { code: String, min_order: f64 },

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Offer(#[from] OfferError),

    #[error(transparent)]
    Area(#[from] AreaError),
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub address: String,
    pub postal_code: String,
    pub offer_code: Option<String>,
}

/// Amounts for a cart delivered to one area, before anything is reserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub subtotal: f64,
    pub discount: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub offer_code: Option<String>,
    pub area: ServiceArea,
}

/// What the confirmation page needs to know about a placed order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub item_count: u32,
    pub subtotal: f64,
    pub discount: f64,
    pub delivery_fee: f64,
    pub total: f64,
}

#[derive(Clone)]
pub struct Checkout {
    orders: OrderClient,
    offers: OfferClient,
    areas: AreaClient,
}

impl Checkout {
    pub fn new(orders: OrderClient, offers: OfferClient, areas: AreaClient) -> Self {
        Self {
            orders,
            offers,
            areas,
        }
    }

    /// Prices `cart` for delivery to `postal_code` with an optional offer code.
    #[instrument(skip(self, cart), fields(lines = cart.lines().len()))]
    pub async fn quote(
        &self,
        cart: &Cart,
        postal_code: &str,
        offer_code: Option<&str>,
    ) -> Result<Quote, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let area = self
            .areas
            .find_by_postal_code(postal_code)
            .await?
            .filter(|area| area.active)
            .ok_or_else(|| CheckoutError::NotServiced(postal_code.trim().to_string()))?;

        let subtotal = cart.subtotal();
        let (discount, offer_code) = match offer_code.map(str::trim).filter(|c| !c.is_empty()) {
            None => (0.0, None),
            Some(code) => {
                let offer = self
                    .offers
                    .find_by_code(code)
                    .await?
                    .ok_or_else(|| CheckoutError::UnknownOffer(code.to_string()))?;
                if !offer.active {
                    return Err(CheckoutError::OfferInactive(offer.code));
                }
                if !offer.applies_to(subtotal) {
                    return Err(CheckoutError::MinimumNotMet {
                        code: offer.code,
                        min_order: offer.min_order,
                    });
                }
                (offer.discount_on(subtotal), Some(offer.code))
            }
        };

        let delivery_fee = area.delivery_fee;
        Ok(Quote {
            subtotal,
            discount,
            delivery_fee,
            total: round_cents(subtotal - discount + delivery_fee),
            offer_code,
            area,
        })
    }

    /// Places an order for the context's cart.
    #[instrument(skip(self, ctx, request), fields(postal_code = %request.postal_code))]
    pub async fn place_order(
        &self,
        ctx: &AppContext,
        request: CheckoutRequest,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let session = ctx.session().await?.ok_or(CheckoutError::NotSignedIn)?;
        if request.address.trim().is_empty() {
            return Err(CheckoutError::MissingAddress);
        }
        let cart = ctx.cart();
        let lines = cart.to_order_lines();
        let quote = self
            .quote(&cart, &request.postal_code, request.offer_code.as_deref())
            .await?;

        let draft = OrderDraft {
            customer_id: session.user_id,
            lines: lines.clone(),
            delivery: DeliveryDetails {
                address: request.address.trim().to_string(),
                postal_code: quote.area.postal_code.clone(),
                area_id: quote.area.id,
            },
            offer_code: quote.offer_code.clone(),
            subtotal: quote.subtotal,
            discount: quote.discount,
            delivery_fee: quote.delivery_fee,
            total: quote.total,
        };

        let order_id = match self.orders.place_order(draft).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Order was not placed, cart kept");
                return Err(e.into());
            }
        };
        ctx.with_cart(|live| live.settle(&lines));
        info!(%order_id, total = quote.total, "Order placed");

        Ok(OrderConfirmation {
            order_id,
            status: OrderStatus::Placed,
            item_count: cart.item_count(),
            subtotal: quote.subtotal,
            discount: quote.discount,
            delivery_fee: quote.delivery_fee,
            total: quote.total,
        })
    }
}
