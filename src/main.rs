use grocer::admin::AdminConsole;
use grocer::checkout::CheckoutRequest;
use grocer::config::StorefrontConfig;
use grocer::icons::CategoryIcon;
use grocer::lifecycle::StorefrontSystem;
use grocer::model::{AreaDraft, CategoryDraft, CategoryId, OfferDraft, OrderStatus, ProductDraft};
use grocer::session::{AppContext, LocalIdentity, Role, Session};
use grocer_store::tracing::setup_tracing;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

fn product(
    name: &str,
    price: f64,
    sale: Option<f64>,
    category_id: CategoryId,
    stock: u32,
    unit: &str,
) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        description: None,
        price,
        sale_price: sale,
        category_id,
        stock_quantity: stock,
        unit: unit.to_string(),
        image_url: None,
    }
}

async fn seed_catalog(admin: &AdminConsole) -> Result<(), String> {
    let fruits = admin
        .create_category(CategoryDraft {
            name: "Fruits".into(),
            slug: "fruits".into(),
            image_url: None,
            icon: CategoryIcon::Fruits,
        })
        .await
        .map_err(|e| e.to_string())?;
    let dairy = admin
        .create_category(CategoryDraft {
            name: "Dairy & Eggs".into(),
            slug: "dairy".into(),
            image_url: None,
            icon: CategoryIcon::Dairy,
        })
        .await
        .map_err(|e| e.to_string())?;

    let drafts = [
        product("Alphonso Mangoes", 480.0, Some(420.0), fruits, 12, "dozen"),
        product("Bananas", 60.0, None, fruits, 40, "dozen"),
        product("Pomegranates", 180.0, None, fruits, 5, "kg"),
        product("Toned Milk", 56.0, Some(52.0), dairy, 30, "litre"),
        product("Free-range Eggs", 110.0, None, dairy, 18, "dozen"),
    ];
    for draft in drafts {
        admin.create_product(draft).await.map_err(|e| e.to_string())?;
    }

    admin
        .create_area(AreaDraft {
            name: "Indiranagar".into(),
            postal_code: "560038".into(),
            delivery_fee: 25.0,
        })
        .await
        .map_err(|e| e.to_string())?;
    admin
        .create_offer(OfferDraft {
            title: "First order".into(),
            description: Some("10% off your first basket".into()),
            code: "fresh10".into(),
            discount_percent: 10,
            min_order: 300.0,
        })
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

/// Backend-fed catalogs can only be browsed.
async fn browse(system: StorefrontSystem) -> Result<(), String> {
    let home = system.home_screen();
    home.initiate(()).await.map_err(|e| e.to_string())?;
    let snapshot = home.wait_settled().await.map_err(|e| e.to_string())?;
    match snapshot.state.data() {
        Some(data) => info!(
            categories = data.categories.len(),
            products = data.products.len(),
            "Home ready"
        ),
        None => warn!(state = ?snapshot.state, "Home failed"),
    }
    home.unmount();
    system.shutdown().await
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = StorefrontConfig::load().map_err(|e| e.to_string())?;
    let system = StorefrontSystem::start(config).map_err(|e| e.to_string())?;
    if system.is_read_only() {
        return browse(system).await;
    }
    let admin = system.admin().map_err(|e| e.to_string())?;

    seed_catalog(&admin)
        .instrument(tracing::info_span!("seed"))
        .await?;

    let identity =
        LocalIdentity::signed_in(Session::new("cust-42", "meera@example.com", Role::Customer));
    let ctx = AppContext::init(Arc::new(identity));

    // Home page
    let home = system.home_screen();
    home.initiate(()).await.map_err(|e| e.to_string())?;
    let snapshot = home.wait_settled().await.map_err(|e| e.to_string())?;
    if let Some(data) = snapshot.state.data() {
        let on_sale_rows = data.on_sale();
        let on_sale: Vec<&str> = on_sale_rows.iter().map(|p| p.name.as_str()).collect();
        info!(?on_sale, categories = data.categories.len(), "Home ready");
    }

    // Category page, then into the cart
    let category = system.category_screen();
    category
        .initiate("fruits".to_string())
        .await
        .map_err(|e| e.to_string())?;
    let snapshot = category.wait_settled().await.map_err(|e| e.to_string())?;
    match snapshot.state.data() {
        Some(data) => {
            for item in data.most_stocked().iter().take(2) {
                if let Err(e) = ctx.with_cart(|cart| cart.add(item, 3)) {
                    warn!(error = %e, "Could not add to cart");
                }
            }
        }
        None => warn!(state = ?snapshot.state, "Category page failed"),
    }
    info!(items = ctx.cart().item_count(), subtotal = ctx.cart().subtotal(), "Cart filled");

    // Checkout and confirmation
    let request = CheckoutRequest {
        address: "12, 100 Feet Road".into(),
        postal_code: "560038".into(),
        offer_code: Some("FRESH10".into()),
    };
    let confirmation = system
        .checkout()
        .map_err(|e| e.to_string())?
        .place_order(&ctx, request)
        .instrument(tracing::info_span!("checkout"))
        .await
        .map_err(|e| e.to_string())?;
    info!(order_id = %confirmation.order_id, total = confirmation.total, "Order confirmed");

    let confirmation_page = system.order_confirmation_screen();
    confirmation_page
        .initiate(confirmation.order_id)
        .await
        .map_err(|e| e.to_string())?;
    confirmation_page.wait_settled().await.map_err(|e| e.to_string())?;

    // Fulfilment from the admin panel
    admin
        .advance_order(confirmation.order_id, OrderStatus::Packed)
        .await
        .map_err(|e| e.to_string())?;
    let placed = admin
        .orders(Some(OrderStatus::Placed))
        .await
        .map_err(|e| e.to_string())?;
    info!(still_placed = placed.len(), "Fulfilment updated");

    home.unmount();
    category.unmount();
    confirmation_page.unmount();
    drop(admin);
    ctx.teardown();
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
