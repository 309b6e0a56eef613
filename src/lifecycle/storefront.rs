use crate::admin::AdminConsole;
use crate::checkout::Checkout;
use crate::clients::{AreaClient, CategoryClient, OfferClient, OrderClient, ProductClient};
use crate::config::StorefrontConfig;
use crate::gateway::{DataGateway, GatewayError, RestGateway, StoreGateway};
use crate::view::{
    CatalogScreen, CategoryScreen, FetchPlan, HomeScreen, OrderConfirmationScreen, OrdersScreen,
    ScreenController, ScreenHandle,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SystemError {
    /// The catalog comes from a remote backend whose stock the local order store cannot
    /// reserve, so nothing may be ordered or edited.
    #[error("Catalog is read from {0}; ordering and admin changes are disabled")]
    ReadOnly(String),
}

/// Starts, wires and stops every store, and hands out screens, checkout and the admin
/// console.
///
/// ```ignore
/// let system = StorefrontSystem::start(StorefrontConfig::load()?)?;
///
/// let home = system.home_screen();
/// home.initiate(()).await?;
/// let snapshot = home.wait_settled().await?;
///
/// home.unmount();
/// system.shutdown().await?;
/// ```
///
/// Stores run with their dependencies injected as context:
///
/// | Store | Context |
/// |---|---|
/// | Category, Offer, ServiceArea | `()` |
/// | Product | `CategoryClient` |
/// | Order | `ProductClient` |
pub struct StorefrontSystem {
    pub config: StorefrontConfig,
    pub categories: CategoryClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub offers: OfferClient,
    pub areas: AreaClient,
    /// Where storefront screens read from: the REST backend when one is configured,
    /// otherwise the stores above.
    pub gateway: Arc<dyn DataGateway>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Spawns the stores and picks the gateway. Fails only if a configured backend
    /// client cannot be built.
    pub fn start(config: StorefrontConfig) -> Result<Self, GatewayError> {
        let buffer = config.store.buffer_size;

        // 1. Create stores (no dependencies yet)
        let (category_store, categories) = crate::category_actor::new(buffer);
        let (product_store, products) = crate::product_actor::new(buffer);
        let (order_store, orders) = crate::order_actor::new(buffer);
        let (offer_store, offers) = crate::offer_actor::new(buffer);
        let (area_store, areas) = crate::area_actor::new(buffer);

        // 2. Start them with their context
        let handles = vec![
            tokio::spawn(category_store.run(())),
            tokio::spawn(product_store.run(categories.clone())),
            tokio::spawn(order_store.run(products.clone())),
            tokio::spawn(offer_store.run(())),
            tokio::spawn(area_store.run(())),
        ];

        let gateway: Arc<dyn DataGateway> = match &config.backend {
            Some(backend) => {
                info!(url = %backend.url, "Reading catalog from REST backend");
                Arc::new(RestGateway::new(
                    backend.url.clone(),
                    backend.anon_key.clone(),
                    config.fetch_timeout(),
                )?)
            }
            None => {
                info!("Reading catalog from local stores");
                Arc::new(StoreGateway::new(categories.clone(), products.clone()))
            }
        };

        info!(store = %config.branding.name, "Storefront started");
        Ok(Self {
            config,
            categories,
            products,
            orders,
            offers,
            areas,
            gateway,
            handles,
        })
    }

    /// Whether the catalog is served by a REST backend.
    pub fn is_read_only(&self) -> bool {
        self.config.backend.is_some()
    }

    fn ensure_writable(&self) -> Result<(), SystemError> {
        match &self.config.backend {
            Some(backend) => Err(SystemError::ReadOnly(backend.url.clone())),
            None => Ok(()),
        }
    }

    pub fn checkout(&self) -> Result<Checkout, SystemError> {
        self.ensure_writable()?;
        Ok(Checkout::new(
            self.orders.clone(),
            self.offers.clone(),
            self.areas.clone(),
        ))
    }

    pub fn admin(&self) -> Result<AdminConsole, SystemError> {
        self.ensure_writable()?;
        Ok(AdminConsole::new(
            self.categories.clone(),
            self.products.clone(),
            self.orders.clone(),
            self.offers.clone(),
            self.areas.clone(),
        ))
    }

    fn mount<P: FetchPlan>(&self, plan: P) -> ScreenHandle<P> {
        ScreenController::mount(plan, self.config.fetch_timeout())
    }

    pub fn home_screen(&self) -> ScreenHandle<HomeScreen> {
        self.mount(HomeScreen::new(self.gateway.clone()))
    }

    pub fn category_screen(&self) -> ScreenHandle<CategoryScreen> {
        self.mount(CategoryScreen::new(self.gateway.clone()))
    }

    pub fn catalog_screen(&self) -> ScreenHandle<CatalogScreen> {
        self.mount(CatalogScreen::new(self.gateway.clone()))
    }

    pub fn orders_screen(&self) -> ScreenHandle<OrdersScreen> {
        self.mount(OrdersScreen::new(self.orders.clone()))
    }

    pub fn order_confirmation_screen(&self) -> ScreenHandle<OrderConfirmationScreen> {
        self.mount(OrderConfirmationScreen::new(self.orders.clone()))
    }

    /// Stops every store and waits for it.
    ///
    /// Stores stop once every client clone is gone, so screens, checkouts and admin
    /// consoles taken from this system must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        drop(self.gateway);
        drop(self.orders);
        drop(self.products);
        drop(self.categories);
        drop(self.offers);
        drop(self.areas);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
