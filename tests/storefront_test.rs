use grocer::admin::AdminError;
use grocer::category_actor::CategoryError;
use grocer::config::{BackendConfig, StorefrontConfig};
use grocer::gateway::{DataGateway, StoreGateway};
use grocer::icons::CategoryIcon;
use grocer::lifecycle::{StorefrontSystem, SystemError};
use grocer::model::{CategoryDraft, CategoryId, CategoryPatch, OrderId, ProductDraft, ProductPatch};
use grocer::product_actor::ProductError;
use grocer::view::{ViewError, ViewState};
use grocer_store::RecordClient;

fn category(name: &str, slug: &str, icon: CategoryIcon) -> CategoryDraft {
    CategoryDraft {
        name: name.into(),
        slug: slug.into(),
        image_url: None,
        icon,
    }
}

fn product(
    name: &str,
    category_id: CategoryId,
    stock: u32,
    sale_price: Option<f64>,
) -> ProductDraft {
    ProductDraft {
        name: name.into(),
        description: None,
        price: 100.0,
        sale_price,
        category_id,
        stock_quantity: stock,
        unit: "kg".into(),
        image_url: None,
    }
}

/// Real stores, store-backed gateway, screens on top.
#[tokio::test]
async fn test_storefront_reads_what_admin_wrote() {
    let system = StorefrontSystem::start(StorefrontConfig::default()).unwrap();
    let admin = system.admin().unwrap();

    let fruits = admin
        .create_category(category("Fruits", "fruits", CategoryIcon::Fruits))
        .await
        .unwrap();
    let bakery = admin
        .create_category(category("Bakery", "bakery", CategoryIcon::Bakery))
        .await
        .unwrap();
    admin.create_product(product("Guava", fruits, 5, None)).await.unwrap();
    admin.create_product(product("Papaya", fruits, 20, Some(80.0))).await.unwrap();
    admin.create_product(product("Sourdough", bakery, 3, None)).await.unwrap();

    // Gateway ordering: categories by name.
    let names: Vec<String> = system
        .gateway
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Bakery", "Fruits"]);

    let page = system.category_screen();
    page.initiate("fruits".to_string()).await.unwrap();
    let snapshot = page.wait_settled().await.unwrap();
    let data = snapshot.state.data().unwrap();
    let stocked_rows = data.most_stocked();
    let most_stocked: Vec<&str> = stocked_rows.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(most_stocked, vec!["Papaya", "Guava"]);

    let home = system.home_screen();
    home.initiate(()).await.unwrap();
    let home_data = home.wait_settled().await.unwrap();
    let on_sale: Vec<String> = home_data
        .state
        .data()
        .unwrap()
        .on_sale()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(on_sale, vec!["Papaya"]);

    page.unmount();
    home.unmount();
    drop(admin);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_store_gateway_lookup_by_slug() {
    let system = StorefrontSystem::start(StorefrontConfig::default()).unwrap();
    let gateway = StoreGateway::new(system.categories.clone(), system.products.clone());
    let dairy = system
        .categories
        .create_category(category("Dairy", "dairy", CategoryIcon::Dairy))
        .await
        .unwrap();

    let found = gateway.get_category_by_slug("dairy").await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(dairy));
    assert_eq!(gateway.get_category_by_slug("missing").await.unwrap(), None);
    assert!(gateway.list_products_by_category(dairy).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_catalog_rules_enforced_by_stores() {
    let system = StorefrontSystem::start(StorefrontConfig::default()).unwrap();
    let admin = system.admin().unwrap();

    let fruits = admin
        .create_category(category("Fruits", "fruits", CategoryIcon::Fruits))
        .await
        .unwrap();

    // Slugs are unique.
    let duplicate = admin
        .create_category(category("More fruit", "fruits", CategoryIcon::Basket))
        .await;
    assert_eq!(
        duplicate,
        Err(AdminError::Category(CategoryError::DuplicateSlug("fruits".into())))
    );

    // Products must point at a real category.
    let orphan = admin.create_product(product("Ghost", CategoryId(99), 1, None)).await;
    assert_eq!(
        orphan,
        Err(AdminError::Product(ProductError::UnknownCategory(CategoryId(99))))
    );

    let negative = admin
        .create_product(ProductDraft {
            price: -1.0,
            ..product("Refund", fruits, 1, None)
        })
        .await;
    assert_eq!(
        negative,
        Err(AdminError::Product(ProductError::InvalidPrice(-1.0)))
    );

    // A category with products cannot be deleted.
    let kiwi = admin.create_product(product("Kiwi", fruits, 4, None)).await.unwrap();
    assert!(matches!(
        admin.delete_category(fruits).await,
        Err(AdminError::CategoryInUse { products: 1, .. })
    ));
    // The refused delete leaves the category open for new products.
    let still_open = system.categories.get(fruits).await.unwrap().unwrap();
    assert!(!still_open.retired);
    let lime = admin.create_product(product("Lime", fruits, 9, None)).await.unwrap();

    admin.delete_product(kiwi).await.unwrap();
    admin.delete_product(lime).await.unwrap();
    admin.delete_category(fruits).await.unwrap();
    assert_eq!(system.categories.get(fruits).await.unwrap(), None);
}

/// A category that is being deleted takes no new products, so none can be left behind
/// pointing at it.
#[tokio::test]
async fn test_retired_category_refuses_new_products() {
    let system = StorefrontSystem::start(StorefrontConfig::default()).unwrap();
    let admin = system.admin().unwrap();
    let bakery = admin
        .create_category(category("Bakery", "bakery", CategoryIcon::Bakery))
        .await
        .unwrap();

    system.categories.retire(bakery).await.unwrap();
    assert_eq!(
        admin.create_product(product("Sourdough", bakery, 3, None)).await,
        Err(AdminError::Product(ProductError::RetiredCategory(bakery)))
    );

    system.categories.reinstate(bakery).await.unwrap();
    assert!(admin
        .create_product(product("Sourdough", bakery, 3, None))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_admin_updates_and_restock() {
    let system = StorefrontSystem::start(StorefrontConfig::default()).unwrap();
    let admin = system.admin().unwrap();

    let fruits = admin
        .create_category(category("Fruits", "fruits", CategoryIcon::Fruits))
        .await
        .unwrap();
    let renamed = admin
        .update_category(
            fruits,
            CategoryPatch {
                slug: Some("fresh-fruit".into()),
                ..CategoryPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.slug, "fresh-fruit");

    let mango = admin.create_product(product("Mango", fruits, 0, None)).await.unwrap();
    assert!(!system.products.get(mango).await.unwrap().unwrap().in_stock);

    assert_eq!(admin.restock(mango, 12).await, Ok(12));
    let on_sale = admin
        .update_product(
            mango,
            ProductPatch {
                sale_price: Some(Some(75.0)),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap();
    assert!(on_sale.in_stock);
    assert_eq!(on_sale.effective_price(), 75.0);

    let ended = admin
        .update_product(
            mango,
            ProductPatch {
                sale_price: Some(None),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap();
    assert!(!ended.is_on_sale());
}

#[tokio::test]
async fn test_unknown_order_confirmation_is_not_found() {
    let system = StorefrontSystem::start(StorefrontConfig::default()).unwrap();
    let page = system.order_confirmation_screen();

    page.initiate(OrderId(404)).await.unwrap();
    let snapshot = page.wait_settled().await.unwrap();
    assert!(matches!(snapshot.state, ViewState::Failed(ViewError::NotFound(_))));
}

/// A REST-fed catalog has no local stock to reserve against, so the system only browses.
#[tokio::test]
async fn test_backend_catalog_is_read_only() {
    let config = StorefrontConfig {
        backend: Some(BackendConfig {
            url: "http://127.0.0.1:9".into(),
            anon_key: "anon".into(),
        }),
        ..StorefrontConfig::default()
    };
    let system = StorefrontSystem::start(config).unwrap();
    assert!(system.is_read_only());

    let read_only = SystemError::ReadOnly("http://127.0.0.1:9".into());
    assert_eq!(system.checkout().err(), Some(read_only.clone()));
    assert_eq!(system.admin().err(), Some(read_only));

    let home = system.home_screen();
    home.initiate(()).await.unwrap();
    let snapshot = home.wait_settled().await.unwrap();
    assert!(matches!(
        snapshot.state,
        ViewState::Failed(ViewError::Transient(_))
    ));

    home.unmount();
    system.shutdown().await.unwrap();
}
