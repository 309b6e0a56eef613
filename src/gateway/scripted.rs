//! A [`DataGateway`] that answers from canned data.
//!
//! Besides data, a script can make a call fail or panic, and can hold a call behind a
//! gate until the test releases it. Gates are keyed by call and argument, so a test can
//! stall `get_category_by_slug("fruits")` while `"dairy"` goes straight through.
//!
//! ```rust,ignore
//! let gateway = ScriptedGateway::new(categories, products);
//! let gate = gateway.hold(GatewayCall::CategoryBySlug, "fruits");
//! // ... navigate to "fruits", then to "dairy" ...
//! gate.notify_one();   // the "fruits" result now arrives late
//! assert_eq!(gateway.calls(GatewayCall::ProductsByCategory), 2);
//! ```

use super::{DataGateway, GatewayError};
use crate::model::{Category, CategoryId, Product};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayCall {
    ListCategories,
    CategoryBySlug,
    ListProducts,
    ProductsByCategory,
}

#[derive(Debug, Clone)]
enum Fault {
    Fail(GatewayError),
    Panic,
}

#[derive(Default)]
struct Script {
    categories: Vec<Category>,
    products: Vec<Product>,
    faults: HashMap<GatewayCall, Fault>,
    gates: HashMap<(GatewayCall, String), Arc<Notify>>,
    calls: HashMap<GatewayCall, usize>,
}

#[derive(Clone, Default)]
pub struct ScriptedGateway {
    script: Arc<Mutex<Script>>,
}

impl ScriptedGateway {
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let script = Script {
            categories,
            products,
            ..Script::default()
        };
        Self {
            script: Arc::new(Mutex::new(script)),
        }
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every later `call` fail with `error`.
    pub fn fail(&self, call: GatewayCall, error: GatewayError) {
        self.script().faults.insert(call, Fault::Fail(error));
    }

    /// Makes every later `call` panic.
    pub fn panic_on(&self, call: GatewayCall) {
        self.script().faults.insert(call, Fault::Panic);
    }

    /// Clears a failure or panic set for `call`.
    pub fn heal(&self, call: GatewayCall) {
        self.script().faults.remove(&call);
    }

    /// Holds `call` with argument `arg` until the returned gate is notified. Use `""` for
    /// calls without an argument.
    pub fn hold(&self, call: GatewayCall, arg: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.script()
            .gates
            .insert((call, arg.to_string()), gate.clone());
        gate
    }

    /// How many times `call` has been made.
    pub fn calls(&self, call: GatewayCall) -> usize {
        self.script().calls.get(&call).copied().unwrap_or(0)
    }

    async fn enter(&self, call: GatewayCall, arg: &str) -> Result<(), GatewayError> {
        let (gate, fault) = {
            let mut script = self.script();
            *script.calls.entry(call).or_default() += 1;
            (
                script.gates.get(&(call, arg.to_string())).cloned(),
                script.faults.get(&call).cloned(),
            )
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match fault {
            None => Ok(()),
            Some(Fault::Fail(error)) => Err(error),
            Some(Fault::Panic) => panic!("scripted panic in {call:?}"),
        }
    }
}

#[async_trait]
impl DataGateway for ScriptedGateway {
    async fn list_categories(&self) -> Result<Vec<Category>, GatewayError> {
        self.enter(GatewayCall::ListCategories, "").await?;
        Ok(self.script().categories.clone())
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, GatewayError> {
        self.enter(GatewayCall::CategoryBySlug, slug).await?;
        Ok(self
            .script()
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.enter(GatewayCall::ListProducts, "").await?;
        Ok(self.script().products.clone())
    }

    async fn list_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, GatewayError> {
        self.enter(GatewayCall::ProductsByCategory, &category_id.0.to_string())
            .await?;
        Ok(self
            .script()
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }
}
