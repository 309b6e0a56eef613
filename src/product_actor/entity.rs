//! [`Record`] implementation for [`Product`].
//!
//! The context is the category client: a product can only be created in, or moved to,
//! a category that exists.

use super::{ProductAction, ProductError};
use crate::clients::CategoryClient;
use crate::model::{
    is_valid_amount, CategoryId, Product, ProductDraft, ProductFilter, ProductId, ProductPatch,
};
use async_trait::async_trait;
use chrono::Utc;
use grocer_store::{Record, RecordClient};

fn check_price(price: f64) -> Result<f64, ProductError> {
    if is_valid_amount(price) {
        Ok(price)
    } else {
        Err(ProductError::InvalidPrice(price))
    }
}

async fn ensure_category(categories: &CategoryClient, id: CategoryId) -> Result<(), ProductError> {
    match categories.get(id).await {
        Ok(Some(category)) if category.retired => Err(ProductError::RetiredCategory(id)),
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ProductError::UnknownCategory(id)),
        Err(e) => Err(ProductError::Store(e.to_string())),
    }
}

#[async_trait]
impl Record for Product {
    type Id = ProductId;
    type Draft = ProductDraft;
    type Patch = ProductPatch;
    type Filter = ProductFilter;
    type Action = ProductAction;
    type Outcome = u32;
    type Context = CategoryClient;
    type Error = ProductError;

    fn from_draft(id: ProductId, draft: ProductDraft) -> Result<Self, ProductError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(ProductError::EmptyName);
        }
        if draft.unit.trim().is_empty() {
            return Err(ProductError::EmptyUnit);
        }
        let price = check_price(draft.price)?;
        let sale_price = draft.sale_price.map(check_price).transpose()?;
        Ok(Self {
            id,
            name: name.to_string(),
            description: draft.description,
            price,
            sale_price,
            category_id: draft.category_id,
            in_stock: draft.stock_quantity > 0,
            stock_quantity: draft.stock_quantity,
            unit: draft.unit.trim().to_string(),
            image_url: draft.image_url,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        match filter {
            ProductFilter::Category(id) => self.category_id == *id,
            ProductFilter::OnSale => self.sale_price.is_some(),
            ProductFilter::InStock => self.in_stock && self.stock_quantity > 0,
        }
    }

    async fn on_create(&mut self, categories: &CategoryClient) -> Result<(), ProductError> {
        ensure_category(categories, self.category_id).await
    }

    async fn on_update(
        &mut self,
        patch: ProductPatch,
        categories: &CategoryClient,
    ) -> Result<(), ProductError> {
        if let Some(category_id) = patch.category_id {
            if category_id != self.category_id {
                ensure_category(categories, category_id).await?;
            }
            self.category_id = category_id;
        }
        if let Some(name) = patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ProductError::EmptyName);
            }
            self.name = name.to_string();
        }
        if let Some(price) = patch.price {
            self.price = check_price(price)?;
        }
        if let Some(sale_price) = patch.sale_price {
            self.sale_price = sale_price.map(check_price).transpose()?;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(unit) = patch.unit {
            if unit.trim().is_empty() {
                return Err(ProductError::EmptyUnit);
            }
            self.unit = unit.trim().to_string();
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _categories: &CategoryClient,
    ) -> Result<u32, ProductError> {
        match action {
            ProductAction::CheckStock => {}
            ProductAction::Reserve(0) | ProductAction::Release(0) | ProductAction::Restock(0) => {
                return Err(ProductError::InvalidQuantity(0));
            }
            ProductAction::Reserve(quantity) => {
                if !self.can_supply(quantity) {
                    return Err(ProductError::InsufficientStock {
                        requested: quantity,
                        available: if self.in_stock { self.stock_quantity } else { 0 },
                    });
                }
                self.stock_quantity -= quantity;
            }
            ProductAction::Release(quantity) | ProductAction::Restock(quantity) => {
                self.stock_quantity = self.stock_quantity.saturating_add(quantity);
            }
        }
        self.in_stock = self.stock_quantity > 0;
        Ok(self.stock_quantity)
    }
}
