//! [`Record`] implementation for [`Category`].
//!
//! Categories have no dependencies; the store enforces slug uniqueness through
//! [`Record::unique_key`].

use super::{CategoryAction, CategoryError};
use crate::model::{
    is_valid_slug, Category, CategoryDraft, CategoryFilter, CategoryId, CategoryPatch,
};
use async_trait::async_trait;
use grocer_store::Record;

#[async_trait]
impl Record for Category {
    type Id = CategoryId;
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;
    type Filter = CategoryFilter;
    type Action = CategoryAction;
    type Outcome = ();
    type Context = ();
    type Error = CategoryError;

    fn from_draft(id: CategoryId, draft: CategoryDraft) -> Result<Self, CategoryError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if !is_valid_slug(&draft.slug) {
            return Err(CategoryError::InvalidSlug(draft.slug));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            slug: draft.slug,
            image_url: draft.image_url,
            icon: draft.icon,
            retired: false,
        })
    }

    fn matches(&self, filter: &CategoryFilter) -> bool {
        match filter {
            CategoryFilter::Slug(slug) => &self.slug == slug,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.slug.clone())
    }

    async fn on_update(&mut self, patch: CategoryPatch, _ctx: &()) -> Result<(), CategoryError> {
        if let Some(name) = patch.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(CategoryError::EmptyName);
            }
            self.name = name.to_string();
        }
        if let Some(slug) = patch.slug {
            if !is_valid_slug(&slug) {
                return Err(CategoryError::InvalidSlug(slug));
            }
            self.slug = slug;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CategoryAction,
        _ctx: &(),
    ) -> Result<(), CategoryError> {
        self.retired = action == CategoryAction::Retire;
        Ok(())
    }
}
