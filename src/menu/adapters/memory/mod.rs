//! In-memory menu catalog.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::menu::{
    domain::{Category, MenuItem, MenuItemId},
    ports::{MenuRepository, MenuRepositoryError, MenuRepositoryResult},
};

/// Thread-safe in-memory menu repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMenuRepository {
    items: Arc<RwLock<HashMap<MenuItemId, MenuItem>>>,
}

impl InMemoryMenuRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> MenuRepositoryError {
    MenuRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted(mut items: Vec<MenuItem>) -> Vec<MenuItem> {
    items.sort_by(|a, b| {
        a.category()
            .cmp(b.category())
            .then_with(|| a.name().as_str().cmp(b.name().as_str()))
    });
    items
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn store(&self, item: &MenuItem) -> MenuRepositoryResult<()> {
        let mut items = self.items.write().map_err(lock_error)?;
        if items.contains_key(&item.id()) {
            return Err(MenuRepositoryError::DuplicateItem(item.id()));
        }
        items.insert(item.id(), item.clone());
        Ok(())
    }

    async fn update(&self, item: &MenuItem) -> MenuRepositoryResult<()> {
        let mut items = self.items.write().map_err(lock_error)?;
        let slot = items
            .get_mut(&item.id())
            .ok_or(MenuRepositoryError::NotFound(item.id()))?;
        *slot = item.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: MenuItemId) -> MenuRepositoryResult<Option<MenuItem>> {
        let items = self.items.read().map_err(lock_error)?;
        Ok(items.get(&id).cloned())
    }

    async fn list_all(&self) -> MenuRepositoryResult<Vec<MenuItem>> {
        let items = self.items.read().map_err(lock_error)?;
        Ok(sorted(items.values().cloned().collect()))
    }

    async fn list_by_category(&self, category: &str) -> MenuRepositoryResult<Vec<MenuItem>> {
        let items = self.items.read().map_err(lock_error)?;
        Ok(sorted(
            items
                .values()
                .filter(|item| item.category().matches(category))
                .cloned()
                .collect(),
        ))
    }

    async fn categories(&self) -> MenuRepositoryResult<Vec<Category>> {
        let items = self.items.read().map_err(lock_error)?;
        let spellings: BTreeSet<&Category> = items.values().map(MenuItem::category).collect();
        // Categories match ignoring ASCII case; the smallest spelling names the group.
        let mut distinct: BTreeMap<String, Category> = BTreeMap::new();
        for category in spellings {
            distinct
                .entry(category.as_str().to_ascii_lowercase())
                .or_insert_with(|| category.clone());
        }
        Ok(distinct.into_values().collect())
    }
}
