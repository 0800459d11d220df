//! Repository port for the menu catalog.

use crate::menu::domain::{Category, MenuItem, MenuItemId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for menu repository operations.
pub type MenuRepositoryResult<T> = Result<T, MenuRepositoryError>;

/// Menu catalog persistence contract.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Stores a new menu item.
    ///
    /// # Errors
    ///
    /// Returns [`MenuRepositoryError::DuplicateItem`] when the identifier
    /// already exists.
    async fn store(&self, item: &MenuItem) -> MenuRepositoryResult<()>;

    /// Persists changes to an existing menu item.
    ///
    /// # Errors
    ///
    /// Returns [`MenuRepositoryError::NotFound`] when the item does not exist.
    async fn update(&self, item: &MenuItem) -> MenuRepositoryResult<()>;

    /// Finds a menu item by identifier.
    async fn find_by_id(&self, id: MenuItemId) -> MenuRepositoryResult<Option<MenuItem>>;

    /// Returns every menu item ordered by category, then name.
    async fn list_all(&self) -> MenuRepositoryResult<Vec<MenuItem>>;

    /// Returns items in a category, matched case-insensitively.
    async fn list_by_category(&self, category: &str) -> MenuRepositoryResult<Vec<MenuItem>>;

    /// Returns the distinct categories in sorted order.
    async fn categories(&self) -> MenuRepositoryResult<Vec<Category>>;
}

/// Errors returned by menu repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MenuRepositoryError {
    /// A menu item with the same identifier already exists.
    #[error("duplicate menu item identifier: {0}")]
    DuplicateItem(MenuItemId),

    /// The menu item was not found.
    #[error("menu item not found: {0}")]
    NotFound(MenuItemId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MenuRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
