//! Service layer for browsing and editing the menu catalog.

use crate::menu::{
    domain::{Category, ItemName, MenuDomainError, MenuItem, MenuItemChanges, MenuItemId},
    ports::{MenuRepository, MenuRepositoryError},
};
use crate::money::Money;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for adding a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMenuItemRequest {
    name: String,
    price: Money,
    category: String,
    description: String,
}

impl AddMenuItemRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Money, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
            description: String::new(),
        }
    }

    /// Sets the item description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload for editing a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMenuItemRequest {
    item_id: MenuItemId,
    changes: MenuItemChanges,
}

impl UpdateMenuItemRequest {
    /// Creates a request that replaces the price of an item.
    #[must_use]
    pub const fn new(item_id: MenuItemId, price: Money) -> Self {
        Self {
            item_id,
            changes: MenuItemChanges {
                price,
                category: None,
                description: None,
            },
        }
    }

    /// Sets the replacement category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.changes.category = Some(category.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.changes.description = Some(description.into());
        self
    }
}

/// Service-level errors for menu catalog operations.
#[derive(Debug, Error)]
pub enum MenuServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] MenuDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] MenuRepositoryError),
    /// No menu item exists with the given identifier.
    #[error("menu item {0} not found")]
    NotFound(MenuItemId),
}

/// Result type for menu catalog operations.
pub type MenuServiceResult<T> = Result<T, MenuServiceError>;

/// Menu catalog service shared by the customer and manager roles.
#[derive(Clone)]
pub struct MenuCatalogService<M, C>
where
    M: MenuRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<M>,
    clock: Arc<C>,
}

impl<M, C> MenuCatalogService<M, C>
where
    M: MenuRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(repository: Arc<M>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Adds a new item to the menu.
    ///
    /// # Errors
    ///
    /// Returns [`MenuServiceError::Domain`] for invalid fields and
    /// repository errors when the item cannot be stored.
    pub async fn add_item(&self, request: AddMenuItemRequest) -> MenuServiceResult<MenuItem> {
        let name = ItemName::new(request.name)?;
        let category = Category::new(request.category)?;
        let item = MenuItem::new(
            name,
            request.price,
            category,
            request.description,
            &*self.clock,
        )?;
        self.repository.store(&item).await?;
        info!(item_id = %item.id(), name = %item.name(), price = %item.price(), "menu item added");
        Ok(item)
    }

    /// Edits an existing menu item.
    ///
    /// # Errors
    ///
    /// Returns [`MenuServiceError::NotFound`] when the item does not exist,
    /// domain errors for invalid changes, or repository errors.
    pub async fn update_item(&self, request: UpdateMenuItemRequest) -> MenuServiceResult<MenuItem> {
        let mut item = self.item_details(request.item_id).await?;
        item.apply_changes(request.changes, &*self.clock)?;
        self.repository.update(&item).await?;
        info!(item_id = %item.id(), price = %item.price(), "menu item updated");
        Ok(item)
    }

    /// Returns a single menu item.
    ///
    /// # Errors
    ///
    /// Returns [`MenuServiceError::NotFound`] when the item does not exist.
    pub async fn item_details(&self, item_id: MenuItemId) -> MenuServiceResult<MenuItem> {
        debug!(%item_id, "menu item lookup");
        self.repository
            .find_by_id(item_id)
            .await?
            .ok_or(MenuServiceError::NotFound(item_id))
    }

    /// Lists every menu item.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_items(&self) -> MenuServiceResult<Vec<MenuItem>> {
        Ok(self.repository.list_all().await?)
    }

    /// Lists the items of one category.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn items_by_category(&self, category: &str) -> MenuServiceResult<Vec<MenuItem>> {
        Ok(self.repository.list_by_category(category).await?)
    }

    /// Lists the distinct menu categories.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn categories(&self) -> MenuServiceResult<Vec<Category>> {
        Ok(self.repository.categories().await?)
    }
}
