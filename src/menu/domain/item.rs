//! Menu item aggregate and its validated value objects.

use super::{MenuDomainError, MenuItemId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name of a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    /// Creates a validated item name.
    ///
    /// # Errors
    ///
    /// Returns [`MenuDomainError::EmptyItemName`] when the trimmed value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, MenuDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MenuDomainError::EmptyItemName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Menu category such as `Burgers` or `Drinks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Creates a validated category.
    ///
    /// # Errors
    ///
    /// Returns [`MenuDomainError::EmptyCategory`] when the trimmed value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, MenuDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MenuDomainError::EmptyCategory);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the category as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares categories ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Menu item offered for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    id: MenuItemId,
    name: ItemName,
    price: Money,
    category: Category,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Changes a manager may apply to an existing menu item.
///
/// Blank category or description values leave the stored value unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemChanges {
    /// Replacement price.
    pub price: Money,
    /// Replacement category, if any.
    pub category: Option<String>,
    /// Replacement description, if any.
    pub description: Option<String>,
}

impl MenuItem {
    /// Creates a new menu item.
    ///
    /// # Errors
    ///
    /// Returns [`MenuDomainError::NonPositivePrice`] for a zero price.
    pub fn new(
        name: ItemName,
        price: Money,
        category: Category,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, MenuDomainError> {
        if price.is_zero() {
            return Err(MenuDomainError::NonPositivePrice);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: MenuItemId::new(),
            name,
            price,
            category,
            description: description.into().trim().to_owned(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> MenuItemId {
        self.id
    }

    /// Returns the item name.
    #[must_use]
    pub const fn name(&self) -> &ItemName {
        &self.name
    }

    /// Returns the current price.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// Returns the item category.
    #[must_use]
    pub const fn category(&self) -> &Category {
        &self.category
    }

    /// Returns the item description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a manager edit.
    ///
    /// Validation happens before any field is touched, so a rejected edit
    /// leaves the item unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MenuDomainError::NonPositivePrice`] for a zero price.
    pub fn apply_changes(
        &mut self,
        changes: MenuItemChanges,
        clock: &impl Clock,
    ) -> Result<(), MenuDomainError> {
        if changes.price.is_zero() {
            return Err(MenuDomainError::NonPositivePrice);
        }
        let category = changes
            .category
            .filter(|value| !value.trim().is_empty())
            .map(Category::new)
            .transpose()?;

        self.price = changes.price;
        if let Some(new_category) = category {
            self.category = new_category;
        }
        if let Some(description) = changes.description {
            let trimmed = description.trim();
            if !trimmed.is_empty() {
                trimmed.clone_into(&mut self.description);
            }
        }
        self.updated_at = clock.utc();
        Ok(())
    }
}
