//! Order line value objects.

use super::{OrderDomainError, OrderItemId};
use crate::menu::domain::{MenuItem, MenuItemId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of units on an order line. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Largest quantity accepted on a single line.
    pub const MAX: u32 = 99;

    /// Creates a validated quantity.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidQuantity`] for zero or values above
    /// [`Quantity::MAX`].
    pub const fn new(value: u32) -> Result<Self, OrderDomainError> {
        if value == 0 || value > Self::MAX {
            return Err(OrderDomainError::InvalidQuantity(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying count.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text customization such as "no onions".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Customization(String);

impl Customization {
    /// Maximum length in characters.
    pub const MAX_LENGTH: usize = 500;

    /// Parses optional customization text.
    ///
    /// Blank input yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::CustomizationTooLong`] when the trimmed text
    /// exceeds [`Customization::MAX_LENGTH`] characters.
    pub fn parse(value: Option<&str>) -> Result<Option<Self>, OrderDomainError> {
        let Some(trimmed) = value.map(str::trim).filter(|text| !text.is_empty()) else {
            return Ok(None);
        };
        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(OrderDomainError::CustomizationTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A menu item, its quantity and the unit price captured when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: OrderItemId,
    menu_item_id: MenuItemId,
    name: String,
    quantity: Quantity,
    unit_price: Money,
    customization: Option<Customization>,
}

impl OrderItem {
    pub(super) fn from_menu_item(
        menu_item: &MenuItem,
        quantity: Quantity,
        customization: Option<Customization>,
    ) -> Self {
        Self {
            id: OrderItemId::new(),
            menu_item_id: menu_item.id(),
            name: menu_item.name().as_str().to_owned(),
            quantity,
            unit_price: menu_item.price(),
            customization,
        }
    }

    pub(super) fn revise(&mut self, quantity: Quantity, customization: Option<Customization>) {
        self.quantity = quantity;
        self.customization = customization;
    }

    /// Returns the line identifier.
    #[must_use]
    pub const fn id(&self) -> OrderItemId {
        self.id
    }

    /// Returns the referenced menu item.
    #[must_use]
    pub const fn menu_item_id(&self) -> MenuItemId {
        self.menu_item_id
    }

    /// Returns the menu item name at the time the line was added.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the quantity.
    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Returns the captured unit price.
    #[must_use]
    pub const fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Returns the customization, if any.
    #[must_use]
    pub const fn customization(&self) -> Option<&Customization> {
        self.customization.as_ref()
    }

    /// Returns `quantity × unit_price`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity.value())
    }
}
