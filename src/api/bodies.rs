//! Request bodies.

use super::ApiError;
use crate::menu::domain::MenuItemId;
use crate::money::Money;
use crate::order::domain::OrderId;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// Body of `POST /orders/:id/items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItemBody {
    /// Menu item to add.
    pub menu_item_id: MenuItemId,
    /// Units to add.
    pub quantity: u32,
    /// Optional customization text.
    #[serde(default)]
    pub customization: Option<String>,
}

/// Body of `PUT /orders/:id/items/:itemId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditItemBody {
    /// Replacement quantity.
    pub quantity: u32,
    /// Replacement customization; omitted or blank clears it.
    #[serde(default)]
    pub customization: Option<String>,
}

/// Body of `PUT /orders/:id/confirm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmOrderBody {
    /// `system` or `counter`.
    pub payment_path: String,
}

/// Body of `POST /menu/items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateMenuItemBody {
    /// Item name.
    pub name: String,
    /// Price in cents.
    pub price: Money,
    /// Category name.
    pub category: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
}

/// Body of `PUT /menu/items/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMenuItemBody {
    /// Replacement price in cents.
    pub price: Money,
    /// Replacement category; omitted or blank keeps the current one.
    #[serde(default)]
    pub category: Option<String>,
    /// Replacement description; omitted or blank keeps the current one.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /payments/process-system`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPaymentBody {
    /// Order to pay.
    pub order_id: OrderId,
    /// Opaque card token from the ordering client.
    pub card_token: String,
}

/// Body of `POST /payments/process-counter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterPaymentBody {
    /// Order to settle.
    pub order_id: OrderId,
    /// `cash`, `card` or `mobile`.
    pub method: String,
}

/// Body of `PUT /kitchen/orders/:id/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenStatusBody {
    /// `preparing`, `ready` or `cancelled`.
    pub status: String,
}

/// Decodes a required JSON body.
pub(super) fn decode<T: DeserializeOwned>(body: Option<&Value>) -> Result<T, ApiError> {
    let value = body.ok_or_else(|| ApiError::validation("request body is required"))?;
    T::deserialize(value)
        .map_err(|err| ApiError::validation(format!("invalid request body: {err}")))
}
