//! Response payloads.
//!
//! Orders are rendered with their computed totals, which the domain type
//! does not serialize.

use crate::menu::domain::MenuItemId;
use crate::money::Money;
use crate::order::domain::{
    Order, OrderId, OrderItem, OrderItemId, OrderStatus, PaymentPath, PaymentStatus,
};
use crate::payment::domain::Payment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rendered order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemView {
    /// Line identifier.
    pub id: OrderItemId,
    /// Referenced menu item.
    pub menu_item_id: MenuItemId,
    /// Menu item name when the line was added.
    pub name: String,
    /// Units ordered.
    pub quantity: u32,
    /// Unit price in cents.
    pub unit_price: Money,
    /// Customization text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
    /// `quantity × unit_price` in cents.
    pub line_total: Money,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            id: item.id(),
            menu_item_id: item.menu_item_id(),
            name: item.name().to_owned(),
            quantity: item.quantity().value(),
            unit_price: item.unit_price(),
            customization: item.customization().map(|text| text.as_str().to_owned()),
            line_total: item.line_total(),
        }
    }
}

/// Rendered order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderView {
    /// Order identifier.
    pub id: OrderId,
    /// Sequential order number.
    pub order_number: u64,
    /// Order number as called out at the counter, e.g. `#0042`.
    pub display_number: String,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Payment path chosen at confirmation.
    pub payment_path: Option<PaymentPath>,
    /// Order lines.
    pub items: Vec<OrderItemView>,
    /// Order total in cents.
    pub total: Money,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            order_number: order.number().value(),
            display_number: order.number().to_string(),
            status: order.status(),
            payment_status: order.payment_status(),
            payment_path: order.payment_path(),
            items: order.items().iter().map(OrderItemView::from).collect(),
            total: order.total(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

/// Renders a list of orders.
pub(super) fn order_views(orders: &[Order]) -> Vec<OrderView> {
    orders.iter().map(OrderView::from).collect()
}

/// Rendered payment result: the order and its payment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementView {
    /// Order after payment.
    pub order: OrderView,
    /// Stored payment record.
    pub payment: Payment,
}
