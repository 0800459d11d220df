//! Daily sales summary aggregate.

use crate::menu::domain::MenuItemId;
use crate::money::Money;
use crate::order::domain::{Order, OrderStatus, PaymentStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Sales figures for one menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopSellingItem {
    /// Menu item identifier.
    pub menu_item_id: MenuItemId,
    /// Item name as recorded on the orders.
    pub name: String,
    /// Units sold.
    pub quantity_sold: u64,
    /// Revenue from this item.
    pub revenue: Money,
}

/// Revenue, order count and best sellers for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySalesSummary {
    /// Reported day (UTC).
    pub date: NaiveDate,
    /// Sum of the totals of counted orders.
    pub total_revenue: Money,
    /// Number of counted orders.
    pub order_count: usize,
    /// Best sellers by quantity, highest first.
    pub top_selling_items: Vec<TopSellingItem>,
}

impl DailySalesSummary {
    /// Returns `true` when an order counts as a sale.
    #[must_use]
    pub fn counts_as_sale(order: &Order) -> bool {
        order.payment_status() == PaymentStatus::Completed
            && order.status() != OrderStatus::Cancelled
    }

    /// Builds the summary for `date` from the orders created that day.
    ///
    /// Orders that are unpaid or cancelled are skipped. Best sellers are
    /// ranked by quantity, ties broken by name, and cut to `top_items`.
    #[must_use]
    pub fn from_orders(date: NaiveDate, orders: &[Order], top_items: usize) -> Self {
        let sales: Vec<&Order> = orders
            .iter()
            .filter(|order| Self::counts_as_sale(order))
            .collect();

        let mut per_item: HashMap<MenuItemId, TopSellingItem> = HashMap::new();
        for line in sales.iter().copied().flat_map(Order::items) {
            let entry = per_item
                .entry(line.menu_item_id())
                .or_insert_with(|| TopSellingItem {
                    menu_item_id: line.menu_item_id(),
                    name: line.name().to_owned(),
                    quantity_sold: 0,
                    revenue: Money::ZERO,
                });
            entry.quantity_sold = entry
                .quantity_sold
                .saturating_add(u64::from(line.quantity().value()));
            entry.revenue = entry.revenue.saturating_add(line.line_total());
        }

        let mut ranked: Vec<TopSellingItem> = per_item.into_values().collect();
        ranked.sort_by(|a, b| {
            Reverse(a.quantity_sold)
                .cmp(&Reverse(b.quantity_sold))
                .then_with(|| a.name.cmp(&b.name))
        });
        ranked.truncate(top_items);

        Self {
            date,
            total_revenue: sales.iter().map(|order| order.total()).sum(),
            order_count: sales.len(),
            top_selling_items: ranked,
        }
    }
}
