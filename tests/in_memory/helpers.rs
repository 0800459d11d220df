//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use eyre::{WrapErr, ensure};
use mockable::DefaultClock;
use orderline::api::{ApiReply, ApiRequest, OrderingApi, views::OrderView};
use orderline::config::OrderingConfig;
use orderline::context::InMemoryOrdering;
use orderline::menu::{
    adapters::memory::InMemoryMenuRepository,
    domain::{MenuItem, MenuItemId},
};
use orderline::order::adapters::memory::InMemoryOrderRepository;
use orderline::payment::adapters::memory::{InMemoryPaymentRepository, SimulatedPaymentGateway};
use rstest::fixture;
use serde::de::DeserializeOwned;
use serde_json::json;

/// Contract layer over the in-memory adapters.
pub type TestApi = OrderingApi<
    InMemoryOrderRepository,
    InMemoryMenuRepository,
    InMemoryPaymentRepository,
    SimulatedPaymentGateway,
    DefaultClock,
>;

/// API plus a handle on the simulated processor behind it.
pub struct Harness {
    pub api: TestApi,
    pub gateway: SimulatedPaymentGateway,
}

impl Harness {
    /// Builds a harness with the given configuration.
    #[must_use]
    pub fn with_config(config: &OrderingConfig) -> Self {
        let (ordering, gateway) =
            InMemoryOrdering::in_memory(config).expect("valid configuration");
        Self {
            api: OrderingApi::new(Arc::new(ordering)),
            gateway,
        }
    }

    /// Sends a request through the contract layer.
    pub async fn send(&self, request: ApiRequest) -> ApiReply {
        self.api.handle(request).await
    }
}

/// Provides a harness with the default configuration.
#[fixture]
pub fn harness() -> Harness {
    Harness::with_config(&OrderingConfig::default())
}

/// Decodes the `data` member of a reply.
///
/// # Errors
///
/// Returns an error when the reply has no data or the data does not match
/// `T`.
pub fn data_of<T: DeserializeOwned>(reply: &ApiReply) -> eyre::Result<T> {
    let data = reply
        .data()
        .cloned()
        .ok_or_else(|| eyre::eyre!("reply has no data: {}", reply.body))?;
    serde_json::from_value(data).wrap_err("decode reply data")
}

/// Checks the status code of a reply.
///
/// # Errors
///
/// Returns an error naming the body when the code differs.
pub fn expect_status(reply: &ApiReply, expected: u16) -> eyre::Result<()> {
    ensure!(
        reply.status_code == expected,
        "expected status {expected}, got {}: {}",
        reply.status_code,
        reply.body
    );
    Ok(())
}

/// Creates a menu item through the API.
///
/// # Errors
///
/// Returns an error when the item is not created.
pub async fn create_menu_item(
    harness: &Harness,
    name: &str,
    cents: u64,
    category: &str,
) -> eyre::Result<MenuItem> {
    let reply = harness
        .send(ApiRequest::post(
            "/menu/items",
            json!({ "name": name, "price": cents, "category": category }),
        ))
        .await;
    expect_status(&reply, 201)?;
    data_of(&reply)
}

/// Starts an order and adds `lines` to it.
///
/// # Errors
///
/// Returns an error when any request fails.
pub async fn order_with(
    harness: &Harness,
    lines: &[(MenuItemId, u32)],
) -> eyre::Result<OrderView> {
    let created = harness.send(ApiRequest::post("/orders", json!({}))).await;
    expect_status(&created, 201)?;
    let mut order: OrderView = data_of(&created)?;
    for (menu_item_id, quantity) in lines {
        let reply = harness
            .send(ApiRequest::post(
                format!("/orders/{}/items", order.id),
                json!({ "menu_item_id": menu_item_id, "quantity": quantity }),
            ))
            .await;
        expect_status(&reply, 201)?;
        order = data_of(&reply)?;
    }
    Ok(order)
}

/// Starts an order with `lines` and confirms it on `payment_path`.
///
/// # Errors
///
/// Returns an error when any request fails.
pub async fn confirmed_order(
    harness: &Harness,
    lines: &[(MenuItemId, u32)],
    payment_path: &str,
) -> eyre::Result<OrderView> {
    let order = order_with(harness, lines).await?;
    let reply = harness
        .send(ApiRequest::put(
            format!("/orders/{}/confirm", order.id),
            json!({ "payment_path": payment_path }),
        ))
        .await;
    expect_status(&reply, 200)?;
    data_of(&reply)
}

/// Settles an order at the counter.
///
/// # Errors
///
/// Returns an error when the payment is refused.
pub async fn pay_at_counter(
    harness: &Harness,
    order: &OrderView,
    method: &str,
) -> eyre::Result<()> {
    let reply = harness
        .send(ApiRequest::post(
            "/payments/process-counter",
            json!({ "order_id": order.id, "method": method }),
        ))
        .await;
    expect_status(&reply, 200)
}

/// Sets a kitchen status by name.
///
/// # Errors
///
/// Returns an error when the status change is refused.
pub async fn set_kitchen_status(
    harness: &Harness,
    order: &OrderView,
    status: &str,
) -> eyre::Result<OrderView> {
    let reply = harness
        .send(ApiRequest::put(
            format!("/kitchen/orders/{}/status", order.id),
            json!({ "status": status }),
        ))
        .await;
    expect_status(&reply, 200)?;
    data_of(&reply)
}
