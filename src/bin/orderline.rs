//! Runs a scripted service day against the in-memory ordering services.
//!
//! Usage:
//!
//! ```text
//! orderline [config-path]
//! ```
//!
//! The optional `config-path` points at a JSON [`OrderingConfig`]. Without it
//! the defaults are used. Every request and reply is logged through
//! `tracing`; set `RUST_LOG=orderline=debug` for service-level detail.

use camino::Utf8PathBuf;
use mockable::DefaultClock;
use orderline::api::{ApiReply, ApiRequest, OrderingApi};
use orderline::config::{ConfigError, OrderingConfig};
use orderline::context::InMemoryOrdering;
use orderline::menu::adapters::memory::InMemoryMenuRepository;
use orderline::order::adapters::memory::InMemoryOrderRepository;
use orderline::payment::adapters::memory::{InMemoryPaymentRepository, SimulatedPaymentGateway};
use orderline::telemetry::init_tracing;
use serde_json::{Value, json};
use std::env;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

type DemoApi = OrderingApi<
    InMemoryOrderRepository,
    InMemoryMenuRepository,
    InMemoryPaymentRepository,
    SimulatedPaymentGateway,
    DefaultClock,
>;

const MENU: [(&str, u64, &str, &str); 5] = [
    ("Classic Burger", 899, "Burgers", "Beef patty, lettuce, tomato"),
    ("Cheese Burger", 999, "Burgers", "Classic burger with cheddar"),
    ("Fries", 299, "Sides", "Salted, skin on"),
    ("Cola", 249, "Drinks", ""),
    ("Apple Pie", 349, "Desserts", "Served warm"),
];

/// Errors that stop the scripted day.
#[derive(Debug, Error)]
enum DemoError {
    #[error("configuration failed: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("{step} was rejected with status {status}: {body}")]
    Rejected {
        step: &'static str,
        status: u16,
        body: Value,
    },
    #[error("{step} reply has no '{field}' field")]
    MissingField {
        step: &'static str,
        field: &'static str,
    },
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    init_tracing();
    let config = load_config()?;
    let (ordering, gateway) = InMemoryOrdering::in_memory(&config)?;
    let api = OrderingApi::new(Arc::new(ordering));

    let menu = seed_menu(&api).await?;
    counter_order(&api, &menu).await?;
    gateway.decline_next("card expired")?;
    system_order(&api, &menu).await?;
    daily_report(&api).await?;
    Ok(())
}

fn collect_args() -> Result<Vec<Utf8PathBuf>, DemoError> {
    env::args_os()
        .skip(1)
        .map(|arg_os| {
            let arg = arg_os
                .into_string()
                .map_err(|_| DemoError::InvalidArgs("argument is not valid UTF-8".into()))?;
            Ok(Utf8PathBuf::from(arg))
        })
        .collect()
}

fn load_config() -> Result<OrderingConfig, DemoError> {
    let mut args = collect_args()?.into_iter();
    let config_path = args.next();
    if let Some(extra) = args.next() {
        return Err(DemoError::InvalidArgs(format!("unexpected extra argument: {extra}")));
    }
    match config_path {
        Some(path) => {
            info!(%path, "loading configuration");
            Ok(OrderingConfig::from_path(&path)?)
        }
        None => Ok(OrderingConfig::default()),
    }
}

async fn send(
    api: &DemoApi,
    step: &'static str,
    request: ApiRequest,
) -> Result<ApiReply, DemoError> {
    let method = request.method;
    let path = request.path.clone();
    let reply = api.handle(request).await;
    info!(step, %method, %path, status = reply.status_code, body = %reply.body, "reply");
    if reply.is_success() {
        Ok(reply)
    } else {
        Err(DemoError::Rejected {
            step,
            status: reply.status_code,
            body: reply.body,
        })
    }
}

fn field(reply: &ApiReply, step: &'static str, name: &'static str) -> Result<String, DemoError> {
    reply
        .data()
        .and_then(|data| data.get(name))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or(DemoError::MissingField { step, field: name })
}

async fn seed_menu(api: &DemoApi) -> Result<Vec<String>, DemoError> {
    let mut ids = Vec::with_capacity(MENU.len());
    for (name, cents, category, description) in MENU {
        let body = json!({
            "name": name,
            "price": cents,
            "category": category,
            "description": description,
        });
        let reply = send(api, "add menu item", ApiRequest::post("/menu/items", body)).await?;
        ids.push(field(&reply, "add menu item", "id")?);
    }
    send(api, "list categories", ApiRequest::get("/menu/categories")).await?;
    Ok(ids)
}

async fn new_order(api: &DemoApi, lines: &[(&String, u32)]) -> Result<String, DemoError> {
    let created = send(api, "start order", ApiRequest::post("/orders", json!({}))).await?;
    let order_id = field(&created, "start order", "id")?;
    for (menu_item_id, quantity) in lines {
        let body = json!({ "menu_item_id": menu_item_id, "quantity": quantity });
        let path = format!("/orders/{order_id}/items");
        send(api, "add item", ApiRequest::post(path, body)).await?;
    }
    Ok(order_id)
}

async fn confirm(api: &DemoApi, order_id: &str, payment_path: &str) -> Result<(), DemoError> {
    let body = json!({ "payment_path": payment_path });
    let path = format!("/orders/{order_id}/confirm");
    send(api, "confirm order", ApiRequest::put(path, body)).await?;
    Ok(())
}

async fn kitchen_status(api: &DemoApi, order_id: &str, status: &str) -> Result<(), DemoError> {
    let path = format!("/kitchen/orders/{order_id}/status");
    let body = json!({ "status": status });
    send(api, "kitchen status", ApiRequest::put(path, body)).await?;
    Ok(())
}

async fn counter_order(api: &DemoApi, menu: &[String]) -> Result<(), DemoError> {
    let lines: Vec<(&String, u32)> = menu.iter().take(3).zip([2, 1, 2]).collect();
    let order_id = new_order(api, &lines).await?;
    confirm(api, &order_id, "counter").await?;
    send(api, "kitchen queue", ApiRequest::get("/kitchen/queue")).await?;
    send(
        api,
        "pending counter payments",
        ApiRequest::get("/payments/pending-counter"),
    )
    .await?;
    let payment = json!({ "order_id": order_id, "method": "cash" });
    send(
        api,
        "counter payment",
        ApiRequest::post("/payments/process-counter", payment),
    )
    .await?;
    kitchen_status(api, &order_id, "preparing").await?;
    kitchen_status(api, &order_id, "ready").await?;
    let pickup = format!("/orders/{order_id}/pickup");
    send(api, "pickup", ApiRequest::put(pickup, json!({}))).await?;
    Ok(())
}

async fn system_order(api: &DemoApi, menu: &[String]) -> Result<(), DemoError> {
    let lines: Vec<(&String, u32)> = menu.iter().skip(3).zip([1, 1]).collect();
    let order_id = new_order(api, &lines).await?;
    confirm(api, &order_id, "system").await?;
    let payment = json!({ "order_id": order_id, "card_token": "tok_demo" });

    let declined = api
        .handle(ApiRequest::post("/payments/process-system", payment.clone()))
        .await;
    info!(
        status = declined.status_code,
        message = declined.message().unwrap_or_default(),
        "first card attempt"
    );
    send(
        api,
        "card payment retry",
        ApiRequest::post("/payments/process-system", payment),
    )
    .await?;
    kitchen_status(api, &order_id, "preparing").await?;
    kitchen_status(api, &order_id, "ready").await?;
    let pickup = format!("/orders/{order_id}/pickup");
    send(api, "pickup", ApiRequest::put(pickup, json!({}))).await?;
    Ok(())
}

async fn daily_report(api: &DemoApi) -> Result<(), DemoError> {
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d");
    send(
        api,
        "sales summary",
        ApiRequest::get(format!("/reports/sales-summary/{today}")),
    )
    .await?;
    Ok(())
}
