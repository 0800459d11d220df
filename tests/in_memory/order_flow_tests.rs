//! End-to-end order flows through the contract layer.

use super::helpers::{
    Harness, confirmed_order, create_menu_item, data_of, expect_status, harness, order_with,
    pay_at_counter, set_kitchen_status,
};
use orderline::api::{ApiRequest, views::OrderView};
use orderline::money::Money;
use orderline::order::domain::{OrderStatus, PaymentPath, PaymentStatus};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn counter_order_runs_from_start_to_pickup(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let cola = create_menu_item(&harness, "Cola", 249, "Drinks").await?;
    let order = confirmed_order(&harness, &[(burger.id(), 2), (cola.id(), 1)], "counter").await?;
    eyre::ensure!(order.status == OrderStatus::Confirmed);
    eyre::ensure!(order.payment_path == Some(PaymentPath::Counter));
    eyre::ensure!(order.total == Money::from_cents(2047));

    let pending = harness.send(ApiRequest::get("/payments/pending-counter")).await;
    expect_status(&pending, 200)?;
    let pending_orders: Vec<OrderView> = data_of(&pending)?;
    eyre::ensure!(pending_orders.iter().any(|listed| listed.id == order.id));

    pay_at_counter(&harness, &order, "card").await?;
    set_kitchen_status(&harness, &order, "preparing").await?;
    let ready = set_kitchen_status(&harness, &order, "ready").await?;
    eyre::ensure!(ready.status == OrderStatus::Ready);

    let pickup = harness
        .send(ApiRequest::put(format!("/orders/{}/pickup", order.id), json!({})))
        .await;
    expect_status(&pickup, 200)?;
    let completed: OrderView = data_of(&pickup)?;
    eyre::ensure!(completed.status == OrderStatus::Completed);
    eyre::ensure!(completed.payment_status == PaymentStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn declined_system_payment_is_reported_and_retried(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let order = confirmed_order(&harness, &[(burger.id(), 1)], "system").await?;
    harness.gateway.decline_next("card expired")?;
    let payment = json!({ "order_id": order.id, "card_token": "tok_visa" });

    let declined = harness
        .send(ApiRequest::post("/payments/process-system", payment.clone()))
        .await;
    expect_status(&declined, 502)?;
    eyre::ensure!(declined.body["status"] == "error");
    eyre::ensure!(
        declined
            .message()
            .is_some_and(|message| message.contains("card expired")),
        "unexpected message: {}",
        declined.body
    );
    let failed: OrderView = data_of(&declined)?;
    eyre::ensure!(failed.payment_status == PaymentStatus::Failed);

    let captured = harness
        .send(ApiRequest::post("/payments/process-system", payment))
        .await;
    expect_status(&captured, 200)?;
    eyre::ensure!(captured.message() == Some("payment completed"));
    let data = captured
        .data()
        .ok_or_else(|| eyre::eyre!("missing settlement data"))?;
    eyre::ensure!(data["order"]["payment_status"] == "completed");
    eyre::ensure!(data["payment"]["method"] == "system");
    eyre::ensure!(data["payment"]["amount"] == 899);
    eyre::ensure!(
        data["payment"]["reference"]
            .as_str()
            .is_some_and(|reference| reference.starts_with("SIM-"))
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn orders_are_looked_up_by_number(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    confirmed_order(&harness, &[(burger.id(), 1)], "counter").await?;
    let second = confirmed_order(&harness, &[(burger.id(), 3)], "counter").await?;

    let reply = harness.send(ApiRequest::get("/orders/by-number/2")).await;

    expect_status(&reply, 200)?;
    let found: OrderView = data_of(&reply)?;
    eyre::ensure!(found.id == second.id);
    eyre::ensure!(found.display_number == "#0002");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn line_edits_are_reflected_in_totals(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let cola = create_menu_item(&harness, "Cola", 249, "Drinks").await?;
    let order = order_with(&harness, &[(burger.id(), 1), (cola.id(), 2)]).await?;
    let burger_line = order
        .items
        .first()
        .ok_or_else(|| eyre::eyre!("missing burger line"))?
        .id;
    let cola_line = order
        .items
        .get(1)
        .ok_or_else(|| eyre::eyre!("missing cola line"))?
        .id;

    let edited = harness
        .send(ApiRequest::put(
            format!("/orders/{}/items/{burger_line}", order.id),
            json!({ "quantity": 2, "customization": "no pickles" }),
        ))
        .await;
    expect_status(&edited, 200)?;
    let removed = harness
        .send(ApiRequest::delete(format!(
            "/orders/{}/items/{cola_line}",
            order.id
        )))
        .await;
    expect_status(&removed, 200)?;

    let view: OrderView = data_of(&removed)?;
    eyre::ensure!(view.items.len() == 1);
    eyre::ensure!(view.total == Money::from_cents(1798));
    let line = view
        .items
        .first()
        .ok_or_else(|| eyre::eyre!("missing line"))?;
    eyre::ensure!(line.customization.as_deref() == Some("no pickles"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_order_cannot_be_picked_up(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let order = confirmed_order(&harness, &[(burger.id(), 1)], "counter").await?;

    let cancelled = harness
        .send(ApiRequest::delete(format!("/kitchen/orders/{}", order.id)))
        .await;
    expect_status(&cancelled, 200)?;
    let view: OrderView = data_of(&cancelled)?;
    eyre::ensure!(view.status == OrderStatus::Cancelled);

    let pickup = harness
        .send(ApiRequest::put(format!("/orders/{}/pickup", order.id), json!({})))
        .await;
    expect_status(&pickup, 409)?;
    eyre::ensure!(pickup.body["status"] == "error");
    eyre::ensure!(pickup.data().is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn kitchen_queue_and_cashier_list_track_progress(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let first = confirmed_order(&harness, &[(burger.id(), 1)], "counter").await?;
    let second = confirmed_order(&harness, &[(burger.id(), 1)], "system").await?;
    set_kitchen_status(&harness, &first, "preparing").await?;
    set_kitchen_status(&harness, &first, "ready").await?;

    let queue = harness.send(ApiRequest::get("/kitchen/queue")).await;
    let queued: Vec<OrderView> = data_of(&queue)?;
    eyre::ensure!(queued.iter().map(|order| order.id).eq([second.id]));

    let pending = harness.send(ApiRequest::get("/payments/pending-counter")).await;
    let unpaid: Vec<OrderView> = data_of(&pending)?;
    eyre::ensure!(unpaid.iter().map(|order| order.id).eq([first.id]));
    Ok(())
}
