//! Daily sales summaries built from orders placed through the API.

use super::helpers::{
    Harness, confirmed_order, create_menu_item, expect_status, harness, pay_at_counter,
    set_kitchen_status,
};
use chrono::Utc;
use orderline::api::ApiRequest;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_counts_paid_orders_only(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let cola = create_menu_item(&harness, "Cola", 249, "Drinks").await?;
    let fries = create_menu_item(&harness, "Fries", 299, "Sides").await?;
    let paid = confirmed_order(&harness, &[(burger.id(), 2), (cola.id(), 2)], "counter").await?;
    pay_at_counter(&harness, &paid, "cash").await?;
    let system = confirmed_order(&harness, &[(cola.id(), 1)], "system").await?;
    let captured = harness
        .send(ApiRequest::post(
            "/payments/process-system",
            json!({ "order_id": system.id, "card_token": "tok_visa" }),
        ))
        .await;
    expect_status(&captured, 200)?;
    confirmed_order(&harness, &[(fries.id(), 4)], "counter").await?;
    let cancelled = confirmed_order(&harness, &[(fries.id(), 9)], "counter").await?;
    pay_at_counter(&harness, &cancelled, "cash").await?;
    set_kitchen_status(&harness, &cancelled, "cancelled").await?;

    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let reply = harness
        .send(ApiRequest::get(format!("/reports/sales-summary/{today}")))
        .await;

    expect_status(&reply, 200)?;
    let data = reply
        .data()
        .ok_or_else(|| eyre::eyre!("missing summary data"))?;
    eyre::ensure!(data["date"] == today.as_str());
    eyre::ensure!(data["order_count"] == 2);
    eyre::ensure!(data["total_revenue"] == 2 * 899 + 3 * 249);
    let top = data["top_selling_items"]
        .as_array()
        .ok_or_else(|| eyre::eyre!("missing best sellers"))?;
    let ranking: Vec<(&str, u64)> = top
        .iter()
        .filter_map(|item| Some((item["name"].as_str()?, item["quantity_sold"].as_u64()?)))
        .collect();
    eyre::ensure!(
        ranking == vec![("Cola", 3), ("Classic Burger", 2)],
        "unexpected ranking {ranking:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn summary_for_quiet_day_is_empty(harness: Harness) -> eyre::Result<()> {
    let reply = harness
        .send(ApiRequest::get("/reports/sales-summary/2001-02-03"))
        .await;

    expect_status(&reply, 200)?;
    let data = reply
        .data()
        .ok_or_else(|| eyre::eyre!("missing summary data"))?;
    eyre::ensure!(data["order_count"] == 0);
    eyre::ensure!(data["total_revenue"] == 0);
    eyre::ensure!(data["top_selling_items"] == json!([]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_report_date_is_a_validation_error(harness: Harness) -> eyre::Result<()> {
    let reply = harness
        .send(ApiRequest::get("/reports/sales-summary/03-02-2001"))
        .await;

    expect_status(&reply, 400)?;
    eyre::ensure!(reply.body["status"] == "error");
    Ok(())
}
