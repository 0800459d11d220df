//! Envelope shape, status codes and error taxonomy of the contract layer.

use super::helpers::{
    Harness, confirmed_order, create_menu_item, data_of, expect_status, harness, order_with,
};
use orderline::api::{ApiRequest, Method};
use orderline::menu::domain::{Category, MenuItem};
use orderline::order::domain::OrderId;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn menu_endpoints_serve_the_catalog(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    create_menu_item(&harness, "Cola", 249, "Drinks").await?;
    create_menu_item(&harness, "Cheese Burger", 999, "Burgers").await?;

    let categories = harness.send(ApiRequest::get("/menu/categories")).await;
    let names: Vec<Category> = data_of(&categories)?;
    eyre::ensure!(names.iter().map(Category::as_str).eq(["Burgers", "Drinks"]));

    let burgers = harness
        .send(ApiRequest::get("/menu/items-by-category/Burgers"))
        .await;
    let listed: Vec<MenuItem> = data_of(&burgers)?;
    eyre::ensure!(listed.len() == 2);

    let all = harness.send(ApiRequest::get("/menu/items")).await;
    let every: Vec<MenuItem> = data_of(&all)?;
    eyre::ensure!(every.len() == 3);

    let details = harness
        .send(ApiRequest::get(format!("/menu/items/{}", burger.id())))
        .await;
    let fetched: MenuItem = data_of(&details)?;
    eyre::ensure!(fetched == burger);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn encoded_category_names_are_matched(harness: Harness) -> eyre::Result<()> {
    create_menu_item(&harness, "Steak Frites", 1899, "Main Course").await?;
    create_menu_item(&harness, "Cola", 249, "Drinks").await?;

    let reply = harness
        .send(ApiRequest::get("/menu/items-by-category/main%20course"))
        .await;

    let listed: Vec<MenuItem> = data_of(&reply)?;
    eyre::ensure!(listed.iter().map(|item| item.name().as_str()).eq(["Steak Frites"]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn menu_price_update_leaves_existing_lines_alone(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let order = order_with(&harness, &[(burger.id(), 1)]).await?;

    let update = harness
        .send(ApiRequest::put(
            format!("/menu/items/{}", burger.id()),
            json!({ "price": 1099, "description": "Now with more beef" }),
        ))
        .await;
    expect_status(&update, 200)?;
    let updated: MenuItem = data_of(&update)?;
    eyre::ensure!(updated.price().cents() == 1099);
    eyre::ensure!(updated.description() == "Now with more beef");

    let review = harness
        .send(ApiRequest::get(format!("/orders/{}", order.id)))
        .await;
    let data = review.data().ok_or_else(|| eyre::eyre!("missing order"))?;
    eyre::ensure!(data["total"] == 899);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_resources_answer_201_with_message(harness: Harness) -> eyre::Result<()> {
    let reply = harness.send(ApiRequest::post("/orders", json!({}))).await;

    expect_status(&reply, 201)?;
    eyre::ensure!(reply.body["status"] == "success");
    eyre::ensure!(reply.message() == Some("order created"));
    eyre::ensure!(reply.body["data"]["status"] == "pending");
    eyre::ensure!(reply.body["data"]["display_number"] == "#0001");
    Ok(())
}

#[rstest]
#[case(json!({ "name": "", "price": 100, "category": "Sides" }))]
#[case(json!({ "name": "Fries", "price": 0, "category": "Sides" }))]
#[case(json!({ "name": "Fries", "price": 100, "category": "  " }))]
#[case(json!({ "name": "Fries" }))]
#[case(json!({ "name": "Fries", "price": "cheap", "category": "Sides" }))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_menu_items_are_validation_errors(
    harness: Harness,
    #[case] body: serde_json::Value,
) -> eyre::Result<()> {
    let reply = harness.send(ApiRequest::post("/menu/items", body)).await;

    expect_status(&reply, 400)?;
    eyre::ensure!(reply.body["status"] == "error");
    eyre::ensure!(reply.message().is_some_and(|message| !message.is_empty()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_body_is_a_validation_error(harness: Harness) -> eyre::Result<()> {
    let reply = harness
        .send(ApiRequest::new(Method::Post, "/payments/process-counter"))
        .await;

    expect_status(&reply, 400)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_resources_are_not_found(harness: Harness) -> eyre::Result<()> {
    let missing_order = harness
        .send(ApiRequest::get(format!("/orders/{}", OrderId::new())))
        .await;
    expect_status(&missing_order, 404)?;

    let missing_route = harness.send(ApiRequest::get("/drive-through")).await;
    expect_status(&missing_route, 404)?;

    let missing_number = harness.send(ApiRequest::get("/orders/by-number/77")).await;
    expect_status(&missing_number, 404)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn wrong_method_is_rejected(harness: Harness) -> eyre::Result<()> {
    let reply = harness
        .send(ApiRequest::delete("/payments/pending-counter"))
        .await;

    expect_status(&reply, 405)?;
    eyre::ensure!(reply.body["status"] == "error");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_violations_are_conflicts(harness: Harness) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let order = confirmed_order(&harness, &[(burger.id(), 1)], "counter").await?;

    let locked = harness
        .send(ApiRequest::post(
            format!("/orders/{}/items", order.id),
            json!({ "menu_item_id": burger.id(), "quantity": 1 }),
        ))
        .await;
    expect_status(&locked, 409)?;

    let early_ready = harness
        .send(ApiRequest::put(
            format!("/kitchen/orders/{}/status", order.id),
            json!({ "status": "ready" }),
        ))
        .await;
    expect_status(&early_ready, 409)?;

    let bad_status = harness
        .send(ApiRequest::put(
            format!("/kitchen/orders/{}/status", order.id),
            json!({ "status": "burnt" }),
        ))
        .await;
    expect_status(&bad_status, 400)?;

    let system_at_counter = harness
        .send(ApiRequest::post(
            "/payments/process-counter",
            json!({ "order_id": order.id, "method": "system" }),
        ))
        .await;
    expect_status(&system_at_counter, 400)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_order_confirmation_is_a_validation_error(harness: Harness) -> eyre::Result<()> {
    let order = order_with(&harness, &[]).await?;

    let reply = harness
        .send(ApiRequest::put(
            format!("/orders/{}/confirm", order.id),
            json!({ "payment_path": "counter" }),
        ))
        .await;

    expect_status(&reply, 400)?;
    let unknown_path = harness
        .send(ApiRequest::put(
            format!("/orders/{}/confirm", order.id),
            json!({ "payment_path": "cheque" }),
        ))
        .await;
    expect_status(&unknown_path, 400)
}

#[rstest]
#[case(0)]
#[case(100)]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_quantities_are_validation_errors(
    harness: Harness,
    #[case] quantity: u32,
) -> eyre::Result<()> {
    let burger = create_menu_item(&harness, "Classic Burger", 899, "Burgers").await?;
    let order = order_with(&harness, &[]).await?;

    let reply = harness
        .send(ApiRequest::post(
            format!("/orders/{}/items", order.id),
            json!({ "menu_item_id": burger.id(), "quantity": quantity }),
        ))
        .await;

    expect_status(&reply, 400)
}
