//! Given steps for order lifecycle BDD scenarios.

use super::world::{OrderLifecycleWorld, run_async};
use eyre::WrapErr;
use orderline::menu::services::AddMenuItemRequest;
use orderline::money::Money;
use orderline::order::services::AddOrderItemRequest;
use rstest_bdd_macros::given;

#[given(r#"a menu item "{name}" priced at {cents:u64} cents in "{category}""#)]
fn menu_item_priced(
    world: &mut OrderLifecycleWorld,
    name: String,
    cents: u64,
    category: String,
) -> Result<(), eyre::Report> {
    let item = run_async(world.ordering.menu().add_item(AddMenuItemRequest::new(
        name.clone(),
        Money::from_cents(cents),
        category,
    )))
    .wrap_err("seed menu item")?;
    world.menu_items.insert(name, item);
    Ok(())
}

#[given("a new order")]
fn new_order(world: &mut OrderLifecycleWorld) -> Result<(), eyre::Report> {
    let order = run_async(world.ordering.customer().start_order()).wrap_err("start order")?;
    world.order = Some(order);
    Ok(())
}

#[given(r#"{quantity:u32} "{name}" on the order"#)]
fn items_on_order(
    world: &mut OrderLifecycleWorld,
    quantity: u32,
    name: String,
) -> Result<(), eyre::Report> {
    let order_id = world.current_order()?.id();
    let menu_item_id = world.menu_item(&name)?.id();
    let updated = run_async(world.ordering.customer().add_item(AddOrderItemRequest::new(
        order_id,
        menu_item_id,
        quantity,
    )))
    .wrap_err("add item to order")?;
    world.order = Some(updated);
    Ok(())
}

#[given(r#"the payment processor will decline the next capture with "{reason}""#)]
fn processor_declines(
    world: &mut OrderLifecycleWorld,
    reason: String,
) -> Result<(), eyre::Report> {
    world
        .gateway
        .decline_next(reason)
        .wrap_err("queue simulated decline")
}
