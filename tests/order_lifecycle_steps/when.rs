//! When steps for order lifecycle BDD scenarios.

use super::world::{OrderLifecycleWorld, run_async};
use orderline::order::{
    domain::PaymentPath,
    services::{CounterPaymentRequest, SystemPaymentRequest},
};
use orderline::payment::domain::PaymentMethod;
use rstest_bdd_macros::when;

#[when(r#"the order is confirmed for "{path}" payment"#)]
fn confirm_order(world: &mut OrderLifecycleWorld, path: String) -> Result<(), eyre::Report> {
    let path = PaymentPath::try_from(path.as_str())
        .map_err(|err| eyre::eyre!("invalid payment path in scenario: {err}"))?;
    let order_id = world.current_order()?.id();
    let result = run_async(world.ordering.customer().confirm_order(order_id, path));
    world.record(result);
    Ok(())
}

#[when(r#"the cashier takes payment by "{method}""#)]
fn cashier_takes_payment(
    world: &mut OrderLifecycleWorld,
    method: String,
) -> Result<(), eyre::Report> {
    let method = PaymentMethod::try_from(method.as_str())
        .map_err(|err| eyre::eyre!("invalid payment method in scenario: {err}"))?;
    let order_id = world.current_order()?.id();
    let result = run_async(
        world
            .ordering
            .cashier()
            .complete_counter_payment(CounterPaymentRequest::new(order_id, method)),
    )
    .map(|settled| settled.order);
    world.record(result);
    Ok(())
}

#[when(r#"the customer pays with card token "{token}""#)]
fn customer_pays(world: &mut OrderLifecycleWorld, token: String) -> Result<(), eyre::Report> {
    let order_id = world.current_order()?.id();
    let result = run_async(
        world
            .ordering
            .customer()
            .pay_on_system(SystemPaymentRequest::new(order_id, token)),
    )
    .map(|outcome| outcome.order().clone());
    world.record(result);
    Ok(())
}

#[when("the kitchen starts preparing the order")]
fn kitchen_starts(world: &mut OrderLifecycleWorld) -> Result<(), eyre::Report> {
    let order_id = world.current_order()?.id();
    let result = run_async(world.ordering.kitchen().start_preparation(order_id));
    world.record(result);
    Ok(())
}

#[when("the kitchen marks the order ready")]
fn kitchen_marks_ready(world: &mut OrderLifecycleWorld) -> Result<(), eyre::Report> {
    let order_id = world.current_order()?.id();
    let result = run_async(world.ordering.kitchen().mark_ready(order_id));
    world.record(result);
    Ok(())
}

#[when("the cashier hands over the order")]
fn cashier_hands_over(world: &mut OrderLifecycleWorld) -> Result<(), eyre::Report> {
    let order_id = world.current_order()?.id();
    let result = run_async(world.ordering.cashier().complete_pickup(order_id));
    world.record(result);
    Ok(())
}
