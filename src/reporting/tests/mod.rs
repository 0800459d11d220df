//! Unit tests for sales reporting.


use crate::menu::domain::{Category, ItemName, MenuItem};
use crate::money::Money;
use crate::order::domain::{Order, OrderNumber, OrderStatus, PaymentPath, PaymentStatus, Quantity};
use mockable::DefaultClock;

fn menu_item(name: &str, cents: u64) -> MenuItem {
    MenuItem::new(
        ItemName::new(name).expect("valid name"),
        Money::from_cents(cents),
        Category::new("Mains").expect("valid category"),
        "",
        &DefaultClock,
    )
    .expect("valid menu item")
}

/// Confirmed order holding the given lines, paid when `paid` is set.
fn confirmed_order(number: u64, lines: &[(&MenuItem, u32)], paid: bool) -> Order {
    let clock = DefaultClock;
    let mut order = Order::new(OrderNumber::new(number).expect("valid number"), &clock);
    for (item, quantity) in lines {
        order
            .add_item(
                item,
                Quantity::new(*quantity).expect("valid quantity"),
                None,
                &clock,
            )
            .expect("item add");
    }
    order
        .confirm(PaymentPath::Counter, &clock)
        .expect("confirmation");
    if paid {
        order
            .transition_payment_to(PaymentStatus::Completed, &clock)
            .expect("payment");
    }
    order
}

fn cancelled(mut order: Order) -> Order {
    order
        .transition_to(OrderStatus::Cancelled, &DefaultClock)
        .expect("cancellation");
    order
}
