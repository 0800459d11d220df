//! Shared fixtures for order tests.

use std::sync::Arc;

use crate::menu::{
    adapters::memory::InMemoryMenuRepository,
    domain::{Category, ItemName, MenuItem},
    ports::MenuRepository,
};
use crate::money::Money;
use crate::order::{
    adapters::memory::InMemoryOrderRepository,
    domain::{Order, OrderNumber, PaymentPath, Quantity},
    services::{
        AddOrderItemRequest, CashierService, CustomerService, KitchenPolicy, KitchenService,
    },
};
use crate::payment::{adapters::memory::InMemoryPaymentRepository, ports::PaymentGateway};
use mockable::DefaultClock;

pub(super) type TestCustomer<G> = CustomerService<
    InMemoryOrderRepository,
    InMemoryMenuRepository,
    InMemoryPaymentRepository,
    G,
    DefaultClock,
>;
pub(super) type TestCashier =
    CashierService<InMemoryOrderRepository, InMemoryPaymentRepository, DefaultClock>;
pub(super) type TestKitchen = KitchenService<InMemoryOrderRepository, DefaultClock>;

pub(super) fn menu_item(name: &str, cents: u64, category: &str) -> MenuItem {
    MenuItem::new(
        ItemName::new(name).expect("valid name"),
        Money::from_cents(cents),
        Category::new(category).expect("valid category"),
        "",
        &DefaultClock,
    )
    .expect("valid menu item")
}

/// Pending order #1 holding `quantity` units of `item`.
pub(super) fn pending_order_with(item: &MenuItem, quantity: u32) -> Order {
    let mut order = Order::new(OrderNumber::new(1).expect("valid number"), &DefaultClock);
    order
        .add_item(
            item,
            Quantity::new(quantity).expect("valid quantity"),
            None,
            &DefaultClock,
        )
        .expect("pending order accepts items");
    order
}

/// In-memory stores shared by the services under test.
pub(super) struct Stores {
    pub(super) orders: Arc<InMemoryOrderRepository>,
    pub(super) menu: Arc<InMemoryMenuRepository>,
    pub(super) payments: Arc<InMemoryPaymentRepository>,
    pub(super) burger: MenuItem,
    pub(super) cola: MenuItem,
}

impl Stores {
    /// Creates stores with a burger (8.99) and a cola (2.49) on the menu.
    pub(super) async fn seeded() -> Self {
        let stores = Self {
            orders: Arc::new(InMemoryOrderRepository::new()),
            menu: Arc::new(InMemoryMenuRepository::new()),
            payments: Arc::new(InMemoryPaymentRepository::new()),
            burger: menu_item("Classic Burger", 899, "Burgers"),
            cola: menu_item("Cola", 249, "Drinks"),
        };
        for item in [&stores.burger, &stores.cola] {
            stores.menu.store(item).await.expect("menu seeding");
        }
        stores
    }

    pub(super) fn customer<G: PaymentGateway>(&self, gateway: G) -> TestCustomer<G> {
        CustomerService::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.menu),
            Arc::clone(&self.payments),
            Arc::new(gateway),
            Arc::new(DefaultClock),
        )
    }

    pub(super) fn cashier(&self) -> TestCashier {
        CashierService::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.payments),
            Arc::new(DefaultClock),
        )
    }

    pub(super) fn kitchen(&self, policy: KitchenPolicy) -> TestKitchen {
        KitchenService::new(Arc::clone(&self.orders), Arc::new(DefaultClock), policy)
    }
}

/// Starts an order with `quantity` burgers and confirms it on `path`.
pub(super) async fn confirmed_order<G: PaymentGateway>(
    customer: &TestCustomer<G>,
    stores: &Stores,
    quantity: u32,
    path: PaymentPath,
) -> Order {
    let order = customer.start_order().await.expect("order start");
    customer
        .add_item(AddOrderItemRequest::new(
            order.id(),
            stores.burger.id(),
            quantity,
        ))
        .await
        .expect("item add");
    customer
        .confirm_order(order.id(), path)
        .await
        .expect("confirmation")
}
