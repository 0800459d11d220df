//! Shared world state for order lifecycle BDD scenarios.

use std::collections::HashMap;

use orderline::config::OrderingConfig;
use orderline::context::InMemoryOrdering;
use orderline::menu::domain::MenuItem;
use orderline::order::{domain::Order, services::OrderServiceError};
use orderline::payment::adapters::memory::SimulatedPaymentGateway;
use rstest::fixture;

/// Scenario world for order lifecycle behaviour tests.
pub struct OrderLifecycleWorld {
    pub ordering: InMemoryOrdering,
    pub gateway: SimulatedPaymentGateway,
    pub menu_items: HashMap<String, MenuItem>,
    pub order: Option<Order>,
    pub last_result: Option<Result<Order, OrderServiceError>>,
}

impl OrderLifecycleWorld {
    /// Creates a world over fresh in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let (ordering, gateway) = InMemoryOrdering::in_memory(&OrderingConfig::default())
            .expect("default configuration is valid");
        Self {
            ordering,
            gateway,
            menu_items: HashMap::new(),
            order: None,
            last_result: None,
        }
    }

    /// Returns the order under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no order has been started yet.
    pub fn current_order(&self) -> Result<&Order, eyre::Report> {
        self.order
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing order in scenario world"))
    }

    /// Returns a seeded menu item by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the item was not seeded by a given step.
    pub fn menu_item(&self, name: &str) -> Result<&MenuItem, eyre::Report> {
        self.menu_items
            .get(name)
            .ok_or_else(|| eyre::eyre!("menu item '{name}' was not seeded"))
    }

    /// Records the outcome of an action, keeping the order on success.
    pub fn record(&mut self, result: Result<Order, OrderServiceError>) {
        if let Ok(ref updated) = result {
            self.order = Some(updated.clone());
        }
        self.last_result = Some(result);
    }
}

impl Default for OrderLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> OrderLifecycleWorld {
    OrderLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
