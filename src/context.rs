//! Wiring of repositories, gateway and clock into the role services.
//!
//! One [`OrderingContext`] is built per process and shared by every caller.
//! Each role service holds its own `Arc` handles to the same ports.

use crate::config::{ConfigError, OrderingConfig, PollingConfig};
use crate::feed::PollingFeed;
use crate::menu::{
    adapters::memory::InMemoryMenuRepository, ports::MenuRepository, services::MenuCatalogService,
};
use crate::order::{
    adapters::memory::InMemoryOrderRepository,
    domain::Order,
    ports::OrderRepository,
    services::{CashierService, CustomerService, KitchenService},
};
use crate::payment::{
    adapters::memory::{InMemoryPaymentRepository, SimulatedPaymentGateway},
    ports::{PaymentGateway, PaymentRepository},
};
use crate::reporting::services::SalesReportService;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::info;

/// Role services sharing one set of ports.
pub struct OrderingContext<O, M, P, G, C>
where
    O: OrderRepository + 'static,
    M: MenuRepository + 'static,
    P: PaymentRepository + 'static,
    G: PaymentGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    menu: Arc<MenuCatalogService<M, C>>,
    customer: Arc<CustomerService<O, M, P, G, C>>,
    cashier: Arc<CashierService<O, P, C>>,
    kitchen: Arc<KitchenService<O, C>>,
    reports: Arc<SalesReportService<O>>,
    polling: PollingConfig,
}

impl<O, M, P, G, C> OrderingContext<O, M, P, G, C>
where
    O: OrderRepository + 'static,
    M: MenuRepository + 'static,
    P: PaymentRepository + 'static,
    G: PaymentGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Builds every role service over the given ports.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`OrderingConfig::validate`], so a feed never
    /// starts with a zero interval.
    pub fn new(
        orders: Arc<O>,
        menu: Arc<M>,
        payments: Arc<P>,
        gateway: Arc<G>,
        clock: Arc<C>,
        config: &OrderingConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            menu: Arc::new(MenuCatalogService::new(
                Arc::clone(&menu),
                Arc::clone(&clock),
            )),
            customer: Arc::new(CustomerService::new(
                Arc::clone(&orders),
                menu,
                Arc::clone(&payments),
                gateway,
                Arc::clone(&clock),
            )),
            cashier: Arc::new(CashierService::new(
                Arc::clone(&orders),
                payments,
                Arc::clone(&clock),
            )),
            kitchen: Arc::new(KitchenService::new(
                Arc::clone(&orders),
                clock,
                config.kitchen,
            )),
            reports: Arc::new(SalesReportService::new(orders, config.reporting.top_items)),
            polling: config.polling,
        })
    }

    /// Returns the menu catalog service.
    #[must_use]
    pub fn menu(&self) -> &MenuCatalogService<M, C> {
        &self.menu
    }

    /// Returns the customer service.
    #[must_use]
    pub fn customer(&self) -> &CustomerService<O, M, P, G, C> {
        &self.customer
    }

    /// Returns the cashier service.
    #[must_use]
    pub fn cashier(&self) -> &CashierService<O, P, C> {
        &self.cashier
    }

    /// Returns the kitchen service.
    #[must_use]
    pub fn kitchen(&self) -> &KitchenService<O, C> {
        &self.kitchen
    }

    /// Returns the sales report service.
    #[must_use]
    pub fn reports(&self) -> &SalesReportService<O> {
        &self.reports
    }

    /// Starts the kitchen queue feed at the configured interval.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn kitchen_queue_feed(&self) -> PollingFeed<Order> {
        let kitchen = Arc::clone(&self.kitchen);
        info!(interval_ms = self.polling.kitchen_interval_ms, "kitchen queue feed started");
        PollingFeed::spawn("kitchen-queue", self.polling.kitchen_interval(), move || {
            let service = Arc::clone(&kitchen);
            async move { service.order_queue().await }
        })
    }

    /// Starts the cashier pending-payment feed at the configured interval.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn counter_payments_feed(&self) -> PollingFeed<Order> {
        let cashier = Arc::clone(&self.cashier);
        info!(interval_ms = self.polling.cashier_interval_ms, "counter payments feed started");
        PollingFeed::spawn("counter-payments", self.polling.cashier_interval(), move || {
            let service = Arc::clone(&cashier);
            async move { service.pending_counter_payments().await }
        })
    }
}

/// Context backed by the in-memory adapters and the system clock.
pub type InMemoryOrdering = OrderingContext<
    InMemoryOrderRepository,
    InMemoryMenuRepository,
    InMemoryPaymentRepository,
    SimulatedPaymentGateway,
    DefaultClock,
>;

impl InMemoryOrdering {
    /// Builds a context over fresh in-memory stores.
    ///
    /// The returned gateway handle shares state with the one used by the
    /// customer service, so declines queued on it affect later captures.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`OrderingConfig::validate`].
    pub fn in_memory(
        config: &OrderingConfig,
    ) -> Result<(Self, SimulatedPaymentGateway), ConfigError> {
        let gateway = SimulatedPaymentGateway::new();
        let context = Self::new(
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(InMemoryMenuRepository::new()),
            Arc::new(InMemoryPaymentRepository::new()),
            Arc::new(gateway.clone()),
            Arc::new(DefaultClock),
            config,
        )?;
        Ok((context, gateway))
    }
}
