//! Customer self-ordering: building, confirming and paying for an order.

use super::error::{OrderServiceError, OrderServiceResult, find_order_or_error};
use crate::menu::{domain::MenuItemId, ports::MenuRepository};
use crate::order::{
    domain::{
        Customization, Order, OrderDomainError, OrderId, OrderItemId, OrderStatus, PaymentPath,
        PaymentStatus, Quantity,
    },
    ports::OrderRepository,
};
use crate::payment::{
    domain::{Payment, PaymentMethod},
    ports::{CaptureRequest, PaymentGateway, PaymentRepository},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request payload for adding a menu item to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOrderItemRequest {
    order_id: OrderId,
    menu_item_id: MenuItemId,
    quantity: u32,
    customization: Option<String>,
}

impl AddOrderItemRequest {
    /// Creates a request for `quantity` units of a menu item.
    #[must_use]
    pub const fn new(order_id: OrderId, menu_item_id: MenuItemId, quantity: u32) -> Self {
        Self {
            order_id,
            menu_item_id,
            quantity,
            customization: None,
        }
    }

    /// Sets the customization text.
    #[must_use]
    pub fn with_customization(mut self, customization: impl Into<String>) -> Self {
        self.customization = Some(customization.into());
        self
    }
}

/// Request payload for editing an order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOrderItemRequest {
    order_id: OrderId,
    item_id: OrderItemId,
    quantity: u32,
    customization: Option<String>,
}

impl EditOrderItemRequest {
    /// Creates a request replacing the quantity of a line and clearing its
    /// customization.
    #[must_use]
    pub const fn new(order_id: OrderId, item_id: OrderItemId, quantity: u32) -> Self {
        Self {
            order_id,
            item_id,
            quantity,
            customization: None,
        }
    }

    /// Sets the replacement customization text.
    #[must_use]
    pub fn with_customization(mut self, customization: impl Into<String>) -> Self {
        self.customization = Some(customization.into());
        self
    }
}

/// Request payload for paying through the ordering client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPaymentRequest {
    order_id: OrderId,
    card_token: String,
}

impl SystemPaymentRequest {
    /// Creates a payment request with an opaque card token.
    #[must_use]
    pub fn new(order_id: OrderId, card_token: impl Into<String>) -> Self {
        Self {
            order_id,
            card_token: card_token.into(),
        }
    }
}

/// Result of an on-system payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The processor captured the payment.
    Captured {
        /// Order with payment `completed`.
        order: Order,
        /// Stored payment record.
        payment: Payment,
    },
    /// The processor declined or could not be reached.
    Failed {
        /// Order with payment `failed`.
        order: Order,
        /// Processor-supplied reason.
        reason: String,
    },
}

impl PaymentOutcome {
    /// Returns the order after the attempt.
    #[must_use]
    pub const fn order(&self) -> &Order {
        match self {
            Self::Captured { order, .. } | Self::Failed { order, .. } => order,
        }
    }
}

/// Customer-facing order service.
#[derive(Clone)]
pub struct CustomerService<O, M, P, G, C>
where
    O: OrderRepository,
    M: MenuRepository,
    P: PaymentRepository,
    G: PaymentGateway,
    C: Clock + Send + Sync,
{
    orders: Arc<O>,
    menu: Arc<M>,
    payments: Arc<P>,
    gateway: Arc<G>,
    clock: Arc<C>,
}

impl<O, M, P, G, C> CustomerService<O, M, P, G, C>
where
    O: OrderRepository,
    M: MenuRepository,
    P: PaymentRepository,
    G: PaymentGateway,
    C: Clock + Send + Sync,
{
    /// Creates a new customer service.
    #[must_use]
    pub const fn new(
        orders: Arc<O>,
        menu: Arc<M>,
        payments: Arc<P>,
        gateway: Arc<G>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            orders,
            menu,
            payments,
            gateway,
            clock,
        }
    }

    /// Starts a new, empty order.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the order cannot be numbered or stored.
    pub async fn start_order(&self) -> OrderServiceResult<Order> {
        let number = self.orders.next_order_number().await?;
        let order = Order::new(number, &*self.clock);
        self.orders.store(&order).await?;
        info!(order_id = %order.id(), number = %order.number(), "order started");
        Ok(order)
    }

    /// Returns an order for review.
    ///
    /// # Errors
    ///
    /// Returns [`OrderServiceError::NotFound`] when the order does not exist.
    pub async fn review_order(&self, order_id: OrderId) -> OrderServiceResult<Order> {
        debug!(%order_id, "order review");
        find_order_or_error(&*self.orders, order_id).await
    }

    /// Adds a menu item to a pending order.
    ///
    /// # Errors
    ///
    /// Returns validation errors for the quantity or customization,
    /// [`OrderServiceError::MenuItemNotFound`] for unknown menu items, and
    /// [`OrderDomainError::ItemsLocked`] once the order left `pending`.
    pub async fn add_item(&self, request: AddOrderItemRequest) -> OrderServiceResult<Order> {
        let quantity = Quantity::new(request.quantity)?;
        let customization = Customization::parse(request.customization.as_deref())?;
        let mut order = find_order_or_error(&*self.orders, request.order_id).await?;
        let revision = order.revision();
        let menu_item = self
            .menu
            .find_by_id(request.menu_item_id)
            .await?
            .ok_or(OrderServiceError::MenuItemNotFound(request.menu_item_id))?;

        let item_id = order.add_item(&menu_item, quantity, customization, &*self.clock)?;
        self.orders.update(&order, revision).await?;
        info!(
            order_id = %order.id(),
            %item_id,
            menu_item = %menu_item.name(),
            %quantity,
            total = %order.total(),
            "item added to order"
        );
        Ok(order)
    }

    /// Replaces the quantity and customization of an order line.
    ///
    /// # Errors
    ///
    /// Returns validation errors, [`OrderDomainError::OrderItemNotFound`] for
    /// unknown lines, and [`OrderDomainError::ItemsLocked`] once the order
    /// left `pending`.
    pub async fn edit_item(&self, request: EditOrderItemRequest) -> OrderServiceResult<Order> {
        let quantity = Quantity::new(request.quantity)?;
        let customization = Customization::parse(request.customization.as_deref())?;
        let mut order = find_order_or_error(&*self.orders, request.order_id).await?;
        let revision = order.revision();

        order.edit_item(request.item_id, quantity, customization, &*self.clock)?;
        self.orders.update(&order, revision).await?;
        info!(
            order_id = %order.id(),
            item_id = %request.item_id,
            %quantity,
            total = %order.total(),
            "order item edited"
        );
        Ok(order)
    }

    /// Removes a line from a pending order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::OrderItemNotFound`] for unknown lines and
    /// [`OrderDomainError::ItemsLocked`] once the order left `pending`.
    pub async fn remove_item(
        &self,
        order_id: OrderId,
        item_id: OrderItemId,
    ) -> OrderServiceResult<Order> {
        let mut order = find_order_or_error(&*self.orders, order_id).await?;
        let revision = order.revision();
        order.remove_item(item_id, &*self.clock)?;
        self.orders.update(&order, revision).await?;
        info!(%order_id, %item_id, total = %order.total(), "order item removed");
        Ok(order)
    }

    /// Confirms a pending order and records the chosen payment path.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::EmptyOrder`] for orders without items and
    /// [`OrderDomainError::InvalidStateTransition`] unless the order is
    /// `pending`.
    pub async fn confirm_order(
        &self,
        order_id: OrderId,
        path: PaymentPath,
    ) -> OrderServiceResult<Order> {
        let mut order = find_order_or_error(&*self.orders, order_id).await?;
        let revision = order.revision();
        if let Err(err) = order.confirm(path, &*self.clock) {
            warn!(%order_id, error = %err, "order confirmation rejected");
            return Err(err.into());
        }
        self.orders.update(&order, revision).await?;
        info!(
            %order_id,
            number = %order.number(),
            %path,
            total = %order.total(),
            "order confirmed"
        );
        Ok(order)
    }

    /// Pays a confirmed order through the payment processor.
    ///
    /// A previously failed payment is reopened and attempted again. Processor
    /// failures are reported through [`PaymentOutcome::Failed`] after the
    /// order's payment status has been set to `failed`.
    ///
    /// The order is read again once the processor answers, so a cancellation
    /// or payment that landed during the capture is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::PaymentNotAccepted`] unless the order is
    /// `confirmed`, [`OrderDomainError::InvalidPaymentTransition`] when it is
    /// already paid, [`OrderServiceError::CaptureNotApplied`] when the order
    /// stopped accepting payment during the capture, and repository errors.
    pub async fn pay_on_system(
        &self,
        request: SystemPaymentRequest,
    ) -> OrderServiceResult<PaymentOutcome> {
        let order = find_order_or_error(&*self.orders, request.order_id).await?;
        if order.status() != OrderStatus::Confirmed {
            return Err(OrderDomainError::PaymentNotAccepted {
                order_id: order.id(),
                status: order.status(),
            }
            .into());
        }
        order.ensure_payment_outstanding()?;

        let capture = CaptureRequest {
            order_id: order.id(),
            order_number: order.number(),
            amount: order.total(),
            card_token: request.card_token,
        };
        match self.gateway.capture(capture).await {
            Ok(receipt) => self.record_capture(order.id(), receipt.reference).await,
            Err(err) => self.record_decline(order.id(), err.to_string()).await,
        }
    }

    async fn record_capture(
        &self,
        order_id: OrderId,
        reference: String,
    ) -> OrderServiceResult<PaymentOutcome> {
        let mut order = find_order_or_error(&*self.orders, order_id).await?;
        let revision = order.revision();
        let settled = order
            .reopen_payment(&*self.clock)
            .and_then(|()| order.transition_payment_to(PaymentStatus::Completed, &*self.clock));
        if let Err(source) = settled {
            warn!(
                %order_id,
                %reference,
                error = %source,
                "captured payment could not be applied and needs a refund"
            );
            return Err(OrderServiceError::CaptureNotApplied {
                order_id,
                reference,
                source,
            });
        }
        let payment = Payment::captured(
            order_id,
            order.total(),
            PaymentMethod::System,
            Some(reference),
            &*self.clock,
        );
        self.orders.update(&order, revision).await?;
        self.payments.store(&payment).await?;
        info!(
            %order_id,
            payment_id = %payment.id(),
            amount = %payment.amount(),
            "system payment captured"
        );
        Ok(PaymentOutcome::Captured { order, payment })
    }

    async fn record_decline(
        &self,
        order_id: OrderId,
        reason: String,
    ) -> OrderServiceResult<PaymentOutcome> {
        let mut order = find_order_or_error(&*self.orders, order_id).await?;
        if order.ensure_payment_outstanding().is_ok() {
            let revision = order.revision();
            order.reopen_payment(&*self.clock)?;
            order.transition_payment_to(PaymentStatus::Failed, &*self.clock)?;
            self.orders.update(&order, revision).await?;
        }
        warn!(%order_id, error = %reason, "system payment failed");
        Ok(PaymentOutcome::Failed { order, reason })
    }
}
