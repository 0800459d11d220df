//! Order aggregate root.

use super::{
    Customization, OrderDomainError, OrderId, OrderItem, OrderItemId, OrderNumber, OrderStatus,
    PaymentPath, PaymentStatus, Quantity,
};
use crate::menu::domain::MenuItem;
use crate::money::Money;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Order aggregate root.
///
/// Every mutator validates before it writes, so a rejected call leaves the
/// order exactly as it was. Each accepted mutation bumps the revision, which
/// repositories compare to detect concurrent writers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    number: OrderNumber,
    items: Vec<OrderItem>,
    status: OrderStatus,
    payment_status: PaymentStatus,
    payment_path: Option<PaymentPath>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    revision: u64,
}

impl Order {
    /// Starts a new, empty order.
    #[must_use]
    pub fn new(number: OrderNumber, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: OrderId::new(),
            number,
            items: Vec::new(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_path: None,
            created_at: timestamp,
            updated_at: timestamp,
            revision: 0,
        }
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the counter-facing order number.
    #[must_use]
    pub const fn number(&self) -> OrderNumber {
        self.number
    }

    /// Returns the order lines in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns a single order line.
    #[must_use]
    pub fn item(&self, item_id: OrderItemId) -> Option<&OrderItem> {
        self.items.iter().find(|item| item.id() == item_id)
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Returns the payment path chosen at confirmation.
    #[must_use]
    pub const fn payment_path(&self) -> Option<PaymentPath> {
        self.payment_path
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the number of accepted mutations since the order started.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the sum of every line's `quantity × unit_price`.
    #[must_use]
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Adds a menu item, capturing its current price.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::ItemsLocked`] unless the order is
    /// `pending`.
    pub fn add_item(
        &mut self,
        menu_item: &MenuItem,
        quantity: Quantity,
        customization: Option<Customization>,
        clock: &impl Clock,
    ) -> Result<OrderItemId, OrderDomainError> {
        self.ensure_items_editable()?;
        let line = OrderItem::from_menu_item(menu_item, quantity, customization);
        let line_id = line.id();
        self.items.push(line);
        self.touch(clock);
        Ok(line_id)
    }

    /// Replaces the quantity and customization of a line.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::ItemsLocked`] unless the order is
    /// `pending`, or [`OrderDomainError::OrderItemNotFound`] for an unknown
    /// line.
    pub fn edit_item(
        &mut self,
        item_id: OrderItemId,
        quantity: Quantity,
        customization: Option<Customization>,
        clock: &impl Clock,
    ) -> Result<(), OrderDomainError> {
        self.ensure_items_editable()?;
        let order_id = self.id;
        let line = self
            .items
            .iter_mut()
            .find(|item| item.id() == item_id)
            .ok_or(OrderDomainError::OrderItemNotFound { order_id, item_id })?;
        line.revise(quantity, customization);
        self.touch(clock);
        Ok(())
    }

    /// Removes a line and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::ItemsLocked`] unless the order is
    /// `pending`, or [`OrderDomainError::OrderItemNotFound`] for an unknown
    /// line.
    pub fn remove_item(
        &mut self,
        item_id: OrderItemId,
        clock: &impl Clock,
    ) -> Result<OrderItem, OrderDomainError> {
        self.ensure_items_editable()?;
        let position = self
            .items
            .iter()
            .position(|item| item.id() == item_id)
            .ok_or(OrderDomainError::OrderItemNotFound {
                order_id: self.id,
                item_id,
            })?;
        let removed = self.items.remove(position);
        self.touch(clock);
        Ok(removed)
    }

    /// Confirms the order and records how the customer will pay.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidStateTransition`] unless the order
    /// is `pending`, or [`OrderDomainError::EmptyOrder`] when it has no
    /// items.
    pub fn confirm(
        &mut self,
        path: PaymentPath,
        clock: &impl Clock,
    ) -> Result<(), OrderDomainError> {
        self.transition_to(OrderStatus::Confirmed, clock)?;
        self.payment_path = Some(path);
        Ok(())
    }

    /// Moves the order to `target` when the lifecycle allows it.
    ///
    /// Besides the transition table, confirming needs at least one item and
    /// completing needs a settled payment.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::InvalidStateTransition`] for transitions
    /// outside the lifecycle, [`OrderDomainError::EmptyOrder`] or
    /// [`OrderDomainError::PaymentNotSettled`] for unmet guards.
    pub fn transition_to(
        &mut self,
        target: OrderStatus,
        clock: &impl Clock,
    ) -> Result<(), OrderDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(OrderDomainError::InvalidStateTransition {
                order_id: self.id,
                from: self.status,
                to: target,
            });
        }
        match target {
            OrderStatus::Confirmed if self.items.is_empty() => {
                return Err(OrderDomainError::EmptyOrder(self.id));
            }
            OrderStatus::Completed if self.payment_status != PaymentStatus::Completed => {
                return Err(OrderDomainError::PaymentNotSettled(self.id));
            }
            _ => {}
        }
        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Moves the payment status to `target` when allowed.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::PaymentNotAccepted`] when the order status
    /// does not accept payment changes, or
    /// [`OrderDomainError::InvalidPaymentTransition`] for transitions outside
    /// the payment lifecycle.
    pub fn transition_payment_to(
        &mut self,
        target: PaymentStatus,
        clock: &impl Clock,
    ) -> Result<(), OrderDomainError> {
        if !self.status.accepts_payment() {
            return Err(OrderDomainError::PaymentNotAccepted {
                order_id: self.id,
                status: self.status,
            });
        }
        if !self.payment_status.can_transition_to(target) {
            return Err(OrderDomainError::InvalidPaymentTransition {
                order_id: self.id,
                from: self.payment_status,
                to: target,
            });
        }
        self.payment_status = target;
        self.touch(clock);
        Ok(())
    }

    /// Reopens a failed payment so it can be attempted again.
    ///
    /// Does nothing when the payment is already `pending`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Order::transition_payment_to`].
    pub fn reopen_payment(&mut self, clock: &impl Clock) -> Result<(), OrderDomainError> {
        if self.payment_status == PaymentStatus::Failed {
            self.transition_payment_to(PaymentStatus::Pending, clock)?;
        }
        Ok(())
    }

    /// Checks that a capture attempt could settle this order's payment.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::PaymentNotAccepted`] when the order status
    /// does not accept payment changes, or
    /// [`OrderDomainError::InvalidPaymentTransition`] when the payment is
    /// already completed.
    pub const fn ensure_payment_outstanding(&self) -> Result<(), OrderDomainError> {
        if !self.status.accepts_payment() {
            return Err(OrderDomainError::PaymentNotAccepted {
                order_id: self.id,
                status: self.status,
            });
        }
        if !self.payment_status.is_outstanding() {
            return Err(OrderDomainError::InvalidPaymentTransition {
                order_id: self.id,
                from: self.payment_status,
                to: PaymentStatus::Completed,
            });
        }
        Ok(())
    }

    fn ensure_items_editable(&self) -> Result<(), OrderDomainError> {
        if self.status != OrderStatus::Pending {
            return Err(OrderDomainError::ItemsLocked {
                order_id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Stamps `updated_at` and bumps the revision.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.revision = self.revision.saturating_add(1);
    }
}
