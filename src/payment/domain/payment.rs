//! Payment record created when money is captured.

use super::ParsePaymentMethodError;
use crate::money::Money;
use crate::order::domain::OrderId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random payment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a payment was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash at the counter.
    Cash,
    /// Card at the counter terminal.
    Card,
    /// Mobile wallet at the counter terminal.
    Mobile,
    /// Card through the ordering client.
    System,
}

impl PaymentMethod {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Mobile => "mobile",
            Self::System => "system",
        }
    }

    /// Returns `true` for methods a cashier can take in person.
    #[must_use]
    pub const fn is_counter_method(self) -> bool {
        matches!(self, Self::Cash | Self::Card | Self::Mobile)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = ParsePaymentMethodError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "mobile" => Ok(Self::Mobile),
            "system" => Ok(Self::System),
            _ => Err(ParsePaymentMethodError(value.to_owned())),
        }
    }
}

/// Immutable record of a successful capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    order_id: OrderId,
    amount: Money,
    method: PaymentMethod,
    paid_at: DateTime<Utc>,
    reference: Option<String>,
}

impl Payment {
    /// Records a captured payment.
    #[must_use]
    pub fn captured(
        order_id: OrderId,
        amount: Money,
        method: PaymentMethod,
        reference: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            order_id,
            amount,
            method,
            paid_at: clock.utc(),
            reference,
        }
    }

    /// Returns the payment identifier.
    #[must_use]
    pub const fn id(&self) -> PaymentId {
        self.id
    }

    /// Returns the paid order.
    #[must_use]
    pub const fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Returns the captured amount.
    #[must_use]
    pub const fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the settlement method.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Returns the capture timestamp.
    #[must_use]
    pub const fn paid_at(&self) -> DateTime<Utc> {
        self.paid_at
    }

    /// Returns the processor reference, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}
