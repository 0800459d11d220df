//! Order and payment status state machines.

use super::{ParseOrderStatusError, ParsePaymentPathError, ParsePaymentStatusError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// The customer is still building the order.
    Pending,
    /// The customer confirmed the order and chose how to pay.
    Confirmed,
    /// The kitchen is preparing the order.
    Preparing,
    /// The order is waiting for pickup.
    Ready,
    /// The order was handed over.
    Completed,
    /// The order was abandoned.
    Cancelled,
}

impl OrderStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` when no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns `true` when the order is visible in the kitchen queue.
    #[must_use]
    pub const fn is_queued_for_kitchen(self) -> bool {
        matches!(self, Self::Confirmed | Self::Preparing)
    }

    /// Returns `true` when payment status changes are accepted.
    ///
    /// Payments settle once the order is confirmed and until it leaves the
    /// counter.
    #[must_use]
    pub const fn accepts_payment(self) -> bool {
        matches!(self, Self::Confirmed | Self::Preparing | Self::Ready)
    }

    /// Returns `true` when the lifecycle permits moving to `target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Preparing | Self::Cancelled)
                | (Self::Preparing, Self::Ready | Self::Cancelled)
                | (Self::Ready, Self::Completed)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for OrderStatus {
    type Error = ParseOrderStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseOrderStatusError(value.to_owned())),
        }
    }
}

/// Payment status tracked alongside the order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No successful capture yet.
    Pending,
    /// Payment captured.
    Completed,
    /// The last capture attempt failed.
    Failed,
}

impl PaymentStatus {
    /// Every payment status.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Completed, Self::Failed];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` when money is still owed.
    #[must_use]
    pub const fn is_outstanding(self) -> bool {
        matches!(self, Self::Pending | Self::Failed)
    }

    /// Returns `true` when the payment lifecycle permits moving to `target`.
    ///
    /// `failed -> pending` is the explicit retry step.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Completed | Self::Failed) | (Self::Failed, Self::Pending)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PaymentStatus {
    type Error = ParsePaymentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParsePaymentStatusError(value.to_owned())),
        }
    }
}

/// Where the customer chose to settle the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPath {
    /// Card payment through the ordering client.
    System,
    /// Payment in person at the cashier.
    Counter,
}

impl PaymentPath {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Counter => "counter",
        }
    }
}

impl fmt::Display for PaymentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PaymentPath {
    type Error = ParsePaymentPathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "system" => Ok(Self::System),
            "counter" => Ok(Self::Counter),
            _ => Err(ParsePaymentPathError(value.to_owned())),
        }
    }
}
