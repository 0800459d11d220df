//! Payment processor port used for on-system card payments.

use crate::money::Money;
use crate::order::domain::{OrderId, OrderNumber};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for payment gateway operations.
pub type PaymentGatewayResult<T> = Result<T, PaymentGatewayError>;

/// Capture request sent to the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Order being paid.
    pub order_id: OrderId,
    /// Counter-facing order number, used as the statement descriptor.
    pub order_number: OrderNumber,
    /// Amount to capture.
    pub amount: Money,
    /// Opaque card token supplied by the ordering client.
    pub card_token: String,
}

/// Processor acknowledgement of a successful capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReceipt {
    /// Processor-side transaction reference.
    pub reference: String,
}

/// Payment processor contract.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Captures the requested amount.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentGatewayError::Declined`] when the processor refuses
    /// the card and [`PaymentGatewayError::Unavailable`] when it cannot be
    /// reached.
    async fn capture(&self, request: CaptureRequest) -> PaymentGatewayResult<CaptureReceipt>;
}

/// Errors returned by payment gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    /// The processor declined the capture.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The processor could not be reached.
    #[error("payment processor unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl PaymentGatewayError {
    /// Wraps a transport error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
