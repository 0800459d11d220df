//! Simulated payment processor.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

use crate::payment::ports::{
    CaptureReceipt, CaptureRequest, PaymentGateway, PaymentGatewayError, PaymentGatewayResult,
};

/// Payment gateway that approves every capture unless told otherwise.
///
/// Scripted declines are consumed one per capture, in the order they were
/// queued.
#[derive(Debug, Clone, Default)]
pub struct SimulatedPaymentGateway {
    declines: Arc<Mutex<VecDeque<String>>>,
}

impl SimulatedPaymentGateway {
    /// Creates a gateway that approves every capture.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a decline for the next capture.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentGatewayError::Unavailable`] when the internal lock is
    /// poisoned.
    pub fn decline_next(&self, reason: impl Into<String>) -> PaymentGatewayResult<()> {
        let mut declines = self.declines.lock().map_err(|err| {
            PaymentGatewayError::unavailable(std::io::Error::other(err.to_string()))
        })?;
        declines.push_back(reason.into());
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn capture(&self, request: CaptureRequest) -> PaymentGatewayResult<CaptureReceipt> {
        let scripted = self
            .declines
            .lock()
            .map_err(|err| {
                PaymentGatewayError::unavailable(std::io::Error::other(err.to_string()))
            })?
            .pop_front();
        if let Some(reason) = scripted {
            debug!(order_id = %request.order_id, %reason, "simulated decline");
            return Err(PaymentGatewayError::Declined(reason));
        }
        let reference = format!("SIM-{}", Uuid::new_v4().simple());
        debug!(
            order_id = %request.order_id,
            amount = %request.amount,
            %reference,
            "simulated capture"
        );
        Ok(CaptureReceipt { reference })
    }
}
