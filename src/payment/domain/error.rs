//! Error types for payment parsing.

use thiserror::Error;

/// Error returned while parsing payment methods.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct ParsePaymentMethodError(pub String);
