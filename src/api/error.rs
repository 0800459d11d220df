//! Error taxonomy of the contract layer.

use crate::menu::{ports::MenuRepositoryError, services::MenuServiceError};
use crate::order::{
    domain::OrderDomainError, ports::OrderRepositoryError, services::OrderServiceError,
};
use crate::payment::ports::PaymentRepositoryError;
use crate::reporting::services::ReportServiceError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Broad class of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The request was malformed or broke a validation rule.
    Validation,
    /// The request conflicts with the current lifecycle state.
    State,
    /// A referenced resource does not exist.
    NotFound,
    /// Storage or the payment processor failed.
    Transport,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validation => "validation",
            Self::State => "state",
            Self::NotFound => "not_found",
            Self::Transport => "transport",
        })
    }
}

/// Failed request, ready to be rendered into an error envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    category: ErrorCategory,
    status_code: u16,
    message: String,
}

impl ApiError {
    /// Creates a 400 validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, 400, message)
    }

    /// Creates a 404 error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::NotFound, 404, message)
    }

    /// Creates a 405 error for an unsupported method.
    #[must_use]
    pub fn method_not_allowed(method: &str) -> Self {
        Self::new(
            ErrorCategory::Validation,
            405,
            format!("method {method} is not allowed on this path"),
        )
    }

    /// Creates a 409 lifecycle conflict.
    #[must_use]
    pub fn state(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::State, 409, message)
    }

    /// Creates a 500 storage failure.
    #[must_use]
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Transport, 500, message)
    }

    /// Creates a 502 payment processor failure.
    #[must_use]
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Transport, 502, message)
    }

    fn new(category: ErrorCategory, status_code: u16, message: impl Into<String>) -> Self {
        Self {
            category,
            status_code,
            message: message.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Returns the HTTP-style status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<OrderDomainError> for ApiError {
    fn from(err: OrderDomainError) -> Self {
        match err {
            OrderDomainError::InvalidQuantity(_)
            | OrderDomainError::CustomizationTooLong { .. }
            | OrderDomainError::InvalidOrderNumber(_)
            | OrderDomainError::EmptyOrder(_) => Self::validation(err.to_string()),
            OrderDomainError::OrderItemNotFound { .. } => Self::not_found(err.to_string()),
            OrderDomainError::InvalidStateTransition { .. }
            | OrderDomainError::InvalidPaymentTransition { .. }
            | OrderDomainError::ItemsLocked { .. }
            | OrderDomainError::PaymentNotAccepted { .. }
            | OrderDomainError::PaymentNotSettled(_) => Self::state(err.to_string()),
        }
    }
}

impl From<OrderRepositoryError> for ApiError {
    fn from(err: OrderRepositoryError) -> Self {
        match err {
            OrderRepositoryError::NotFound(_) => Self::not_found(err.to_string()),
            OrderRepositoryError::DuplicateOrder(_)
            | OrderRepositoryError::DuplicateOrderNumber(_)
            | OrderRepositoryError::Conflict { .. } => Self::state(err.to_string()),
            OrderRepositoryError::Persistence(_) => Self::persistence(err.to_string()),
        }
    }
}

impl From<MenuRepositoryError> for ApiError {
    fn from(err: MenuRepositoryError) -> Self {
        match err {
            MenuRepositoryError::NotFound(_) => Self::not_found(err.to_string()),
            MenuRepositoryError::DuplicateItem(_) => Self::state(err.to_string()),
            MenuRepositoryError::Persistence(_) => Self::persistence(err.to_string()),
        }
    }
}

impl From<PaymentRepositoryError> for ApiError {
    fn from(err: PaymentRepositoryError) -> Self {
        match err {
            PaymentRepositoryError::AlreadyPaid(_) => Self::state(err.to_string()),
            PaymentRepositoryError::Persistence(_) => Self::persistence(err.to_string()),
        }
    }
}

impl From<OrderServiceError> for ApiError {
    fn from(err: OrderServiceError) -> Self {
        match err {
            OrderServiceError::Domain(inner) => inner.into(),
            OrderServiceError::Repository(inner) => inner.into(),
            OrderServiceError::Menu(inner) => inner.into(),
            OrderServiceError::PaymentRecord(inner) => inner.into(),
            OrderServiceError::NotFound(_)
            | OrderServiceError::NumberNotFound(_)
            | OrderServiceError::MenuItemNotFound(_) => Self::not_found(err.to_string()),
            OrderServiceError::CaptureNotApplied { .. } => Self::state(err.to_string()),
            OrderServiceError::InvalidStatus(_)
            | OrderServiceError::UnsupportedKitchenStatus(_)
            | OrderServiceError::NotCounterMethod(_) => Self::validation(err.to_string()),
        }
    }
}

impl From<MenuServiceError> for ApiError {
    fn from(err: MenuServiceError) -> Self {
        match err {
            MenuServiceError::Domain(inner) => Self::validation(inner.to_string()),
            MenuServiceError::Repository(inner) => inner.into(),
            MenuServiceError::NotFound(_) => Self::not_found(err.to_string()),
        }
    }
}

impl From<ReportServiceError> for ApiError {
    fn from(err: ReportServiceError) -> Self {
        match err {
            ReportServiceError::InvalidDate(_) => Self::validation(err.to_string()),
            ReportServiceError::Repository(inner) => inner.into(),
        }
    }
}
