//! Port contracts for payment capture and storage.

pub mod gateway;
pub mod repository;

pub use gateway::{
    CaptureReceipt, CaptureRequest, PaymentGateway, PaymentGatewayError, PaymentGatewayResult,
};
pub use repository::{PaymentRepository, PaymentRepositoryError, PaymentRepositoryResult};
