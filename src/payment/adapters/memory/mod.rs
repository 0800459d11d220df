//! In-memory payment adapters.

mod gateway;
mod repository;

pub use gateway::SimulatedPaymentGateway;
pub use repository::InMemoryPaymentRepository;
