//! In-memory order adapters.

mod order;

pub use order::InMemoryOrderRepository;
