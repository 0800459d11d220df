//! Orderline: fast-food order lifecycle.
//!
//! This crate models self-service ordering for a fast-food counter. Customers
//! build and pay for orders, cashiers settle counter payments, the kitchen
//! works through its queue and managers maintain the menu and read sales
//! reports.
//!
//! # Architecture
//!
//! Orderline follows hexagonal architecture principles:
//!
//! - **Domain**: Order and payment state machines with no infrastructure
//!   dependencies
//! - **Ports**: Repository and payment processor traits
//! - **Adapters**: In-memory repositories and a simulated processor
//! - **Services**: One service per role, sharing ports through `Arc`
//!
//! # Modules
//!
//! - [`menu`]: Menu catalog
//! - [`order`]: Order lifecycle and the customer, cashier and kitchen roles
//! - [`payment`]: Payment records and the processor port
//! - [`reporting`]: Daily sales summaries
//! - [`api`]: Transport-agnostic REST contract
//! - [`feed`]: Polling feeds for the cashier and kitchen views
//! - [`context`]: Wiring of ports into role services

pub mod api;
pub mod config;
pub mod context;
pub mod feed;
pub mod menu;
pub mod money;
pub mod order;
pub mod payment;
pub mod reporting;
pub mod telemetry;
