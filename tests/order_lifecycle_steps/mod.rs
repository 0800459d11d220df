//! Step definitions for order lifecycle BDD scenarios.

pub mod world;

mod given;
mod when;
