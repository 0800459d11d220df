//! Unit tests for the order lifecycle.

mod support;
