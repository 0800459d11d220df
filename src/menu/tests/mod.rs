//! Unit tests for the menu catalog.
