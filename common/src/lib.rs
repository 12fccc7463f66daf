//! Shared model for the records portal.
//!
//! Everything in this crate is target independent: the wasm client and the
//! static host both depend on it, and the workflow rules it carries are
//! exercised by native unit tests.

pub mod model;
pub mod requests;
pub mod validation;
