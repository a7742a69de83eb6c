//! The analytics engine and its supporting services.
//!
//! The four engine services (alignment, aggregation, performance, lots) are
//! pure functions over immutable inputs; only the price service performs
//! I/O. Calling any of them twice with identical inputs yields identical
//! outputs.

pub mod aggregation_service;
pub mod alignment_service;
pub mod lot_service;
pub mod performance_service;
pub mod price_service;
