//! Library entry point for the Saheli deepfake analyzer backend.
//!
//! Exports all core modules for use in integration tests and by the main binary.

pub mod handlers;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod tracing;
pub mod detection {
    pub mod analyzer;
    pub use analyzer::*;
}

pub use detection::*;
pub use handlers::*;
pub use models::*;
pub use services::*;
pub use telemetry::*;
