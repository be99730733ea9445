//! Observability support for Vitalia.

pub mod tracing_setup;
