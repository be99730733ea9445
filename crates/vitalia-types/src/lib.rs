//! Shared domain types for Vitalia.
//!
//! This crate contains the core domain types used across the Vitalia
//! platform: chat turns, assistant panels, gateway wire types, and
//! configuration.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono,
//! thiserror, secrecy, and base64.

pub mod assistant;
pub mod chat;
pub mod config;
pub mod panel;
