//! Business logic and gateway port definitions for Vitalia.
//!
//! This crate defines the "port" (the [`gateway::port::AssistantGateway`]
//! trait) that the infrastructure layer implements, plus the chat panel
//! state machine built on top of it. It depends only on `vitalia-types`
//! -- never on `vitalia-infra` or any HTTP/IO crate.

pub mod chat;
pub mod gateway;
