//! Infrastructure layer for Vitalia.
//!
//! Contains the implementation of the gateway port defined in
//! `vitalia-core`: the reqwest edge-function client, the incremental
//! SSE delta decoder it is built on, and configuration loading.

pub mod config;
pub mod gateway;
