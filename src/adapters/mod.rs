//! Infrastructure adapters. Implement outbound ports, drive inbound ones.
//!
//! Completion API, database probe, HTTP server. Map errors to DomainError.

pub mod ai;
pub mod http;
pub mod persistence;
