//! Database adapters. Only a reachability probe; the service persists nothing.

pub mod libsql_probe;

pub use libsql_probe::LibsqlProbe;
