//! HTTP API: routing, request/response mapping, and the in-memory product store.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
