//! Proxy client catalogue API server library.
//!
//! Exposes the building blocks (config, state, error handling, use case,
//! routes, server lifecycle) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod mapper;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
