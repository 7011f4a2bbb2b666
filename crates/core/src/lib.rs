//! Domain types shared by the persistence and HTTP layers.

pub mod error;
pub mod proxy_client;
pub mod types;
