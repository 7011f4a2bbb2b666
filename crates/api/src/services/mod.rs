//! Use-case services held in shared state.

pub mod proxy_client;

pub use proxy_client::ProxyClientService;
