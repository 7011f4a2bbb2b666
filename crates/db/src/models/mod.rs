//! Row models and input DTOs, one submodule per table.

pub mod proxy_client;
