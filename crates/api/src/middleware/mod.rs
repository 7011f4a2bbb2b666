//! Cross-cutting request middleware.
//!
//! - [`logging::RequestLogger`] -- one span per request with a start and a
//!   completion event.

pub mod logging;
