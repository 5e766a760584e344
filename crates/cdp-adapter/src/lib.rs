//! Chromium DevTools adapter for the form filler.
//!
//! [`ChromiumTransport`] owns the browser connection and evaluates expressions in one
//! page. [`CdpDom`] turns those evaluations into a [`dom_port::DomPort`] by talking to
//! a small bridge object installed in the page.

mod bridge;
pub mod config;
pub mod dom;
pub mod error;
pub mod transport;

pub use config::CdpConfig;
pub use dom::CdpDom;
pub use error::{AdapterError, AdapterErrorKind};
pub use transport::{CdpTransport, ChromiumTransport};
