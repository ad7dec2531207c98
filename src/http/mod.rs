//! HTTP surface of the panel.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (Axum setup, middleware stack)
//!     → auth middleware (cookie → Identity)
//!     → handlers/ (thin glue over the core components)
//!     → response.rs (PanelError → status + plain-text body)
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
