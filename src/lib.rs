//! Web-based administration panel for nginx site configurations.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                 NGINX PANEL                  │
//!                  │                                              │
//!   HTTP request   │  ┌──────┐   ┌──────────┐   ┌─────────────┐  │
//!   ───────────────┼─▶│ http │──▶│   auth   │──▶│  handlers   │  │
//!                  │  └──────┘   └──────────┘   └──────┬──────┘  │
//!                  │                                   │         │
//!                  │      ┌────────────────────────────┼──────┐  │
//!                  │      ▼            ▼               ▼      │  │
//!                  │  ┌────────┐  ┌─────────┐   ┌──────────┐  │  │
//!                  │  │ sites  │  │ history │   │  backup  │  │  │
//!                  │  │ commit │  │  store  │   │ archiver │  │  │
//!                  │  └───┬────┘  └─────────┘   └────┬─────┘  │  │
//!                  │      │                          │        │  │
//!                  │      ▼                          ▼        │  │
//!                  │  ┌──────────────────────────────────┐    │  │
//!                  │  │   nginx (external binary: -t,    │    │  │
//!                  │  │   -s reload / systemctl, tar)    │    │  │
//!                  │  └──────────────────────────────────┘    │  │
//!                  └──────────────────────────────────────────────┘
//! ```
//!
//! A site's config file is committed iff the whole configuration set
//! passes `nginx -t`; otherwise the prior content is restored and the
//! validator's output is returned. Every overwrite of non-empty content
//! is snapshotted into a per-site version history first.

// Core subsystems
pub mod backup;
pub mod config;
pub mod error;
pub mod history;
pub mod nginx;
pub mod sites;

// Glue
pub mod auth;
pub mod http;
pub mod logs;
pub mod templates;

// Cross-cutting concerns
pub mod observability;

pub use config::PanelConfig;
pub use error::PanelError;
pub use http::HttpServer;
