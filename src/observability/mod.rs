//! Cross-cutting observability concerns.

pub mod metrics;
