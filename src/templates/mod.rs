//! Read-only template access.

pub mod store;

pub use store::{Template, TemplateStore};
