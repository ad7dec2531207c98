//! Log access subsystem.

pub mod tail;

pub use tail::{LogKind, LogTailer};
