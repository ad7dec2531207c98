//! Invocation of the external nginx binary.

pub mod command;

pub use command::{run, CommandOutput, Nginx};
