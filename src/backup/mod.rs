//! Backup archiving subsystem.

pub mod archiver;

pub use archiver::BackupArchiver;
