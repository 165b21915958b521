//! Encore archiver: copies the streaming service's weekly recommendation
//! playlist into a permanent, deduplicated, week-named playlist.

pub mod archive;
pub mod bootstrap;
pub mod config;
pub mod error;

pub use error::{ArchiverError, Result};
