//! Asynchronous services and external integrations
//!
//! Everything that touches the network, the clock, or the filesystem
//! outside of configuration lives here.

pub mod ai;
pub mod log_dirs;
pub mod time_source;
#[cfg(feature = "runtime")]
pub mod tracing_setup;
