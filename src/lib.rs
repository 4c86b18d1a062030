//! # Gangway - Container Entrypoint Dispatch
//!
//! Gangway is the first process of a service container. It reads one
//! command token, prints a release banner, and hands the process over to
//! the requested action.
//!
//! ## Commands
//!
//! - **shell**: interactive shell rooted at the service source directory
//! - **start**: replace the process image with the service entry point
//! - **develop**: watch the sources and restart the entry point on change
//! - **selfcheck**: run the service test suite and exit with its status
//! - anything else: executed verbatim in place of this process
//!
//! ## Quick Start
//!
//! ```bash
//! # As a container ENTRYPOINT
//! ENTRYPOINT ["gangway"]
//! CMD ["start"]
//!
//! # Iterating locally
//! gangway develop
//! ```

pub mod cli;
pub mod config;
pub mod proc;
pub mod watch;

pub use cli::{Cli, Output};
pub use config::GangwayConfig;

/// Result type alias for Gangway operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
