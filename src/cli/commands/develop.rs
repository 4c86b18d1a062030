//! Iterative development mode: watch the sources, restart on change

use anyhow::Result;

use crate::cli::Output;
use crate::config::GangwayConfig;
use crate::watch;

/// Execute the develop command
pub fn execute(config: &GangwayConfig, output: &Output) -> Result<()> {
    watch::supervise(config, output)
}
