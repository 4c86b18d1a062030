//! Hand the process over to the service entry point
//!
//! The entry command takes over this process image, so the service
//! inherits PID 1 and receives container signals directly.

use anyhow::Result;

use crate::cli::Output;
use crate::config::GangwayConfig;
use crate::proc;

/// Execute the start command
pub fn execute(config: &GangwayConfig, output: &Output) -> Result<()> {
    let entry = config.entry()?;
    let cmd = proc::build(entry, &config.service.dir)?;

    output.step(&format!("starting {}", entry.join(" ")));
    Err(proc::replace(cmd))
}
