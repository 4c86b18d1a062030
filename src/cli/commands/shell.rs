//! Open an interactive shell in the service source directory

use anyhow::Result;

use crate::cli::Output;
use crate::config::GangwayConfig;
use crate::proc;

/// Execute the shell command
pub fn execute(config: &GangwayConfig, output: &Output) -> Result<()> {
    let argv = [config.service.shell.as_str()];
    let cmd = proc::build(&argv, &config.service.dir)?;

    output.step(&format!("shell in {}", config.service.dir.display()));
    Err(proc::replace(cmd))
}
