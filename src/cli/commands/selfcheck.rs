//! Run the service test suite and exit with its status

use anyhow::Result;

use crate::cli::Output;
use crate::config::GangwayConfig;
use crate::proc;

/// Execute the selfcheck command
pub fn execute(config: &GangwayConfig, output: &Output) -> Result<()> {
    let command = config.selfcheck_command()?;
    let mut cmd = proc::build(command, &config.service.dir)?;

    output.step(&format!("selfcheck: {}", command.join(" ")));
    let code = proc::run_to_completion(&mut cmd)?;

    if code == 0 {
        output.success("selfcheck passed");
    } else {
        output.error(&format!("selfcheck failed with code {code}"));
    }
    std::process::exit(code)
}
