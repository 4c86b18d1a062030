//! Escape hatch: execute an arbitrary command line in place of this
//! process
//!
//! Arguments pass through as OsStrings, no re-quoting or interpretation.

use anyhow::Result;
use std::ffi::OsString;

use crate::cli::Output;
use crate::config::GangwayConfig;
use crate::proc;

/// Execute an unrecognized command line verbatim
pub fn execute(config: &GangwayConfig, output: &Output, argv: &[OsString]) -> Result<()> {
    let cmd = proc::build(argv, &config.service.dir)?;

    let display = argv
        .iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    output.verbose(&format!("passthrough: {display}"));

    Err(proc::replace(cmd))
}
