//! Process control primitives
//!
//! Building blocks for handing the current process over to another
//! command: argv to `Command` construction with PATH resolution, exec(2)
//! replacement, and exit-status propagation.

use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Resolve a program name to an executable path
pub fn resolve(program: &OsStr) -> Result<PathBuf> {
    which::which(program)
        .with_context(|| format!("command not found: {}", Path::new(program).display()))
}

/// Build a command from an argv slice, rooted at `dir`.
///
/// The program is resolved up front so a missing binary fails with a
/// clear error instead of a bare ENOENT out of exec.
pub fn build<S: AsRef<OsStr>>(argv: &[S], dir: &Path) -> Result<Command> {
    let Some((program, args)) = argv.split_first() else {
        bail!("empty command line");
    };
    if !dir.is_dir() {
        bail!("service directory does not exist: {}", dir.display());
    }

    let program = resolve(program.as_ref())?;
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(dir);
    Ok(cmd)
}

/// Replace the current process image with `cmd`.
///
/// On Unix this is a literal exec(2): on success the function never
/// returns, so the only value it can produce is the failure. On other
/// platforms the command runs as a child and this process exits with the
/// child's propagated code.
pub fn replace(mut cmd: Command) -> anyhow::Error {
    tracing::debug!(?cmd, "replacing process image");

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let err = cmd.exec();
        anyhow::Error::new(err).context(format!(
            "failed to exec {}",
            Path::new(cmd.get_program()).display()
        ))
    }

    #[cfg(not(unix))]
    {
        match run_to_completion(&mut cmd) {
            Ok(code) => std::process::exit(code),
            Err(err) => err,
        }
    }
}

/// Run `cmd` to completion with inherited stdio and return the exit code
/// to propagate.
pub fn run_to_completion(cmd: &mut Command) -> Result<i32> {
    let status = cmd.status().with_context(|| {
        format!("failed to run {}", Path::new(cmd.get_program()).display())
    })?;
    Ok(exit_code(status))
}

/// Map a child's exit status to the code this process should exit with:
/// the child's own code, or 128 + signal for a signal death (shell
/// convention).
pub fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    status.code().unwrap_or(1)
}
