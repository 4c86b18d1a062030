//! Watch-and-restart supervisor for develop mode
//!
//! Runs the service entry point as a child and restarts it whenever a
//! relevant file under the watched roots changes. A child that exits on
//! its own is not respawned until the next change, so a service that
//! crashes on a bad edit sits quietly until the next save instead of
//! hot-looping.

use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::process::Child;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::cli::Output;
use crate::config::GangwayConfig;
use crate::proc;

/// How often the supervisor polls the child between watcher events
const POLL_INTERVAL: Duration = Duration::from_millis(100);

enum WaitOutcome {
    /// A relevant file changed; the service should be restarted
    Changed(PathBuf),
    /// The service exited on its own
    Exited(std::process::ExitStatus),
}

/// Supervise the service entry point until interrupted.
///
/// Only ever returns with an error: the loop itself has no exit
/// condition, a signal to the dispatcher ends it.
pub fn supervise(config: &GangwayConfig, output: &Output) -> Result<()> {
    let entry = config.entry()?;
    let matcher = build_matcher(&config.watch.patterns)?;
    let debounce = Duration::from_millis(config.watch.debounce);
    let grace = Duration::from_millis(config.watch.grace);

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher =
        notify::recommended_watcher(tx).context("failed to create file watcher")?;
    for root in config.watch_roots() {
        watcher
            .watch(&root, RecursiveMode::Recursive)
            .with_context(|| format!("failed to watch {}", root.display()))?;
        output.verbose(&format!("watching {}", root.display()));
    }

    loop {
        let mut cmd = proc::build(entry, &config.service.dir)?;
        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to start {}", entry[0]))?;
        output.step(&format!("running {} (pid {})", entry.join(" "), child.id()));

        match wait_for_change_or_exit(&mut child, &rx, &matcher, debounce)? {
            WaitOutcome::Changed(path) => {
                output.info(&format!("change in {}, restarting", path.display()));
                stop(&mut child, grace, output)?;
            }
            WaitOutcome::Exited(status) => {
                if status.success() {
                    output.info("service exited cleanly, waiting for changes");
                } else {
                    output.warning(&format!(
                        "service exited with code {}, waiting for changes",
                        proc::exit_code(status)
                    ));
                }
                let path = wait_for_change(&rx, &matcher, debounce)?;
                output.info(&format!("change in {}, restarting", path.display()));
            }
        }
    }
}

/// Compile the configured file-name globs
fn build_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid watch pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("failed to compile watch patterns")
}

/// First event path that makes this event restart-worthy.
///
/// Globs match against the file name, not the full path; an empty
/// matcher accepts any create/modify/remove event.
fn relevant_path(matcher: &GlobSet, event: &Event) -> Option<PathBuf> {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return None;
    }
    if matcher.is_empty() {
        return event.paths.first().cloned();
    }
    event
        .paths
        .iter()
        .find(|path| path.file_name().is_some_and(|name| matcher.is_match(name)))
        .cloned()
}

fn wait_for_change_or_exit(
    child: &mut Child,
    rx: &Receiver<notify::Result<Event>>,
    matcher: &GlobSet,
    debounce: Duration,
) -> Result<WaitOutcome> {
    loop {
        if let Some(status) = child.try_wait().context("failed to poll service process")? {
            return Ok(WaitOutcome::Exited(status));
        }
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(event)) => {
                if let Some(path) = relevant_path(matcher, &event) {
                    settle(rx, debounce);
                    return Ok(WaitOutcome::Changed(path));
                }
            }
            Ok(Err(err)) => return Err(err).context("file watcher error"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => bail!("file watcher stopped unexpectedly"),
        }
    }
}

fn wait_for_change(
    rx: &Receiver<notify::Result<Event>>,
    matcher: &GlobSet,
    debounce: Duration,
) -> Result<PathBuf> {
    loop {
        match rx.recv() {
            Ok(Ok(event)) => {
                if let Some(path) = relevant_path(matcher, &event) {
                    settle(rx, debounce);
                    return Ok(path);
                }
            }
            Ok(Err(err)) => return Err(err).context("file watcher error"),
            Err(_) => bail!("file watcher stopped unexpectedly"),
        }
    }
}

/// Swallow the rest of an event burst so one save triggers one restart
fn settle(rx: &Receiver<notify::Result<Event>>, debounce: Duration) {
    let deadline = Instant::now() + debounce;
    loop {
        let now = Instant::now();
        if now >= deadline {
            return;
        }
        if rx.recv_timeout(deadline - now).is_err() {
            return;
        }
    }
}

/// Stop the service: SIGTERM, a grace period, then SIGKILL
#[cfg(unix)]
fn stop(child: &mut Child, grace: Duration, output: &Output) -> Result<()> {
    let _ = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGTERM) };

    let deadline = Instant::now() + grace;
    while Instant::now() < deadline {
        if child
            .try_wait()
            .context("failed to poll service process")?
            .is_some()
        {
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    output.warning("service ignored SIGTERM, killing it");
    child.kill().context("failed to kill service process")?;
    child.wait().context("failed to reap service process")?;
    Ok(())
}

#[cfg(not(unix))]
fn stop(child: &mut Child, _grace: Duration, _output: &Output) -> Result<()> {
    child.kill().context("failed to kill service process")?;
    child.wait().context("failed to reap service process")?;
    Ok(())
}
