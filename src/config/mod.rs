//! Configuration management for Gangway
//!
//! This module handles loading and validating Gangway configuration from
//! layered sources: built-in defaults, a `gangway.toml` file, and
//! `GANGWAY_*` environment variables. The environment always wins, so a
//! container image can ship a file and the orchestrator can still
//! override single values per deployment.

use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Config file discovered in the working directory when `--config` is not given
pub const CONFIG_FILE: &str = "gangway.toml";

/// Prefix for environment overrides, e.g. `GANGWAY_DEPLOY_CONTEXT`
pub const ENV_PREFIX: &str = "GANGWAY_";

/// Main configuration structure for Gangway
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GangwayConfig {
    /// Release labels shown in the startup banner
    pub deploy: DeployConfig,

    /// Service location and launch commands
    pub service: ServiceConfig,

    /// Test-suite invocation for `gangway selfcheck`
    pub selfcheck: SelfcheckConfig,

    /// File-watch tuning for `gangway develop`
    pub watch: WatchConfig,
}

/// Release labels for the startup banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Version label of the deployed service
    pub version: String,

    /// Deployment context label (e.g. "local", "production")
    pub context: String,
}

/// Service location and launch commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service source directory; working directory for every action
    pub dir: PathBuf,

    /// Argv of the service main entry point
    pub entry: Vec<String>,

    /// Interactive shell program for `gangway shell`
    pub shell: String,
}

/// Test-suite invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfcheckConfig {
    /// Argv of the service test runner
    pub command: Vec<String>,
}

/// File-watch tuning for develop mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Directories watched recursively; empty means the service directory
    pub paths: Vec<PathBuf>,

    /// File-name globs that trigger a restart; empty means any file
    pub patterns: Vec<String>,

    /// Milliseconds to coalesce a burst of events into one restart
    pub debounce: u64,

    /// Milliseconds between SIGTERM and SIGKILL when stopping the service
    pub grace: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            version: "dev".to_string(),
            context: "local".to_string(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            entry: vec![],
            shell: "bash".to_string(),
        }
    }
}

impl Default for SelfcheckConfig {
    fn default() -> Self {
        Self { command: vec![] }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            paths: vec![],
            patterns: vec![],
            debounce: 400,
            grace: 5000,
        }
    }
}

impl GangwayConfig {
    /// Load configuration from layered sources.
    ///
    /// Precedence, lowest to highest: built-in defaults, the config file
    /// (`--config` path if given, otherwise `gangway.toml` in the working
    /// directory), `GANGWAY_*` environment variables.
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = custom_config {
            // An explicitly requested file must exist
            figment = figment.merge(Toml::file_exact(path));
        } else {
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }

        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("_"))
            .extract()
            .context("failed to load configuration")?;

        config.validate()?;

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.service.dir.as_os_str().is_empty() {
            bail!("service.dir cannot be empty");
        }
        if self.service.shell.is_empty() {
            bail!("service.shell cannot be empty");
        }
        if self.deploy.version.is_empty() || self.deploy.context.is_empty() {
            bail!("deploy.version and deploy.context cannot be empty");
        }
        Ok(())
    }

    /// Argv of the service entry point, or an error naming the missing key
    pub fn entry(&self) -> Result<&[String]> {
        if self.service.entry.is_empty() {
            bail!(
                "service entry point is not configured \
                 (set service.entry in {CONFIG_FILE} or {ENV_PREFIX}SERVICE_ENTRY)"
            );
        }
        Ok(&self.service.entry)
    }

    /// Argv of the test runner, or an error naming the missing key
    pub fn selfcheck_command(&self) -> Result<&[String]> {
        if self.selfcheck.command.is_empty() {
            bail!(
                "selfcheck command is not configured \
                 (set selfcheck.command in {CONFIG_FILE} or {ENV_PREFIX}SELFCHECK_COMMAND)"
            );
        }
        Ok(&self.selfcheck.command)
    }

    /// Directories watched in develop mode
    pub fn watch_roots(&self) -> Vec<PathBuf> {
        if self.watch.paths.is_empty() {
            vec![self.service.dir.clone()]
        } else {
            self.watch.paths.clone()
        }
    }
}
