//! Process configuration.
//!
//! Configuration is layered: built-in defaults, then an optional YAML file,
//! then environment overrides, then command-line flags. Once the port is
//! resolved the configuration is immutable for the life of the process.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use rand::Rng;
use serde::Deserialize;

/// Port used when neither an explicit nor a random port is requested.
pub const DEFAULT_PORT: u16 = 8000;

/// Range random ports are drawn from.
pub const RANDOM_PORT_RANGE: RangeInclusive<u16> = 2000..=65535;

/// Largest request the server will buffer before giving up on finding a path.
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 1024;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, without the port
    pub listen_host: String,
    /// Explicit port; `None` means default or random
    pub port: Option<u16>,
    /// Draw the port from [`RANDOM_PORT_RANGE`]
    pub random_port: bool,
    /// Suppress request/response dumps
    pub quiet: bool,
    pub max_request_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_host: "0.0.0.0".to_string(),
            port: None,
            random_port: false,
            quiet: false,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory every served file lives under
    pub root: PathBuf,
    /// Document served for `/`
    pub index: String,
    /// File whose bytes form every 404 body. Relative to the working directory.
    pub error_page: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("html"),
            index: "index.html".to_string(),
            error_page: PathBuf::from("error"),
        }
    }
}

/// How the listening port gets chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSelection {
    Fixed(u16),
    Random,
    Default,
}

impl PortSelection {
    /// Turns the selection into a concrete port.
    pub fn pick(self) -> u16 {
        match self {
            PortSelection::Fixed(port) => port,
            PortSelection::Random => rand::rng().random_range(RANDOM_PORT_RANGE),
            PortSelection::Default => DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn port_selection(&self) -> PortSelection {
        match (self.port, self.random_port) {
            (Some(port), _) => PortSelection::Fixed(port),
            (None, true) => PortSelection::Random,
            (None, false) => PortSelection::Default,
        }
    }

    /// Chooses the port once and records it, so later calls agree.
    pub fn resolve_port(&mut self) -> u16 {
        let port = self.port_selection().pick();
        self.port = Some(port);
        self.random_port = false;
        port
    }
}

impl Config {
    /// Loads defaults, the YAML file at `path` if any, and the `LISTEN` /
    /// `FEATHER_PORT` environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut cfg = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text)?;
        if cfg.server.port.is_some() && cfg.server.random_port {
            anyhow::bail!("port and random_port may not be set together");
        }
        Ok(cfg)
    }

    /// Applies environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("LISTEN") {
            self.server.listen_host = host;
        }
        if let Some(port) = lookup("FEATHER_PORT") {
            let port = port
                .parse::<u16>()
                .with_context(|| format!("FEATHER_PORT is not a port number: {port}"))?;
            self.server.port = Some(port);
            self.server.random_port = false;
        }
        Ok(())
    }

    /// `host:port` for binding.
    ///
    /// An unresolved random selection draws a fresh port on every call; use
    /// [`ServerConfig::resolve_port`] first when the port must be known.
    pub fn listen_addr(&self) -> String {
        let port = self.server.port_selection().pick();
        format!("{}:{}", self.server.listen_host, port)
    }
}

/// Feather Server -- ultra-minimalist server
#[derive(Debug, Parser)]
#[command(name = "feather", version, about)]
pub struct Args {
    /// Provide a port number to listen on
    #[arg(short, long, value_name = "PORT", conflicts_with = "random")]
    pub port: Option<u16>,

    /// Ask for a random port
    #[arg(short, long)]
    pub random: bool,

    /// Keep quiet
    #[arg(short, long)]
    pub quiet: bool,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE", env = "FEATHER_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Layers the flags over the file and environment configuration.
    pub fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = Config::load(self.config.as_deref())?;
        self.apply_to(&mut cfg);
        Ok(cfg)
    }

    fn apply_to(&self, cfg: &mut Config) {
        if let Some(port) = self.port {
            cfg.server.port = Some(port);
            cfg.server.random_port = false;
        } else if self.random {
            cfg.server.port = None;
            cfg.server.random_port = true;
        }
        if self.quiet {
            cfg.server.quiet = true;
        }
    }
}
