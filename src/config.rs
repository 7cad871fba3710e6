use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

use crate::http::reader::MAX_LINE;

/// Command line for the `tiny` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "tiny")]
#[command(about = "A tiny iterative HTTP/1.0 server for static and CGI content")]
pub struct Args {
    /// Port to listen on, on all interfaces
    pub port: Option<u16>,

    /// YAML configuration file
    #[arg(short, long, env = "TINY_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Serve each connection on its own task instead of one at a time.
    pub concurrent: bool,
}

/// Everything a connection handler needs to map and answer requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix joined to request targets by plain concatenation.
    pub document_root: String,
    /// Appended to targets ending in `/`.
    pub default_document: String,
    /// Targets containing this substring are run as programs.
    pub cgi_marker: String,
    pub server_name: String,
    pub max_line: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            concurrent: false,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_root: ".".to_string(),
            default_document: "home.html".to_string(),
            cgi_marker: "cgi-bin".to_string(),
            server_name: "Tiny Web Server".to_string(),
            max_line: MAX_LINE,
        }
    }
}

impl Config {
    /// Defaults, then the YAML file from `--config` or `TINY_CONFIG`, then
    /// the `LISTEN` environment variable, then the `PORT` argument.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let mut cfg = Self::load_from(args.config.as_deref())?;
        if let Some(port) = args.port {
            cfg.server.listen_addr = format!("0.0.0.0:{}", port);
        }
        Ok(cfg)
    }

    fn load_from(path: Option<&std::path::Path>) -> anyhow::Result<Self> {
        let mut cfg = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Self::from_yaml(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Self::default(),
        };

        if let Ok(listen) = std::env::var("LISTEN") {
            cfg.server.listen_addr = listen;
        }

        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
