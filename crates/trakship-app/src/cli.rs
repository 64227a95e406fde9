//! CLI argument definitions for the TrakShip server.
//!
//! Uses `clap` with derive macros. Priority resolution:
//! CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// TrakShip backend — accounts plus a scripted customer-support chatbot.
#[derive(Parser, Debug)]
#[command(name = "trakship", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// HTTP server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Data directory for the SQLite database.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > TRAKSHIP_CONFIG env var > ~/.trakship/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("TRAKSHIP_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the HTTP port.
    ///
    /// Priority: --port flag > TRAKSHIP_PORT env var > config file value > 3000.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("TRAKSHIP_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        if config_port != 0 {
            return config_port;
        }
        3000
    }

    /// Resolve the data directory override, if any.
    pub fn resolve_data_dir(&self) -> Option<String> {
        self.data_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }

    /// Resolve the log level override, if any.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".trakship").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".trakship").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flag_beats_config_port() {
        let args = CliArgs::parse_from(["trakship", "--port", "8080"]);
        assert_eq!(args.resolve_port(3000), 8080);
    }

    #[test]
    fn test_config_port_used_without_flag() {
        let args = CliArgs::parse_from(["trakship"]);
        assert_eq!(args.resolve_port(4000), 4000);
    }

    #[test]
    fn test_zero_config_port_falls_back() {
        let args = CliArgs::parse_from(["trakship"]);
        assert_eq!(args.resolve_port(0), 3000);
    }

    #[test]
    fn test_explicit_config_path() {
        let args = CliArgs::parse_from(["trakship", "--config", "/tmp/t.toml"]);
        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/t.toml"));
    }

    #[test]
    fn test_data_dir_override() {
        let args = CliArgs::parse_from(["trakship", "--data-dir", "/tmp/data"]);
        assert_eq!(args.resolve_data_dir(), Some("/tmp/data".to_string()));

        let args = CliArgs::parse_from(["trakship"]);
        assert_eq!(args.resolve_data_dir(), None);
    }
}
