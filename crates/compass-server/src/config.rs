//! Server configuration
//!
//! The operating mode is resolved once at startup, in priority order:
//! an explicit `--mode` flag, the `COMPASS_MODE` environment variable, the
//! `mode` key of the config file, else the local default. The choice is
//! fixed for the process lifetime.

use anyhow::Context;
use compass_core::{Mode, MAX_SESSIONS};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Demo-mode session inactivity timeout
pub const DEMO_SESSION_TTL: Duration = Duration::from_secs(15);

/// Local-mode session inactivity timeout
pub const LOCAL_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "compass.db";
const DEFAULT_CONFIG_PATH: &str = "compass.toml";

/// Optional keys read from the TOML config file
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    mode: Option<String>,
    bind: Option<SocketAddr>,
    db_path: Option<PathBuf>,
}

impl FileConfig {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Operating mode, fixed for the process lifetime
    pub mode: Mode,
    /// Listen address
    pub bind: SocketAddr,
    /// SQLite database path (local mode only)
    pub db_path: PathBuf,
    /// Demo-mode concurrent session capacity
    pub max_sessions: usize,
    /// Session inactivity timeout for the active mode
    pub session_ttl: Duration,
    /// How often the expiry sweeper runs
    pub sweep_interval: Duration,
}

impl ServerConfig {
    /// Resolve the configuration from an explicit mode override, the
    /// environment, and an optional config file.
    ///
    /// A missing config file at the default path is fine; an explicitly
    /// given `--config` path that cannot be read is an error.
    ///
    /// # Errors
    /// Fails when an explicitly named config file is unreadable or invalid.
    pub fn resolve(
        mode_override: Option<Mode>,
        bind_override: Option<SocketAddr>,
        config_path: Option<&Path>,
    ) -> anyhow::Result<Self> {
        let file = match config_path {
            Some(path) => FileConfig::load(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    FileConfig::load(default)?
                } else {
                    FileConfig::default()
                }
            }
        };

        let mode = mode_override
            .or_else(|| {
                std::env::var("COMPASS_MODE")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .map(|v| v.parse().unwrap_or_default())
            })
            .or_else(|| file.mode.as_deref().map(|v| v.parse().unwrap_or_default()))
            .unwrap_or_default();

        let bind = bind_override
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.parse().expect("default bind address"));

        Ok(Self::for_mode(mode, bind, file.db_path))
    }

    fn for_mode(mode: Mode, bind: SocketAddr, db_path: Option<PathBuf>) -> Self {
        let (session_ttl, sweep_interval) = if mode.is_demo() {
            (DEMO_SESSION_TTL, Duration::from_secs(1))
        } else {
            (LOCAL_SESSION_TTL, Duration::from_secs(30))
        };
        Self {
            mode,
            bind,
            db_path: db_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            max_sessions: MAX_SESSIONS,
            session_ttl,
            sweep_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_are_local_mode() {
        let config = ServerConfig::for_mode(Mode::default(), DEFAULT_BIND.parse().unwrap(), None);
        assert_eq!(config.mode, Mode::Local);
        assert_eq!(config.session_ttl, LOCAL_SESSION_TTL);
        assert_eq!(config.max_sessions, MAX_SESSIONS);
    }

    #[test]
    fn demo_mode_shortens_the_session_ttl() {
        let config = ServerConfig::for_mode(Mode::Demo, DEFAULT_BIND.parse().unwrap(), None);
        assert_eq!(config.session_ttl, DEMO_SESSION_TTL);
        assert_eq!(config.sweep_interval, Duration::from_secs(1));
    }

    #[test]
    fn explicit_override_beats_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"local\"").unwrap();

        let config =
            ServerConfig::resolve(Some(Mode::Demo), None, Some(file.path())).unwrap();
        assert_eq!(config.mode, Mode::Demo);
    }

    #[test]
    fn config_file_sets_mode_and_db_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"demo\"\ndb_path = \"data/x.db\"").unwrap();

        let config = ServerConfig::resolve(None, None, Some(file.path())).unwrap();
        assert_eq!(config.mode, Mode::Demo);
        assert_eq!(config.db_path, PathBuf::from("data/x.db"));
    }

    #[test]
    fn unreadable_explicit_config_is_an_error() {
        let missing = Path::new("/nonexistent/compass.toml");
        assert!(ServerConfig::resolve(None, None, Some(missing)).is_err());
    }
}
