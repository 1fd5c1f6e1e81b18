//! Switchifier configuration loaded from flags and environment variables.
//!
//! Every flag can also be given through an environment variable (or a
//! `.env` file via `dotenvy`). The parsed [`Cli`] is resolved exactly once
//! into an immutable [`SwitchifierConfig`], which is then passed to the
//! components that need it.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;

use crate::domain::SharedSecret;

/// Secret used when neither `--secret` nor `--secret-path` is given.
pub const DEFAULT_SECRET: &str = "changeme";

/// Command-line interface of the `switchifier` binary.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite database.
    #[arg(long, env = "SWITCHIFIER_DB_PATH", default_value = "./switchifier.db")]
    pub db_path: String,

    /// Address to bind the HTTP server to. `:8080` binds all interfaces.
    #[arg(long, env = "SWITCHIFIER_BIND_ADDRESS", default_value = ":8080")]
    pub bind_address: String,

    /// Secret for state updates.
    #[arg(long, env = "SWITCHIFIER_SECRET", default_value = DEFAULT_SECRET, hide_env_values = true)]
    pub secret: String,

    /// File with the secret for state updates. Only its first line is used.
    #[arg(long, env = "SWITCHIFIER_SECRET_PATH")]
    pub secret_path: Option<PathBuf>,

    /// Seconds to wait for the database before giving up.
    #[arg(long, env = "SWITCHIFIER_DB_CONNECT_TIMEOUT_SECS", default_value_t = 5)]
    pub db_connect_timeout_secs: u64,

    /// Emit logs as JSON lines.
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

/// Errors raised while resolving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `--db-path` was given as an empty string.
    #[error("please provide a database path")]
    EmptyDatabasePath,

    /// `--bind-address` could not be parsed.
    #[error("invalid bind address {address:?}: {source}")]
    InvalidBindAddress {
        /// The rejected value.
        address: String,
        /// Parser error.
        source: std::net::AddrParseError,
    },

    /// The secret file could not be read.
    #[error("cannot read secret file {}: {source}", path.display())]
    SecretFile {
        /// Path given via `--secret-path`.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The resolved secret is empty, which would let anyone update the state.
    #[error("the update secret must not be empty")]
    EmptySecret,
}

/// Resolved, immutable process configuration.
#[derive(Debug, Clone)]
pub struct SwitchifierConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Socket address for the HTTP server.
    pub listen_addr: SocketAddr,
    /// Shared secret required by the update endpoint.
    pub secret: SharedSecret,
    /// Timeout for acquiring the database connection.
    pub db_connect_timeout: Duration,
    /// Whether logs are emitted as JSON.
    pub log_json: bool,
}

impl SwitchifierConfig {
    /// Resolves parsed command-line arguments into a configuration.
    ///
    /// When `secret_path` is set it takes precedence over `secret`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the database path is empty, the bind
    /// address is malformed, or the secret cannot be loaded.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        if cli.db_path.is_empty() {
            return Err(ConfigError::EmptyDatabasePath);
        }

        let listen_addr = parse_bind_address(&cli.bind_address)?;

        let secret = match &cli.secret_path {
            Some(path) => read_secret_file(path)?,
            None => cli.secret,
        };
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        Ok(Self {
            db_path: PathBuf::from(cli.db_path),
            listen_addr,
            secret: SharedSecret::new(secret),
            db_connect_timeout: Duration::from_secs(cli.db_connect_timeout_secs),
            log_json: cli.log_json,
        })
    }

    /// Returns `true` when the built-in default secret is in use.
    #[must_use]
    pub fn uses_default_secret(&self) -> bool {
        self.secret.verify(DEFAULT_SECRET)
    }
}

/// Parses a bind address, accepting the `:port` shorthand for all
/// interfaces.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBindAddress`] if the value is not a
/// socket address.
pub fn parse_bind_address(address: &str) -> Result<SocketAddr, ConfigError> {
    let expanded = if address.starts_with(':') {
        format!("0.0.0.0{address}")
    } else {
        address.to_string()
    };
    expanded
        .parse()
        .map_err(|source| ConfigError::InvalidBindAddress {
            address: address.to_string(),
            source,
        })
}

/// Reads the secret from `path`: everything before the first newline.
///
/// # Errors
///
/// Returns [`ConfigError::SecretFile`] if the file cannot be read.
pub fn read_secret_file(path: &Path) -> Result<String, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::SecretFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents.split('\n').next().unwrap_or_default().to_string())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::io::Write;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let argv = std::iter::once("switchifier").chain(args.iter().copied());
        let Ok(cli) = Cli::try_parse_from(argv) else {
            panic!("arguments should parse");
        };
        cli
    }

    #[test]
    fn colon_port_binds_all_interfaces() {
        let Ok(addr) = parse_bind_address(":8080") else {
            panic!("should parse");
        };
        assert_eq!(addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn full_bind_address_is_kept() {
        let Ok(addr) = parse_bind_address("127.0.0.1:9000") else {
            panic!("should parse");
        };
        assert_eq!(addr.port(), 9000);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn garbage_bind_address_is_rejected() {
        assert!(matches!(
            parse_bind_address("localhost"),
            Err(ConfigError::InvalidBindAddress { .. })
        ));
    }

    #[test]
    fn secret_file_uses_first_line_only() {
        let Ok(mut file) = tempfile::NamedTempFile::new() else {
            panic!("tempfile");
        };
        let Ok(()) = file.write_all(b"hunter2\nsecond line\n") else {
            panic!("write");
        };
        let Ok(secret) = read_secret_file(file.path()) else {
            panic!("should read");
        };
        assert_eq!(secret, "hunter2");
    }

    #[test]
    fn secret_path_overrides_secret_flag() {
        let Ok(mut file) = tempfile::NamedTempFile::new() else {
            panic!("tempfile");
        };
        let Ok(()) = file.write_all(b"from-file\n") else {
            panic!("write");
        };
        let Some(path) = file.path().to_str() else {
            panic!("utf-8 path");
        };
        let parsed = cli(&["--secret", "from-flag", "--secret-path", path]);
        let Ok(config) = SwitchifierConfig::from_cli(parsed) else {
            panic!("should resolve");
        };
        assert!(config.secret.verify("from-file"));
        assert!(!config.secret.verify("from-flag"));
    }

    #[test]
    fn missing_secret_file_is_an_error() {
        let parsed = cli(&["--secret-path", "/nonexistent/switchifier/secret"]);
        assert!(matches!(
            SwitchifierConfig::from_cli(parsed),
            Err(ConfigError::SecretFile { .. })
        ));
    }

    #[test]
    fn empty_secret_file_is_rejected() {
        let Ok(file) = tempfile::NamedTempFile::new() else {
            panic!("tempfile");
        };
        let Some(path) = file.path().to_str() else {
            panic!("utf-8 path");
        };
        let parsed = cli(&["--secret-path", path]);
        assert!(matches!(
            SwitchifierConfig::from_cli(parsed),
            Err(ConfigError::EmptySecret)
        ));
    }

    #[test]
    fn empty_db_path_is_rejected() {
        let parsed = cli(&["--db-path", ""]);
        assert!(matches!(
            SwitchifierConfig::from_cli(parsed),
            Err(ConfigError::EmptyDatabasePath)
        ));
    }

    #[test]
    fn defaults_match_legacy_deployment() {
        let Ok(config) = SwitchifierConfig::from_cli(cli(&[])) else {
            panic!("defaults should resolve");
        };
        assert_eq!(config.db_path, PathBuf::from("./switchifier.db"));
        assert_eq!(config.listen_addr.port(), 8080);
        assert!(config.uses_default_secret());
        assert_eq!(config.db_connect_timeout, Duration::from_secs(5));
    }
}
