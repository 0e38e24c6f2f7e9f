//! Configuration.
//!
//! Loaded from `~/.tickets/config.toml`, or from the file named by
//! `TICKETS_CONFIG`. Every key is optional and a missing default file is the
//! same as an empty one:
//!
//! ```toml
//! data-file = "/var/lib/tickets/tickets.json"
//! log-level = "info"
//!
//! [[flights]]
//! id = 322
//! origin = "Arlanda"
//! destination = "Schipol"
//! departure = "2023-05-11 14:30"
//! ```
//!
//! The data file is resolved through a chain:
//!
//! 1. `--data-file <path>`: explicit per-command override
//! 2. `TICKETS_DATA_FILE` env var
//! 3. `data-file` in the config file
//! 4. `~/.tickets/tickets.json`

use std::{env, fs, io, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::catalog::{CatalogError, FlightCatalog};
use crate::model::Flight;

/// Env var naming an alternative config file.
pub const CONFIG_ENV: &str = "TICKETS_CONFIG";

/// Env var overriding where tickets are stored.
pub const DATA_FILE_ENV: &str = "TICKETS_DATA_FILE";

/// Log filter used when neither `RUST_LOG` nor `log-level` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHome,

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid flight table: {0}")]
    Catalog(#[from] CatalogError),
}

/// Ticket service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Where tickets are persisted.
    pub data_file: Option<PathBuf>,

    /// `tracing` filter directive, e.g. `info` or `tickets=debug`.
    pub log_level: Option<String>,

    /// Replaces the built-in flight catalog when present.
    pub flights: Option<Vec<Flight>>,
}

impl Config {
    /// Loads the config from `TICKETS_CONFIG` or `~/.tickets/config.toml`.
    ///
    /// An explicitly named file must exist; the default one may be absent.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Self::load_from(Path::new(&path));
        }

        let path = Self::path().ok_or(ConfigError::NoHome)?;
        match Self::load_from(&path) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Loads the config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The default config file path: `~/.tickets/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Self::home().map(|h| h.join("config.toml"))
    }

    /// The flight catalog: the configured table, or the built-in one.
    pub fn catalog(&self) -> Result<FlightCatalog, ConfigError> {
        match &self.flights {
            Some(flights) => Ok(FlightCatalog::new(flights.iter().cloned())?),
            None => Ok(FlightCatalog::builtin()),
        }
    }

    /// The log filter directive.
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Resolves the data file from the chain described in the module docs.
    pub fn data_file(&self, explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        resolve_data_file(
            explicit,
            env::var_os(DATA_FILE_ENV).map(PathBuf::from),
            self.data_file.as_deref(),
            Self::home(),
        )
    }

    fn home() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".tickets"))
    }
}

fn resolve_data_file(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    configured: Option<&Path>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    // 1. Explicit --data-file flag.
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    // 2. TICKETS_DATA_FILE environment variable.
    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }

    // 3. data-file in the config.
    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }

    // 4. ~/.tickets/tickets.json.
    home.map(|h| h.join("tickets.json"))
        .ok_or(ConfigError::NoHome)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::FlightId;

    fn home() -> Option<PathBuf> {
        Some(PathBuf::from("/home/agent/.tickets"))
    }

    #[test]
    fn explicit_wins() {
        let path = resolve_data_file(
            Some(Path::new("/tmp/flag.json")),
            Some(PathBuf::from("/tmp/env.json")),
            Some(Path::new("/tmp/config.json")),
            home(),
        )
        .unwrap();
        assert_eq!(path, Path::new("/tmp/flag.json"));
    }

    #[test]
    fn env_beats_config() {
        let path = resolve_data_file(
            None,
            Some(PathBuf::from("/tmp/env.json")),
            Some(Path::new("/tmp/config.json")),
            home(),
        )
        .unwrap();
        assert_eq!(path, Path::new("/tmp/env.json"));
    }

    #[test]
    fn empty_env_is_ignored() {
        let path = resolve_data_file(
            None,
            Some(PathBuf::new()),
            Some(Path::new("/tmp/config.json")),
            home(),
        )
        .unwrap();
        assert_eq!(path, Path::new("/tmp/config.json"));
    }

    #[test]
    fn falls_back_to_home() {
        let path = resolve_data_file(None, None, None, home()).unwrap();
        assert_eq!(path, Path::new("/home/agent/.tickets/tickets.json"));
    }

    #[test]
    fn no_home_no_path() {
        let err = resolve_data_file(None, None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::NoHome));
    }

    #[test]
    fn load_full_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
data-file = "/srv/tickets.json"
log-level = "debug"

[[flights]]
id = 100
origin = "Landvetter"
destination = "Kastrup"
departure = "2024-02-01 07:15"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_file.as_deref(), Some(Path::new("/srv/tickets.json")));
        assert_eq!(config.log_level(), "debug");

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.flights().count(), 1);
        assert_eq!(catalog.lookup(FlightId(100)).unwrap().origin, "Landvetter");
        assert!(catalog.lookup(FlightId(322)).is_none());
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.data_file.is_none());
        assert_eq!(config.log_level(), DEFAULT_LOG_LEVEL);
        assert!(config.catalog().unwrap().lookup(FlightId(322)).is_some());
    }

    #[test]
    fn unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = \"/x\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_flight_table_rejected() {
        let config: Config = toml::from_str(
            r#"
[[flights]]
id = 1
origin = "A"
destination = "B"
departure = "whenever"
"#,
        )
        .unwrap();

        assert!(matches!(config.catalog().unwrap_err(), ConfigError::Catalog(_)));
    }

    #[test]
    fn missing_explicit_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
