//! eventcal configuration.
//!
//! Read from ~/.config/eventcal/config.toml, with `EVENTCAL_*` environment
//! variables layered on top (`EVENTCAL_SERVER__PORT=8080`).

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{EventcalError, EventcalResult};

static DEFAULT_DATABASE_PATH: &str = "~/.local/share/eventcal/events.db";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4096;
const DEFAULT_MAX_EVENTS_PER_DAY: usize = 2;

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_events_per_day() -> usize {
    DEFAULT_MAX_EVENTS_PER_DAY
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventcalConfig {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Presentation settings for the month grid
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Titles shown per day cell before collapsing into "+N more"
    #[serde(default = "default_max_events_per_day")]
    pub max_events_per_day: usize,
}

impl Default for EventcalConfig {
    fn default() -> Self {
        EventcalConfig {
            database_path: default_database_path(),
            server: ServerConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            max_events_per_day: default_max_events_per_day(),
        }
    }
}

impl EventcalConfig {
    pub fn config_path() -> EventcalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventcalError::Config("Could not determine config directory".into()))?
            .join("eventcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file on first use.
    pub fn load() -> EventcalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EventcalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("EVENTCAL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| EventcalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventcalError::Config(e.to_string()))
    }

    /// Database location with `~` expanded.
    pub fn database_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.database_path.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn to_toml(&self) -> EventcalResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EventcalError::Serialization(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventcalResult<()> {
        let contents = format!(
            "\
# eventcal configuration

# SQLite database holding your events:
# database_path = \"{}\"

# [server]
# host = \"{}\"
# port = {}

# [display]
# Event titles shown per day in the month view:
# max_events_per_day = {}
",
            DEFAULT_DATABASE_PATH,
            DEFAULT_HOST,
            DEFAULT_PORT,
            DEFAULT_MAX_EVENTS_PER_DAY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventcalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventcalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // The process environment is shared by every test thread
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sets environment variables, removing them again on drop
    struct EnvVars(Vec<&'static str>);

    impl EnvVars {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            for (key, value) in vars {
                // SAFETY: callers hold ENV_LOCK, so no other test reads or writes the env
                unsafe { std::env::set_var(key, value) };
            }
            EnvVars(vars.iter().map(|(key, _)| *key).collect())
        }
    }

    impl Drop for EnvVars {
        fn drop(&mut self) {
            for key in &self.0 {
                // SAFETY: see `EnvVars::set`
                unsafe { std::env::remove_var(key) };
            }
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let config = EventcalConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, EventcalConfig::default());
    }

    #[test]
    fn commented_default_file_parses_to_defaults() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eventcal/config.toml");

        EventcalConfig::create_default_config(&path).unwrap();
        assert!(path.exists());

        let config = EventcalConfig::load_from(&path).unwrap();
        assert_eq!(config, EventcalConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "database_path = \"/tmp/cal.db\"\n\n[server]\nport = 8080\n",
        )
        .unwrap();

        let config = EventcalConfig::load_from(&path).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/tmp/cal.db"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.display.max_events_per_day, 2);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"not a port\"\n").unwrap();

        assert!(matches!(
            EventcalConfig::load_from(&path),
            Err(EventcalError::Config(_))
        ));
    }

    #[test]
    fn environment_overrides_file() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "database_path = \"/tmp/file.db\"\n\n[server]\nport = 8080\n",
        )
        .unwrap();

        let config = {
            let _vars = EnvVars::set(&[
                ("EVENTCAL_SERVER__PORT", "9191"),
                ("EVENTCAL_DATABASE_PATH", "/tmp/env.db"),
            ]);
            EventcalConfig::load_from(&path).unwrap()
        };

        assert_eq!(config.server.port, 9191);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/env.db"));
        assert_eq!(config.server.host, DEFAULT_HOST);

        // Variables are gone again, so the file wins
        let config = EventcalConfig::load_from(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/file.db"));
    }

    #[test]
    fn database_path_expands_tilde() {
        let config = EventcalConfig::default();
        assert!(!config.database_path().to_string_lossy().starts_with('~'));
        assert!(config.database_path().ends_with("eventcal/events.db"));
    }

    #[test]
    fn to_toml_includes_sections() {
        let toml = EventcalConfig::default().to_toml().unwrap();
        assert!(toml.contains("database_path"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("max_events_per_day = 2"));
    }
}
