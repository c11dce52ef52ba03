use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub records: RecordsSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

/// Which records backend to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordsBackend {
    Http,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordsSettings {
    #[serde(default = "default_backend")]
    pub backend: RecordsBackend,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    /// JSON seed file for the in-memory backend
    pub seed_path: Option<String>,
    #[serde(default)]
    pub collections: CollectionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_tutors_collection")]
    pub tutors: String,
    #[serde(default = "default_learners_collection")]
    pub learners: String,
    #[serde(default = "default_matches_collection")]
    pub matches: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            tutors: default_tutors_collection(),
            learners: default_learners_collection(),
            matches: default_matches_collection(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_backend() -> RecordsBackend { RecordsBackend::Memory }
fn default_tutors_collection() -> String { "tutors".to_string() }
fn default_learners_collection() -> String { "learners".to_string() }
fn default_matches_collection() -> String { "matches".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TUTOR_MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TUTOR_MATCH__RECORDS__ENDPOINT -> records.endpoint
            .add_source(env_source())
            .build()?;

        let settings = apply_records_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("TUTOR_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Fill records settings from the conventional unprefixed variables
///
/// `RECORDS_URL` and `RECORDS_API_KEY` win over file values so deployments can
/// share one secret store with the records backend.
fn apply_records_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder()
        .add_source(settings)
        .set_default("server.host", default_host())?
        .set_default("server.port", i64::from(default_port()))?
        .set_default("records.backend", "memory")?;

    if let Ok(endpoint) = env::var("RECORDS_URL") {
        builder = builder.set_override("records.endpoint", endpoint)?;
    }
    if let Ok(api_key) = env::var("RECORDS_API_KEY") {
        builder = builder.set_override("records.api_key", api_key)?;
    }

    builder.build()
}
