use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub prediction: PredictionSettings,
    #[serde(default)]
    pub cors: CorsSettings,
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

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }

/// Locations of the static data files
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// JSON array of airports; the built-in list is used when unset
    pub airports_path: Option<PathBuf>,
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            airports_path: None,
            model_path: default_model_path(),
        }
    }
}

fn default_model_path() -> PathBuf { PathBuf::from("data/flight_delay_model.json") }

/// Which prediction strategy to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStrategy {
    #[serde(alias = "random")]
    Stochastic,
    #[default]
    #[serde(alias = "logistic")]
    Model,
    #[serde(alias = "process", alias = "subprocess")]
    External,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionSettings {
    #[serde(default)]
    pub strategy: PredictionStrategy,
    #[serde(default)]
    pub process: ProcessSettings,
}

/// External predictor invocation
///
/// The program is run as `program args... <dayOfWeekId> <airportId>`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessSettings {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_fail_on_stderr")]
    pub fail_on_stderr: bool,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            timeout_secs: default_timeout_secs(),
            fail_on_stderr: default_fail_on_stderr(),
        }
    }
}

fn default_program() -> String { "python3".to_string() }
fn default_args() -> Vec<String> { vec!["scripts/predict_delay.py".to_string()] }
fn default_timeout_secs() -> u64 { 10 }
fn default_fail_on_stderr() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsSettings {
    /// Allowed client origins; any origin is allowed when empty
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

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
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with DELAY_)
    /// 5. `PORT` and `MODEL_PATH`
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., DELAY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("DELAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_env_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DELAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional un-prefixed overrides used by hosting platforms
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(port) = env::var("PORT") {
        builder = builder.set_override("server.port", port)?;
    }
    if let Ok(model_path) = env::var("MODEL_PATH") {
        builder = builder.set_override("data.model_path", model_path)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.prediction.strategy, PredictionStrategy::Model);
        assert_eq!(settings.prediction.process.timeout_secs, 10);
        assert!(settings.prediction.process.fail_on_stderr);
        assert!(settings.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8081

[prediction]
strategy = "random"

[prediction.process]
program = "/usr/local/bin/score"
args = ["--quiet"]
timeout_secs = 3
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.prediction.strategy, PredictionStrategy::Stochastic);
        assert_eq!(settings.prediction.process.program, "/usr/local/bin/score");
        assert_eq!(settings.prediction.process.args, vec!["--quiet".to_string()]);
        assert_eq!(settings.prediction.process.timeout_secs, 3);
        assert_eq!(settings.data.model_path, PathBuf::from("data/flight_delay_model.json"));
    }
}
