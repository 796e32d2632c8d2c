use std::path::PathBuf;

use serde_aux::prelude::deserialize_number_from_string;

/// Settings with a sensible default; only the port has to be provided.
#[derive(serde::Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AppSettings {
    pub host: String,
    pub data_file: PathBuf,
    pub templates_dir: PathBuf,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub request_timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub shutdown_timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            data_file: PathBuf::from("data/forms.json"),
            templates_dir: PathBuf::from("templates"),
            request_timeout_secs: 10,
            shutdown_timeout_secs: 5,
        }
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub app: AppSettings,
}

/// Source of the startup configuration.
pub trait ConfigurationProvider {
    fn load(&self) -> Result<Configuration, config::ConfigError>;
}

/// Variables that override the values of the env file.
enum EnvironmentLayer {
    Process,
    Fixed(Vec<(String, String)>),
}

/// Reads a dotenv file (`KEY=VALUE` lines, quotes and `export` allowed),
/// then lets the environment override it.
///
/// `PORT` maps to `port`; nested settings use `__` as separator, e.g.
/// `APP__DATA_FILE`. Keys are case-insensitive.
pub struct EnvFileProvider {
    env_file: PathBuf,
    environment: EnvironmentLayer,
}

impl EnvFileProvider {
    pub fn new(env_file: impl Into<PathBuf>) -> Self {
        Self {
            env_file: env_file.into(),
            environment: EnvironmentLayer::Process,
        }
    }

    /// Uses `variables` instead of the process environment.
    pub fn with_environment<I, K, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = EnvironmentLayer::Fixed(
            variables
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        );
        self
    }
}

impl Default for EnvFileProvider {
    fn default() -> Self {
        Self::new(".env")
    }
}

/// `APP__DATA_FILE` -> `app.data_file`, the path `config::Environment` produces.
fn config_key(variable: &str) -> String {
    variable.to_lowercase().replace("__", ".")
}

impl ConfigurationProvider for EnvFileProvider {
    fn load(&self) -> Result<Configuration, config::ConfigError> {
        let mut settings = config::Config::default();

        let entries = dotenvy::from_filename_iter(&self.env_file)
            .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
        // file values sit below every environment source.
        for entry in entries {
            let (key, value) = entry.map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
            settings.set_default(&config_key(&key), value)?;
        }

        match &self.environment {
            EnvironmentLayer::Process => {
                settings.merge(config::Environment::default().separator("__"))?;
            }
            EnvironmentLayer::Fixed(variables) => {
                for (key, value) in variables {
                    settings.set(&config_key(key), value.as_str())?;
                }
            }
        }

        settings.try_into()
    }
}
