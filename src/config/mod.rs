use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use crate::utils::time::{DEFAULT_TIME_FORMAT, is_valid_time_format};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default = "default_count_key")]
    pub count_key: String,
    #[serde(default = "default_recent_log_size")]
    pub recent_log_size: usize,
}

fn default_export_dir() -> String {
    ".".to_string()
}
fn default_export_file_name() -> String {
    "vehicle_log.csv".to_string()
}
fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}
fn default_count_key() -> String {
    "space".to_string()
}
fn default_recent_log_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            export_file_name: default_export_file_name(),
            time_format: default_time_format(),
            count_key: default_count_key(),
            recent_log_size: default_recent_log_size(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("vtally")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".vtally")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("vtally.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a YAML document. Missing fields take defaults.
    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.time_format.trim().is_empty() || !is_valid_time_format(&self.time_format) {
            return Err(AppError::Config(format!(
                "invalid time_format '{}'",
                self.time_format
            )));
        }
        if self.count_key.trim().is_empty() {
            return Err(AppError::Config("count_key must not be empty".into()));
        }
        if self.recent_log_size == 0 {
            return Err(AppError::Config("recent_log_size must be at least 1".into()));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(AppError::Config("export_file_name must not be empty".into()));
        }
        Ok(())
    }

    /// Directory exports are written to, with `~/` expanded.
    pub fn export_path(&self) -> PathBuf {
        expand_tilde(&self.export_dir)
    }

    /// Default export target for a given file extension.
    pub fn export_target(&self, extension: &str) -> PathBuf {
        let name = PathBuf::from(&self.export_file_name).with_extension(extension);
        self.export_path().join(name)
    }

    /// Whether a key name typed in the session is the counting key.
    pub fn is_count_key(&self, key: &str) -> bool {
        key.trim().eq_ignore_ascii_case(self.count_key.trim())
    }

    /// Create the configuration directory and write the default config file.
    /// In test mode nothing is written.
    pub fn init_all(is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        let path = Self::config_file();
        if is_test {
            return Ok(path);
        }

        fs::create_dir_all(&dir)?;
        let yaml = serde_yaml::to_string(&Self::default())?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(path)
    }
}
