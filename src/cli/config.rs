//! Service configuration file
//!
//! A JSON object; only `data_dir` is required.
//!
//! ```json
//! { "data_dir": "./data", "port": 8000, "evaluation_delay_ms": 3000 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::evaluation::{EvaluationLog, DEFAULT_EVALUATION_DELAY};
use crate::http_server::config::{default_host, default_port};
use crate::http_server::{ClassroomState, HttpServerConfig, EVALUATION_LOG_FILE, STUDENTS_FILE};
use crate::records::StudentStore;

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// Student collection file name inside `data_dir`
    #[serde(default = "default_students_file")]
    pub students_file: String,

    /// Evaluation log file name inside `data_dir`
    #[serde(default = "default_evaluation_log_file")]
    pub evaluation_log_file: String,

    /// Delay before a scheduled evaluation runs, in milliseconds
    #[serde(default = "default_evaluation_delay_ms")]
    pub evaluation_delay_ms: u64,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_students_file() -> String {
    STUDENTS_FILE.to_string()
}
fn default_evaluation_log_file() -> String {
    EVALUATION_LOG_FILE.to_string()
}
fn default_evaluation_delay_ms() -> u64 {
    DEFAULT_EVALUATION_DELAY.as_millis() as u64
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        for (key, name) in [
            ("students_file", &self.students_file),
            ("evaluation_log_file", &self.evaluation_log_file),
        ] {
            if name.trim().is_empty() {
                return Err(CliError::config_error(format!("{} must not be empty", key)));
            }
            if Path::new(name).components().count() != 1 {
                return Err(CliError::config_error(format!(
                    "{} must be a plain file name, got '{}'",
                    key, name
                )));
            }
        }

        if self.students_file == self.evaluation_log_file {
            return Err(CliError::config_error(
                "students_file and evaluation_log_file must differ",
            ));
        }

        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }

        Ok(())
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    pub fn students_path(&self) -> PathBuf {
        self.data_path().join(&self.students_file)
    }

    pub fn evaluation_log_path(&self) -> PathBuf {
        self.data_path().join(&self.evaluation_log_file)
    }

    pub fn evaluation_delay(&self) -> Duration {
        Duration::from_millis(self.evaluation_delay_ms)
    }

    pub fn http(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }

    /// Handler state over the configured files
    pub fn classroom_state(&self) -> ClassroomState {
        ClassroomState::new(
            StudentStore::open(self.students_path()),
            EvaluationLog::open(self.evaluation_log_path()),
            self.evaluation_delay(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_config(temp: &TempDir, value: serde_json::Value) -> PathBuf {
        let path = temp.path().join("classroom.json");
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, json!({"data_dir": "/tmp/classroom"}));

        let config = Config::load(&path).unwrap();
        assert_eq!(config.students_file, "students.json");
        assert_eq!(config.evaluation_log_file, "evaluation_log.json");
        assert_eq!(config.evaluation_delay(), Duration::from_secs(3));
        assert_eq!(config.http(), HttpServerConfig::default());
        assert_eq!(
            config.students_path(),
            Path::new("/tmp/classroom").join("students.json")
        );
    }

    #[test]
    fn test_missing_data_dir_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, json!({"port": 8000}));
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_same_file_for_both_documents_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            json!({
                "data_dir": "d",
                "students_file": "all.json",
                "evaluation_log_file": "all.json"
            }),
        );
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_nested_file_name_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, json!({"data_dir": "d", "students_file": "../x.json"}));
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, json!({"data_dir": "d", "port": 0}));
        assert!(Config::load(&path).is_err());
    }
}
