use crate::error::{CalResult, Error};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use toml;

/// Default notification title, matching the desktop app's dialog title
pub const DEFAULT_NOTIFICATION_TITLE: &str = "알림";

/// Default name of the data file holding events and holidays
pub const DEFAULT_DATA_FILE: &str = "calendar_events.json";

/// Default alarm check interval in seconds
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;

/// Main configuration structure for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the JSON file events and holidays are persisted to
    pub data_file: PathBuf,
    /// Title used for every desktop notification
    pub notification_title: String,
    /// How often the reminder loop scans the store, in seconds
    pub check_interval_secs: u64,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> CalResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let data_file = match env::var("CALENDAR_DATA_FILE") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_data_file(),
        };

        let notification_title = env::var("NOTIFICATION_TITLE")
            .unwrap_or_else(|_| String::from(DEFAULT_NOTIFICATION_TITLE));

        let check_interval_secs = match env::var("CHECK_INTERVAL_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|_| {
                Error::Config(format!("Invalid CHECK_INTERVAL_SECS value: {}", value))
            })?,
            Err(_) => DEFAULT_CHECK_INTERVAL_SECS,
        };
        if check_interval_secs == 0 {
            return Err(Error::Config(
                "CHECK_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        // Initialize default components
        let mut components = HashMap::new();
        components.insert("holidays".to_string(), true);
        components.insert("reminders".to_string(), true);

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string("config/components.toml") {
            if let Ok(file_components) = toml::from_str::<HashMap<String, bool>>(&content) {
                // Merge with defaults
                for (key, value) in file_components {
                    components.insert(key, value);
                }
            }
        }

        Ok(Config {
            data_file,
            notification_title,
            check_interval_secs,
            components,
        })
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }

    /// Update component enabled status
    #[allow(dead_code)]
    pub fn set_component_enabled(&mut self, name: &str, enabled: bool) -> CalResult<()> {
        self.components.insert(name.to_string(), enabled);
        self.save_components()
    }

    /// Save component configuration to file
    #[allow(dead_code)]
    fn save_components(&self) -> CalResult<()> {
        // Create config directory if it doesn't exist
        if !Path::new("config").exists() {
            fs::create_dir("config")?;
        }

        let toml_str = toml::to_string(&self.components)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write("config/components.toml", toml_str)?;

        Ok(())
    }
}

/// Default data file location under the platform data directory,
/// falling back to the working directory when none is available
fn default_data_file() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("dallyeok").join(DEFAULT_DATA_FILE),
        None => PathBuf::from(DEFAULT_DATA_FILE),
    }
}
