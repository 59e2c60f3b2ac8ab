use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// User settings: reminder time, reminder on/off, dark mode.
///
/// Stored as TOML in the platform config directory. Each field is a plain
/// scalar; missing fields fall back to their defaults so old files keep
/// loading after upgrades.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub notifications_enabled: bool,

    /// Hour of the daily reminder (0-23)
    #[serde(default = "default_notification_hour")]
    pub notification_hour: u32,

    /// Minute of the daily reminder (0-59)
    #[serde(default)]
    pub notification_minute: u32,

    #[serde(default)]
    pub dark_mode: bool,
}

fn default_notification_hour() -> u32 {
    8 // 8:00 AM - early enough to plan the day's meals
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications_enabled: false,
            notification_hour: default_notification_hour(),
            notification_minute: 0,
            dark_mode: false,
        }
    }
}

impl Settings {
    /// Load settings from the default location, falling back to defaults if
    /// no file exists yet
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let settings: Settings = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse settings: {}", e)))?;
            Ok(settings)
        } else {
            // No settings file? Use defaults
            Ok(Self::default())
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::settings_path()?)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Update the reminder time. Out-of-range values are rejected and leave
    /// the current time untouched.
    pub fn set_notification_time(&mut self, hour: u32, minute: u32) -> crate::Result<()> {
        if hour > 23 || minute > 59 {
            warn!("Rejected invalid reminder time {}:{:02}", hour, minute);
            return Err(crate::Error::InvalidTime { hour, minute });
        }

        self.notification_hour = hour;
        self.notification_minute = minute;
        info!("Reminder time updated to {}", self.notification_time_string());
        Ok(())
    }

    /// "8:00"-style rendering of the reminder time
    pub fn notification_time_string(&self) -> String {
        format!("{}:{:02}", self.notification_hour, self.notification_minute)
    }

    /// Settings file path: XDG config dir on Unix-like systems, AppData on
    /// Windows
    fn settings_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("chillcheck");

        Ok(config_dir.join("settings.toml"))
    }
}
