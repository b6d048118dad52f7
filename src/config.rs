//! Notification configuration
//!
//! Loaded from a JSON file. Every field has a default, so a partial or
//! missing file is fine. Out-of-range values are normalised with a warning
//! rather than rejected.

use crate::error::{AppError, AppResult};
use crate::models::{clamp_duration_ms, Kind};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "MEETDESK_CONFIG";

const APP_DIR: &str = "meetdesk";
const CONFIG_FILE: &str = "notifications.json";

/// Default toast display time per kind, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastDurations {
    pub success_ms: i64,
    pub info_ms: i64,
    pub warning_ms: i64,
    pub error_ms: i64,
}

impl Default for ToastDurations {
    fn default() -> Self {
        Self {
            success_ms: 3000,
            info_ms: 3000,
            warning_ms: 5000,
            error_ms: 6000,
        }
    }
}

impl ToastDurations {
    pub fn for_kind(&self, kind: Kind) -> Duration {
        let ms = match kind {
            Kind::Success => self.success_ms,
            Kind::Info => self.info_ms,
            Kind::Warning => self.warning_ms,
            Kind::Error => self.error_ms,
        };
        clamp_duration_ms(ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub toast_durations: ToastDurations,
    /// Producer channel capacity. `None` means unbounded.
    pub channel_capacity: Option<usize>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_durations: ToastDurations::default(),
            channel_capacity: None,
        }
    }
}

impl NotificationConfig {
    /// `$MEETDESK_CONFIG`, else `<config dir>/meetdesk/notifications.json`.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads from the default location, falling back to defaults when
    /// there is no file.
    pub fn load() -> AppResult<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No configuration directory available, using default notification settings");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!("No notification config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: NotificationConfig = serde_json::from_str(&raw)?;
        info!("Loaded notification config from {}", path.display());
        Ok(config.normalized())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Clamps values that would otherwise misbehave at runtime.
    pub fn normalized(mut self) -> Self {
        let d = &mut self.toast_durations;
        for (name, ms) in [
            ("success_ms", &mut d.success_ms),
            ("info_ms", &mut d.info_ms),
            ("warning_ms", &mut d.warning_ms),
            ("error_ms", &mut d.error_ms),
        ] {
            if *ms < 0 {
                warn!("Negative toast duration {}={}, clamping to 0", name, ms);
                *ms = 0;
            }
        }

        // tokio panics on a zero-capacity bounded channel
        if self.channel_capacity == Some(0) {
            warn!("channel_capacity=0 is not usable, falling back to unbounded");
            self.channel_capacity = None;
        }

        self
    }
}

/// Logs the effective configuration. Only fails on values that survived
/// normalisation in an unusable state.
pub fn validate_config(config: &NotificationConfig) -> AppResult<()> {
    if config.channel_capacity == Some(0) {
        return Err(AppError::config("channel capacity must be positive"));
    }

    info!(
        "Notification config: success={}ms info={}ms warning={}ms error={}ms channel={}",
        config.toast_durations.success_ms,
        config.toast_durations.info_ms,
        config.toast_durations.warning_ms,
        config.toast_durations.error_ms,
        config
            .channel_capacity
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unbounded".to_string()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NotificationConfig::default();
        assert_eq!(config.toast_durations.success_ms, 3000);
        assert_eq!(config.toast_durations.info_ms, 3000);
        assert_eq!(config.toast_durations.warning_ms, 5000);
        assert_eq!(config.toast_durations.error_ms, 6000);
        assert!(config.channel_capacity.is_none());
    }

    #[test]
    fn test_warning_outlasts_success() {
        let durations = ToastDurations::default();
        assert!(durations.for_kind(Kind::Warning) > durations.for_kind(Kind::Success));
    }

    #[test]
    fn test_normalize_clamps_negative_and_zero_capacity() {
        let config = NotificationConfig {
            toast_durations: ToastDurations {
                error_ms: -10,
                ..ToastDurations::default()
            },
            channel_capacity: Some(0),
        }
        .normalized();

        assert_eq!(config.toast_durations.error_ms, 0);
        assert!(config.channel_capacity.is_none());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config: NotificationConfig =
            serde_json::from_str(r#"{"toast_durations": {"warning_ms": 8000}}"#).unwrap();
        assert_eq!(config.toast_durations.warning_ms, 8000);
        assert_eq!(config.toast_durations.success_ms, 3000);
        assert!(config.channel_capacity.is_none());
    }

    #[test]
    fn test_validation_rejects_unnormalized_zero_capacity() {
        let config = NotificationConfig {
            channel_capacity: Some(0),
            ..NotificationConfig::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
