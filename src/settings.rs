use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ALERT_DAYS_WINDOW: u32 = 7;

/// Window choices offered to coordinators, in days.
pub const ALERT_WINDOW_PRESETS: [u32; 4] = [3, 7, 14, 30];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Look-ahead horizon, in days, for "due soon" alerts. Must be positive.
    pub alert_days_window: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alert_days_window: DEFAULT_ALERT_DAYS_WINDOW,
        }
    }
}

impl Settings {
    pub fn new(alert_days_window: u32) -> Result<Self, SettingsError> {
        let settings = Self { alert_days_window };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.alert_days_window == 0 {
            return Err(SettingsError::ZeroAlertWindow);
        }
        Ok(())
    }

    pub fn is_preset_window(&self) -> bool {
        ALERT_WINDOW_PRESETS.contains(&self.alert_days_window)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    ZeroAlertWindow,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::ZeroAlertWindow => {
                write!(f, "alert days window must be a positive number of days")
            }
        }
    }
}

impl std::error::Error for SettingsError {}
