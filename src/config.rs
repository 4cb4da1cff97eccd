//! Configuration handling for the TUI

use crate::state::{RevalidateMode, ValidationMode, ValidationTiming};
use crate::submit::DEFAULT_DELAY;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Simulated submit latency in milliseconds
    pub submit_delay_ms: Option<u64>,
    /// Validation strategy before the first submit
    pub validation_mode: Option<ValidationMode>,
    /// Validation strategy after a submit attempt
    pub re_validate_mode: Option<RevalidateMode>,
    /// Mask the password field
    pub mask_password: Option<bool>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "profile-form", "profile-form-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Get the log file path
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("profile-form-tui.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DELAY)
    }

    pub fn timing(&self) -> ValidationTiming {
        ValidationTiming::new(
            self.validation_mode.unwrap_or_default(),
            self.re_validate_mode.unwrap_or_default(),
        )
    }

    pub fn mask_password(&self) -> bool {
        self.mask_password.unwrap_or(true)
    }
}
