use crate::core::aggregate::HourWindow;
use crate::core::risk::RiskRules;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub hour_window: HourWindow,
    #[serde(default)]
    pub risk: RiskRules,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            hour_window: HourWindow::default(),
            risk: RiskRules::default(),
        }
    }
}

impl Config {
    /// Return the configuration directory (`~/.gymstats`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gymstats")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("gymstats.conf")
    }

    /// Return the full path of the default SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("gymstats.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the engine would refuse later with a less helpful message.
    pub fn validate(&self) -> AppResult<()> {
        HourWindow::new(self.hour_window.first_hour, self.hour_window.last_hour)
            .map_err(|e| AppError::Config(e.to_string()))?;

        if self.risk.recent_weeks <= 0 || self.risk.prior_weeks <= 0 {
            return Err(AppError::Config(format!(
                "risk windows must be positive (recent_weeks={}, prior_weeks={})",
                self.risk.recent_weeks, self.risk.prior_weeks
            )));
        }
        if self.risk.caution_days < 0 || self.risk.danger_days < self.risk.caution_days {
            return Err(AppError::Config(format!(
                "expected 0 <= caution_days <= danger_days, got {} and {}",
                self.risk.caution_days, self.risk.danger_days
            )));
        }
        Ok(())
    }

    /// Resolve the database path for `init`: a bare name lands in the config dir.
    pub fn resolve_db_path(custom_name: Option<&str>) -> PathBuf {
        match custom_name {
            Some(name) => {
                let p = crate::utils::path::expand_tilde(name);
                if p.is_absolute() {
                    p
                } else {
                    Self::config_dir().join(p)
                }
            }
            None => Self::database_file(),
        }
    }

    /// Initialize configuration and database files.
    ///
    /// With `is_test` the config file is left untouched so test runs never
    /// overwrite the user's settings.
    pub fn init_all(custom_name: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = Self::resolve_db_path(custom_name);
        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }
}
