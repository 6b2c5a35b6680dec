use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_hijri_offset() -> i32 {
    0
}
fn default_refresh_secs() -> u64 {
    60
}
fn default_lead_minutes() -> u32 {
    15
}
fn default_gold_price() -> f64 {
    7500.0
}
fn default_silver_price() -> f64 {
    100.0
}
fn default_gold_nisab_grams() -> f64 {
    87.48
}
fn default_silver_nisab_grams() -> f64 {
    612.36
}
fn default_zakat_rate() -> f64 {
    0.025
}
fn default_currency() -> String {
    "BDT".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Days to add/subtract from Hijri date for local moon sighting.
    /// 0 = default (Saudi), -1 = one day behind (common in Bangladesh)
    #[serde(default = "default_hijri_offset")]
    pub hijri_offset: i32,
    /// How often the dashboard recomputes countdowns.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hijri_offset: default_hijri_offset(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Minutes before Sehri end / Iftar at which the dashboard shows a reminder.
    #[serde(default = "default_lead_minutes")]
    pub lead_minutes: u32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            lead_minutes: default_lead_minutes(),
        }
    }
}

/// Metal prices change; they live here so they can be updated without a rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZakatConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_gold_price")]
    pub gold_price_per_gram: f64,
    #[serde(default = "default_silver_price")]
    pub silver_price_per_gram: f64,
    #[serde(default = "default_gold_nisab_grams")]
    pub gold_nisab_grams: f64,
    #[serde(default = "default_silver_nisab_grams")]
    pub silver_nisab_grams: f64,
    #[serde(default = "default_zakat_rate")]
    pub rate: f64,
}

impl Default for ZakatConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            gold_price_per_gram: default_gold_price(),
            silver_price_per_gram: default_silver_price(),
            gold_nisab_grams: default_gold_nisab_grams(),
            silver_nisab_grams: default_silver_nisab_grams(),
            rate: default_zakat_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    /// Replacement for the bundled schedule.json (e.g. next year's timetable).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub zakat: ZakatConfig,
    #[serde(default)]
    pub data: DataConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "sehri").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("sehri.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}; using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.zakat.gold_price_per_gram, 7500.0);
        assert_eq!(config.zakat.silver_nisab_grams, 612.36);
        assert_eq!(config.display.refresh_secs, 60);
        assert!(config.data.schedule_path.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[zakat]\ngold_price_per_gram = 11000.0\n").unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.zakat.gold_price_per_gram, 11000.0);
        assert_eq!(config.zakat.silver_price_per_gram, 100.0);
        assert_eq!(config.zakat.rate, 0.025);
        assert_eq!(config.reminders.lead_minutes, 15);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.display.hijri_offset = -1;
        config.data.schedule_path = Some(PathBuf::from("/tmp/schedule-2026.json"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.display.hijri_offset, -1);
        assert_eq!(
            loaded.data.schedule_path,
            Some(PathBuf::from("/tmp/schedule-2026.json"))
        );
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[zakat\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
