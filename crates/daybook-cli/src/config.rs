use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use daybook_core::TimelineConfig;

use crate::constants::DEFAULT_CATEGORY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DaybookConfig {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub entries: EntriesSection,
    #[serde(default)]
    pub calendar: TimelineConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StorageSection {
    pub dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntriesSection {
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default)]
    pub default_img_url: Option<String>,
}

impl Default for EntriesSection {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            default_img_url: None,
        }
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl DaybookConfig {
    pub fn new(data_dir: PathBuf, default_category: Option<String>) -> Self {
        let mut config = Self::default();
        config.storage.dir = Some(data_dir.to_string_lossy().to_string());
        if let Some(category) = default_category {
            config.entries.default_category = category;
        }
        config
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    xdg_data_dir()
}

pub fn read_config(path: &Path) -> anyhow::Result<DaybookConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &DaybookConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("daybook"));
        }
    }
    Ok(home_dir()?.join(".config").join("daybook"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("daybook"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("daybook"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: DaybookConfig = toml::from_str("").unwrap();
        assert_eq!(config.entries.default_category, "Personal");
        assert_eq!(config.storage.dir, None);
        assert_eq!(config.calendar.half_width, 24);
    }

    #[test]
    fn test_partial_calendar_section() {
        let config: DaybookConfig = toml::from_str(
            "[entries]\ndefault_category = \"Work\"\n\n[calendar]\nhalf_width = 6\n\n[calendar.settle]\nscroll_ms = 500\n",
        )
        .unwrap();
        assert_eq!(config.entries.default_category, "Work");
        assert_eq!(config.calendar.half_width, 6);
        assert_eq!(config.calendar.extend_step, 20);
        assert_eq!(config.calendar.settle.scroll_ms, 500);
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = DaybookConfig::new(PathBuf::from("/tmp/daybook"), Some("Travel".into()));

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.storage.dir.as_deref(), Some("/tmp/daybook"));
    }
}
