//! Path resolution for the config file and data directory.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{default_config_path, default_data_dir, DaybookConfig};
use crate::constants::CONFIG_ENV;

/// Resolve the config file path, checking DAYBOOK_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the data directory.
///
/// Order: `--data-dir` / `DAYBOOK_DIR`, then `[storage] dir` from the config,
/// then the XDG data directory.
pub fn resolve_data_dir(cli: &Cli, config: &DaybookConfig) -> anyhow::Result<PathBuf> {
    if let Some(dir) = cli.data_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = config.storage.dir.as_deref().filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    default_data_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flag_wins_over_config() {
        let cli = Cli::parse_from(["daybook", "--data-dir", "/flag", "dates"]);
        let mut config = DaybookConfig::default();
        config.storage.dir = Some("/config".to_string());
        assert_eq!(resolve_data_dir(&cli, &config).unwrap(), PathBuf::from("/flag"));
    }

    #[test]
    fn test_config_dir_used_without_flag() {
        let cli = Cli::parse_from(["daybook", "--data-dir", "", "dates"]);
        let mut config = DaybookConfig::default();
        config.storage.dir = Some("/config".to_string());
        assert_eq!(resolve_data_dir(&cli, &config).unwrap(), PathBuf::from("/config"));
    }
}
