//! Application context for the Daybook CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use once_cell::unsync::OnceCell;
use tracing::debug;

use daybook_core::{parse_user_date, EntryStore, FileStore};

use crate::cli::Cli;
use crate::config::{read_config, DaybookConfig};
use crate::ui::{UiContext, UiFlags};

use super::resolver::{resolve_config_path, resolve_data_dir};

/// Environment variable pinning "today" (used by scripted runs).
const TODAY_ENV: &str = "DAYBOOK_TODAY";

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<DaybookConfig>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the configuration, loading it lazily. A missing config file
    /// yields the defaults.
    pub fn config(&self) -> anyhow::Result<&DaybookConfig> {
        self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if path.exists() {
                debug!(path = %path.display(), "loading config");
                read_config(&path)
            } else {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(DaybookConfig::default())
            }
        })
    }

    /// Resolved data directory.
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        resolve_data_dir(self.cli, self.config()?)
    }

    /// Open the entry store in the data directory.
    pub fn open_store(&self) -> anyhow::Result<EntryStore<FileStore>> {
        let dir = self.data_dir()?;
        let backend = FileStore::open(&dir)?;
        Ok(EntryStore::init(backend))
    }

    /// Build a UI context from global flags.
    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(UiFlags {
            json,
            no_color: self.cli.no_color,
            ascii: self.cli.ascii,
        })
    }

    /// Today's local date, unless pinned by `DAYBOOK_TODAY`.
    pub fn today(&self) -> anyhow::Result<NaiveDate> {
        match std::env::var(TODAY_ENV) {
            Ok(value) if !value.trim().is_empty() => Ok(parse_user_date(&value)?),
            _ => Ok(Local::now().date_naive()),
        }
    }
}
