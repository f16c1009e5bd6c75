//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Resource not found (entry, date, config).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;
}

/// Store key holding the persisted calendar anchor month.
pub const ANCHOR_KEY: &str = "calendarAnchor";

/// Category applied to new entries when none is given.
pub const DEFAULT_CATEGORY: &str = "Personal";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "DAYBOOK_CONFIG";

/// Environment variable holding the log filter. `RUST_LOG` is used when unset.
pub const LOG_ENV: &str = "DAYBOOK_LOG";
