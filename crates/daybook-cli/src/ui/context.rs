//! UI context for environment detection and configuration.

use std::io::IsTerminal;

use super::mode::OutputMode;

const DEFAULT_WIDTH: usize = 80;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether stdout is a TTY
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    /// Terminal width in columns
    pub width: usize,
    pub mode: OutputMode,
}

/// Output-related CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiFlags {
    pub json: bool,
    pub no_color: bool,
    pub ascii: bool,
}

/// Snapshot of the terminal facts the UI depends on.
#[derive(Debug, Clone, Default)]
struct TermEnv {
    stdout_tty: bool,
    no_color: bool,
    dumb: bool,
    width: Option<usize>,
}

impl TermEnv {
    fn capture() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            dumb: std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false),
            width: terminal_width(),
        }
    }
}

impl UiContext {
    /// Create context from environment and CLI flags.
    pub fn from_env(flags: UiFlags) -> Self {
        Self::resolve(flags, &TermEnv::capture())
    }

    fn resolve(flags: UiFlags, env: &TermEnv) -> Self {
        let mode = OutputMode::resolve(flags.json, env.stdout_tty, env.dumb);
        Self {
            is_tty: env.stdout_tty,
            color: mode.is_pretty() && !flags.no_color && !env.no_color,
            unicode: !flags.ascii,
            width: env.width.unwrap_or(DEFAULT_WIDTH),
            mode,
        }
    }

    /// Prompts need both ends of the terminal.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && std::io::stdin().is_terminal()
    }
}

/// Width from `COLUMNS`, then the tty.
fn terminal_width() -> Option<usize> {
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.parse::<usize>().ok())
        .filter(|w| *w > 0)
    {
        return Some(width);
    }

    #[cfg(unix)]
    {
        use std::mem::MaybeUninit;

        let mut winsize = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ only writes into the provided winsize.
        let result =
            unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
        if result == 0 {
            let ws = unsafe { winsize.assume_init() };
            if ws.ws_col > 0 {
                return Some(ws.ws_col as usize);
            }
        }
    }

    None
}
