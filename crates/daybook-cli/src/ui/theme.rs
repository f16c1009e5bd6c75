//! Theme definitions for colors, symbols, and badges.

use owo_colors::{OwoColorize, Style};

/// Symbol pair for ASCII and Unicode variants.
#[derive(Debug, Clone, Copy)]
pub struct SymbolPair {
    pub ascii: &'static str,
    pub unicode: &'static str,
}

impl SymbolPair {
    pub const fn new(ascii: &'static str, unicode: &'static str) -> Self {
        Self { ascii, unicode }
    }

    /// Get the appropriate symbol based on unicode flag.
    pub fn get(&self, unicode: bool) -> &'static str {
        if unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// Symbols used by the calendar and card views.
pub mod symbols {
    use super::SymbolPair;

    /// Filled rating star
    pub const STAR: SymbolPair = SymbolPair::new("*", "\u{2605}");
    /// Half rating star
    pub const STAR_HALF: SymbolPair = SymbolPair::new("+", "\u{2606}");
    /// Marker for a day with entries
    pub const ENTRY_DOT: SymbolPair = SymbolPair::new("*", "\u{2022}");
    /// Current card marker
    pub const CURSOR: SymbolPair = SymbolPair::new(">", "\u{25B6}");
    /// Separator between header parts
    pub const SEP: SymbolPair = SymbolPair::new("-", "\u{00B7}");
}

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge text (e.g., "[OK]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
            Self::Info => "[INFO]",
        }
    }

    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        if !unicode {
            return self.text();
        }
        match self {
            Self::Ok => "[\u{2713}]",
            Self::Warn => "[\u{26A0}]",
            Self::Err => "[\u{2717}]",
            Self::Info => "[\u{2139}]",
        }
    }

    /// Color style for the badge.
    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::success(),
            Self::Warn => styles::warning(),
            Self::Err => styles::error(),
            Self::Info => styles::info(),
        }
    }
}

/// Named styles.
pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn success() -> Style {
        Style::new().green()
    }

    pub fn warning() -> Style {
        Style::new().yellow()
    }

    pub fn error() -> Style {
        Style::new().red().bold()
    }

    pub fn info() -> Style {
        Style::new().cyan()
    }

    /// Rating stars
    pub fn star() -> Style {
        Style::new().yellow()
    }

    /// Today's cell in a month grid
    pub fn today() -> Style {
        Style::new().reversed()
    }
}

/// Apply `style` to `text` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_text() {
        assert_eq!(Badge::Ok.text(), "[OK]");
        assert_eq!(Badge::Err.text(), "[ERR]");
    }

    #[test]
    fn test_badge_display_ascii() {
        assert_eq!(Badge::Warn.display(false), "[WARN]");
    }

    #[test]
    fn test_badge_display_unicode() {
        assert_eq!(Badge::Ok.display(true), "[\u{2713}]");
    }

    #[test]
    fn test_symbol_pair() {
        assert_eq!(symbols::STAR.get(false), "*");
        assert_eq!(symbols::STAR.get(true), "\u{2605}");
    }

    #[test]
    fn test_styled_without_color_is_plain() {
        assert_eq!(styled("x", styles::bold(), false), "x");
        assert_ne!(styled("x", styles::bold(), true), "x");
    }
}
