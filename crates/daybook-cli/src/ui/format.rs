//! String formatting utilities for UI rendering.

use daybook_core::store::RATING_MAX;

use super::theme::symbols;

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Pad a string to a fixed width (left-aligned).
pub fn pad_right(s: &str, width: usize) -> String {
    let char_count = s.chars().count();
    if char_count >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - char_count))
    }
}

/// Pad a string to a fixed width (centered, extra space on the right).
pub fn center(s: &str, width: usize) -> String {
    let char_count = s.chars().count();
    if char_count >= width {
        return s.to_string();
    }
    let left = (width - char_count) / 2;
    pad_right(&format!("{}{}", " ".repeat(left), s), width)
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

/// Star bar for a rating: one full star per whole point plus a half
/// star for any fraction.
pub fn stars(rating: f64, unicode: bool) -> String {
    let rating = rating.clamp(0.0, RATING_MAX);
    let full = rating.floor() as usize;
    let mut bar = symbols::STAR.get(unicode).repeat(full);
    if rating.fract() > 0.0 {
        bar.push_str(symbols::STAR_HALF.get(unicode));
    }
    bar
}

/// Rating with one decimal, e.g. `4.5`.
pub fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

/// Shorten an entry id for tables (`entry-7a2e3c0b-...` -> `7a2e3c0b`).
pub fn short_id(id: &str) -> String {
    let body = id.strip_prefix("entry-").unwrap_or(id);
    body.chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_very_short_max() {
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(center("toolong", 3), "toolong");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("hello\nworld"), "hello world");
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(3.0, false), "***");
        assert_eq!(stars(4.6, false), "****+");
        assert_eq!(stars(1.5, true), "\u{2605}\u{2606}");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(4.0), "4.0");
        assert_eq!(format_rating(4.56), "4.6");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("entry-7a2e3c0b-1234-5678"), "7a2e3c0b");
        assert_eq!(short_id("abc"), "abc");
    }
}
