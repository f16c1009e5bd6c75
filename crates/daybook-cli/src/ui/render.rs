//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, NOTHING, UTF8_FULL};
use comfy_table::{
    Attribute, Cell, CellAlignment, ColumnConstraint, ContentArrangement, Table as ComfyTable,
    Width,
};

use super::context::UiContext;
use super::mode::OutputMode;
use super::theme::{styled, styles, symbols, Badge};

/// Render a header line for a command.
///
/// Pretty mode: "Daybook · command (context)"
/// Plain mode: "daybook command"
pub fn header(ctx: &UiContext, command: &str, context: Option<&str>) -> String {
    match ctx.mode {
        OutputMode::Pretty => {
            let title = styled("Daybook", styles::bold(), ctx.color);
            let sep = symbols::SEP.get(ctx.unicode);
            match context {
                Some(c) => format!("{} {} {} ({})", title, sep, command, c),
                None => format!("{} {} {}", title, sep, command),
            }
        }
        OutputMode::Plain => format!("daybook {}", command),
        OutputMode::Json => String::new(),
    }
}

/// Render a divider line.
pub fn divider(ctx: &UiContext) -> String {
    if ctx.mode.is_pretty() {
        let line = if ctx.unicode { "\u{2500}" } else { "-" };
        line.repeat(ctx.width.min(60))
    } else {
        "---".to_string()
    }
}

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line. A leading `Hint:` in `text` is not repeated.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    let text = text.strip_prefix("Hint:").map_or(text, str::trim_start);
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text)
    } else {
        format!("hint={}", text)
    }
}

/// Render a receipt (summary block after an action).
///
/// Pretty mode: Badge + indented key-value pairs
/// Plain mode: status=ok + key=value lines
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }

    lines.join("\n")
}

/// Column definition for table rendering.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub right: bool,
    /// Upper bound on the rendered width (pretty mode)
    pub max_width: Option<u16>,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            right: false,
            max_width: None,
        }
    }

    /// Right-aligned column, for numbers.
    pub const fn right(header: &'static str) -> Self {
        Self {
            right: true,
            ..Self::new(header)
        }
    }

    pub const fn max_width(self, width: u16) -> Self {
        Self {
            max_width: Some(width),
            ..self
        }
    }
}

fn apply_layout(table: &mut ComfyTable, columns: &[Column]) {
    for (i, layout) in columns.iter().enumerate() {
        let Some(column) = table.column_mut(i) else {
            continue;
        };
        if layout.right {
            column.set_cell_alignment(CellAlignment::Right);
        }
        if let Some(width) = layout.max_width {
            column.set_constraint(ColumnConstraint::UpperBoundary(Width::Fixed(width)));
        }
    }
}

/// Render a bordered table in pretty mode; tab-separated rows otherwise.
pub fn table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }

    let mut table = ComfyTable::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);
    table.set_header(columns.iter().map(|c| c.header).collect::<Vec<_>>());
    for row in rows {
        table.add_row(row);
    }
    apply_layout(&mut table, columns);
    table.to_string()
}

/// Render a borderless table with dim headers (pretty mode).
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return plain_rows(rows);
    }

    let mut table = ComfyTable::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|c| {
            let cell = Cell::new(c.header);
            if ctx.color {
                cell.add_attribute(Attribute::Dim)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }
    for i in 0..columns.len() {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
        }
    }
    apply_layout(&mut table, columns);
    table.to_string()
}

/// Tab-separated rows. Tabs and line breaks inside a cell become spaces so
/// every row stays on one line.
fn plain_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.replace(['\t', '\n', '\r'], " "))
                .collect::<Vec<_>>()
                .join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a message to stdout unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Print an empty line (only in pretty mode).
pub fn blank_line(ctx: &UiContext) {
    if ctx.mode.is_pretty() {
        println!();
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    } else {
        lines.push(format!("error={}", message));
        if let Some(h) = error_hint {
            lines.push(hint(ctx, h));
        }
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

/// Print a warning badge to stderr.
pub fn print_warning(ctx: &UiContext, message: &str) {
    if ctx.mode.is_pretty() {
        eprintln!("{}", badge(ctx, Badge::Warn, message));
    } else {
        eprintln!("warning={}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_ctx() -> UiContext {
        UiContext {
            is_tty: false,
            color: false,
            unicode: false,
            width: 80,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            is_tty: true,
            color: false,
            unicode: true,
            width: 80,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_header_pretty() {
        let h = header(&pretty_ctx(), "day", Some("Friday, March 1, 2024"));
        assert!(h.contains("Daybook"));
        assert!(h.contains("day"));
        assert!(h.contains("March 1"));
    }

    #[test]
    fn test_header_plain() {
        assert_eq!(header(&plain_ctx(), "dates", None), "daybook dates");
    }

    #[test]
    fn test_kv_plain() {
        assert_eq!(kv(&plain_ctx(), "Date Key", "2024-03-01"), "date_key=2024-03-01");
    }

    #[test]
    fn test_hint_plain() {
        assert_eq!(hint(&plain_ctx(), "try this"), "hint=try this");
    }

    #[test]
    fn test_hint_prefix_not_repeated() {
        assert_eq!(hint(&plain_ctx(), "Hint: Pass --force"), "hint=Pass --force");
        assert_eq!(hint(&pretty_ctx(), "Hint: Pass --force"), "Hint: Pass --force");
    }

    #[test]
    fn test_plain_rows_stay_on_one_line() {
        let columns = [Column::new("ID"), Column::new("Entry")];
        let rows = vec![vec!["abc".to_string(), "line one\nline\ttwo".to_string()]];
        assert_eq!(table(&plain_ctx(), &columns, &rows), "abc\tline one line two");
    }

    #[test]
    fn test_table_plain_is_tab_separated() {
        let columns = [Column::new("ID"), Column::new("Text")];
        let rows = vec![vec!["abc".to_string(), "walk".to_string()]];
        assert_eq!(table(&plain_ctx(), &columns, &rows), "abc\twalk");
    }

    #[test]
    fn test_table_pretty_has_headers() {
        let columns = [Column::new("ID"), Column::right("Rating"), Column::new("Text").max_width(20)];
        let rows = vec![vec!["abc".to_string(), "4.5".to_string(), "walk".to_string()]];
        let t = table(&pretty_ctx(), &columns, &rows);
        assert!(t.contains("ID"));
        assert!(t.contains("Text"));
        assert!(t.contains("walk"));
    }

    #[test]
    fn test_simple_table_pretty() {
        let columns = [Column::new("Date"), Column::new("Entries")];
        let rows = vec![vec!["2024-03-01".to_string(), "2".to_string()]];
        let t = simple_table(&pretty_ctx(), &columns, &rows);
        assert!(t.contains("Date"));
        assert!(t.contains("2024-03-01"));
    }

    #[test]
    fn test_receipt_plain() {
        let r = receipt(&plain_ctx(), "Added entry", &[("ID", "abc"), ("Date", "2024-03-01")]);
        assert!(r.contains("status=ok"));
        assert!(r.contains("id=abc"));
        assert!(r.contains("date=2024-03-01"));
    }

    #[test]
    fn test_error_message_modes() {
        let e = error_message(&pretty_ctx(), "Something went wrong", Some("Try again"));
        assert!(e.contains("[\u{2717}]"));
        assert!(e.contains("Hint:"));

        let e_plain = error_message(&plain_ctx(), "Something went wrong", Some("Try again"));
        assert!(e_plain.contains("error=Something went wrong"));
        assert!(e_plain.contains("hint=Try again"));
    }

    #[test]
    fn test_divider_ascii() {
        let ctx = UiContext {
            unicode: false,
            ..pretty_ctx()
        };
        assert_eq!(divider(&ctx), "-".repeat(60));
        assert_eq!(divider(&plain_ctx()), "---");
    }
}
