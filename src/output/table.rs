//
//  listmonk-ops
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Tables
//!
//! Renders a page of [`TableRow`] values with `comfy_table`, plus the cell
//! helpers the row implementations share.
//!
//! ```rust,ignore
//! let table = render_rows(&page.results, color);
//! println!("{table}");
//! ```

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use console::style;

use super::TableRow;

/// Renders `rows` under `T::HEADERS`.
pub fn render_rows<T: TableRow>(rows: &[T], color: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header = T::HEADERS.iter().map(|title| {
        let cell = Cell::new(title);
        if color {
            cell.fg(Color::Cyan)
        } else {
            cell
        }
    });
    table.set_header(header.collect::<Vec<_>>());

    for row in rows {
        table.add_row(row.cells(color));
    }
    table
}

/// Colors a listmonk status by meaning.
///
/// | Color  | Statuses |
/// |--------|----------|
/// | green  | `enabled`, `running`, `confirmed`, `active` |
/// | blue   | `finished` |
/// | red    | `blocklisted`, `cancelled`, `unsubscribed`, `failed` |
/// | yellow | `draft`, `scheduled`, `paused`, `unconfirmed`, `importing` |
pub fn format_status(status: &str, color: bool) -> String {
    if !color {
        return status.to_string();
    }

    let styled = style(status);
    let styled = match status.to_lowercase().as_str() {
        "enabled" | "running" | "confirmed" | "active" => styled.green(),
        "finished" => styled.blue(),
        "blocklisted" | "cancelled" | "unsubscribed" | "failed" => styled.red(),
        "draft" | "scheduled" | "paused" | "unconfirmed" | "importing" => styled.yellow(),
        _ => return status.to_string(),
    };
    styled.to_string()
}

pub fn format_bool(value: bool, color: bool) -> String {
    let text = if value { "Yes" } else { "No" };
    match (color, value) {
        (false, _) => text.to_string(),
        (true, true) => style(text).green().to_string(),
        (true, false) => style(text).dim().to_string(),
    }
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let mut kept: String = s.chars().take(max_len - 3).collect();
    kept.push_str("...");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(u64, &'static str);

    impl TableRow for Row {
        const HEADERS: &'static [&'static str] = &["ID", "Name"];

        fn cells(&self, _color: bool) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_format_without_color() {
        assert_eq!(format_status("running", false), "running");
        assert_eq!(format_bool(true, false), "Yes");
        assert_eq!(format_bool(false, false), "No");
    }

    #[test]
    fn test_rows_render_under_headers() {
        let rendered = render_rows(&[Row(1, "Weekly"), Row(2, "Beta")], false).to_string();
        assert!(rendered.contains("ID"));
        assert!(rendered.contains("Weekly"));
        assert!(rendered.contains("Beta"));
    }
}
