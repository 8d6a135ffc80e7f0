//
//  listmonk-ops
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Renders command results for the `lmk` CLI.
//!
//! | Format | Flag | Lists | Single entities | Other payloads |
//! |--------|------|-------|-----------------|----------------|
//! | JSON | *(default)* | `data` as JSON | `data` as JSON | `data` as JSON |
//! | Table | `--table` | [`TableRow`] table | [`TableOutput`] view | JSON |
//!
//! With `--envelope` the whole [`Envelope`] (payload, hoisted `meta`,
//! request and response) is printed instead of `data` alone.
//!
//! Status lines (`✓ List deleted`) go to stderr in JSON mode so that stdout
//! stays parseable.

mod json;
mod table;

pub use json::*;
pub use table::*;

use console::style;
use serde::Serialize;

use crate::api::common::{Envelope, Page};

/// The available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

/// Writes envelopes in the selected [`OutputFormat`].
///
/// Colors follow the terminal: they are off when output is piped or
/// `NO_COLOR` is set.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
    envelope: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
            envelope: false,
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    /// Prints whole envelopes instead of their payload in JSON mode.
    pub fn with_envelope(mut self, envelope: bool) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a single entity.
    pub fn write<T: Serialize + TableOutput>(&self, envelope: &Envelope<T>) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                envelope.data.print_table(self.color);
                Ok(())
            }
            OutputFormat::Json => self.write_json_payload(envelope),
        }
    }

    /// Writes one page of a list, with a `Page x of y` footer on stderr in
    /// table mode.
    pub fn write_page<T: Serialize + TableRow>(&self, envelope: &Envelope<Page<T>>) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            return self.write_json_payload(envelope);
        }

        let page = &envelope.data;
        if page.results.is_empty() {
            self.write_info("No results");
            return Ok(());
        }
        println!("{}", render_rows(&page.results, self.color));
        eprintln!(
            "Page {} of {} ({} total)",
            page.page.max(1),
            page.total_pages(),
            page.total
        );
        Ok(())
    }

    /// Writes a payload without a table rendering; JSON in both formats.
    pub fn write_value<T: Serialize>(&self, envelope: &Envelope<T>) -> anyhow::Result<()> {
        self.write_json_payload(envelope)
    }

    /// Writes rendered HTML, plain text or logs verbatim.
    pub fn write_text(&self, envelope: &Envelope<String>) -> anyhow::Result<()> {
        if self.envelope {
            write_json(envelope)
        } else {
            println!("{}", envelope.data);
            Ok(())
        }
    }

    fn write_json_payload<T: Serialize>(&self, envelope: &Envelope<T>) -> anyhow::Result<()> {
        if self.envelope {
            write_json(envelope)
        } else {
            write_json(&envelope.data)
        }
    }

    pub fn write_error(&self, msg: &str) {
        eprintln!("{} {msg}", self.label("error:", Label::Error));
    }

    pub fn write_warning(&self, msg: &str) {
        eprintln!("{} {msg}", self.label("warning:", Label::Warning));
    }

    pub fn write_info(&self, msg: &str) {
        eprintln!("{msg}");
    }

    /// Writes a success line; stderr in JSON mode, stdout in table mode.
    pub fn write_success(&self, msg: &str) {
        let line = format!("{} {msg}", self.label("✓", Label::Success));
        if self.format == OutputFormat::Json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn label(&self, text: &str, kind: Label) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = style(text).bold();
        match kind {
            Label::Error => styled.red(),
            Label::Warning => styled.yellow(),
            Label::Success => styled.green(),
        }
        .to_string()
    }
}

#[derive(Clone, Copy)]
enum Label {
    Error,
    Warning,
    Success,
}

/// A type rendered as one row of a list table.
///
/// ```rust,ignore
/// impl TableRow for MailingList {
///     const HEADERS: &'static [&'static str] = &["ID", "Name", "Type"];
///
///     fn cells(&self, _color: bool) -> Vec<String> {
///         vec![self.id.to_string(), self.name.clone(), self.list_type.clone()]
///     }
/// }
/// ```
pub trait TableRow {
    /// Column titles, in cell order.
    const HEADERS: &'static [&'static str];

    /// One cell per header.
    fn cells(&self, color: bool) -> Vec<String>;
}

/// A type rendered as a detail view in table mode.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Prints a bold title underlined with dashes.
pub fn print_header(text: &str) {
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints `key: value`, dimming the key when color is on.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {value}", style(key).dim());
    } else {
        println!("{key}: {value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format_is_json() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
        assert_eq!(OutputWriter::table().format(), OutputFormat::Table);
    }

    #[test]
    fn test_labels_without_color() {
        let writer = OutputWriter {
            format: OutputFormat::Json,
            color: false,
            envelope: false,
        };
        assert_eq!(writer.label("error:", Label::Error), "error:");
    }
}
