//! Finding every table in a body of free-form text.

use rand::Rng;
use tracing::{debug, warn};

use crate::config::TableConfig;
use crate::patterns::is_heading;
use crate::roll::TableRoll;
use crate::table::Table;

/// All tables found in one body of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    descriptor: String,
    tables: Vec<Table>,
}

impl TableSource {
    /// Scan `text` for tables using the default configuration.
    pub fn parse(text: &str, descriptor: impl Into<String>) -> Self {
        Self::parse_with(text, descriptor, &TableConfig::default())
    }

    /// Scan `text` for tables.
    ///
    /// Each heading line starts a table that runs until the next heading or
    /// the end of the text. Text before the first heading is ignored.
    pub fn parse_with(text: &str, descriptor: impl Into<String>, config: &TableConfig) -> Self {
        let descriptor = descriptor.into();
        let lines: Vec<&str> = text.lines().collect();
        let headings: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_heading(line))
            .map(|(i, _)| i)
            .collect();
        debug!(source = %descriptor, headings = headings.len(), "scanned for tables");

        let tables = headings
            .iter()
            .enumerate()
            .filter_map(|(n, &start)| {
                let end = headings.get(n + 1).copied().unwrap_or(lines.len());
                let chunk = lines[start..end].join("\n");
                let table = Table::parse(&chunk, config);
                if table.is_none() {
                    warn!(heading = lines[start], "heading could not be parsed as a table");
                }
                table
            })
            .collect();

        Self { descriptor, tables }
    }

    /// Where the text came from, e.g. "this thread's original post".
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// The tables in source order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Number of tables found.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when no tables were found.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Roll every table once, in source order.
    ///
    /// A table that cannot be rolled yields a roll with no outcome; the
    /// remaining tables are still rolled.
    pub fn roll_all(&self, rng: &mut impl Rng) -> Vec<TableRoll> {
        self.tables.iter().map(|t| t.roll_or_null(rng)).collect()
    }

    /// Roll every table and render a reply, or `None` if nothing rolled.
    pub fn render(&self, rng: &mut impl Rng) -> Option<String> {
        let rolls: Vec<TableRoll> = self
            .roll_all(rng)
            .into_iter()
            .filter(|r| !r.is_null())
            .collect();
        if rolls.is_empty() {
            return None;
        }
        let mut out = format!("From {}...\n\n", self.descriptor);
        for roll in rolls {
            out.push_str(&roll.to_string());
            out.push_str("\n\n");
        }
        Some(out)
    }
}
