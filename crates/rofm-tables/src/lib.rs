//! Random table engine for roll-one.
//!
//! Finds tables in free-form text: a heading line declaring a die
//! (`d6 Weather`, `2d4 Loot`) followed by numbered outcome lines (`1 Clear`,
//! `2-3 Rain`). Outcomes may carry inline sub-tables packed onto one line
//! (`Storm: d2 1 thunder 2 hail`). Rolling picks an outcome with probability
//! proportional to its weight and rolls any inline table it carries.

pub mod config;
pub mod error;
pub mod inline;
pub mod item;
pub mod patterns;
pub mod roll;
pub mod source;
pub mod table;

use rand::Rng;

pub use config::TableConfig;
pub use error::{TableError, TableResult};
pub use item::TableItem;
pub use roll::TableRoll;
pub use source::TableSource;
pub use table::{Table, TableKind};

/// Find every table in `text` and roll each once, in source order.
///
/// Returns an empty list when the text contains no tables.
pub fn roll_tables(text: &str, rng: &mut impl Rng) -> Vec<TableRoll> {
    TableSource::parse(text, "text").roll_all(rng)
}
