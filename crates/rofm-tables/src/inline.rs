//! Tables packed onto a single outcome line, e.g. `d4 1 ruby 2 emerald 3-4 pearl`.

use tracing::debug;

use crate::config::TableConfig;
use crate::item::TableItem;
use crate::patterns::{INLINE_DIE, ITEM, strip_trash};
use crate::table::{Table, TableKind};

/// Parse an inline table starting at a `dK` marker.
///
/// Items are consumed from the tail one at a time, each running up to the
/// next number. Returns `None` when any part of the tail does not read as an
/// item or when no items are found, so the caller can keep the text as-is.
pub fn parse_inline_table(text: &str, depth: usize, config: &TableConfig) -> Option<Table> {
    let caps = INLINE_DIE.captures(text)?;
    let die = caps[1].parse::<u64>().ok()?;
    let mut tail = caps.get(2).map_or("", |m| m.as_str());
    let mut items = Vec::new();

    while !tail.is_empty() {
        let Some(item) = ITEM.captures(strip_trash(tail)) else {
            debug!(tail, "inline table tail is not an item");
            return None;
        };
        let mut this_out = item.get(3).map_or("", |m| m.as_str());
        match this_out.find(|c: char| c.is_ascii_digit()) {
            Some(next) => {
                tail = &this_out[next..];
                this_out = &this_out[..next];
            }
            None => tail = "",
        }

        let range = item.get(2).map_or("", |m| m.as_str());
        let line = format!("{}{range}{this_out}", &item[1]);
        if let Some(parsed) = TableItem::parse(&line, depth, config) {
            items.push(parsed);
        }
    }

    if items.is_empty() {
        debug!(die, "inline table has no items");
        return None;
    }

    Some(Table {
        header: String::new(),
        die,
        items,
        kind: TableKind::Inline,
    })
}
