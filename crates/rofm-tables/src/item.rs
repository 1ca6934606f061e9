//! Outcome lines of a table.

use tracing::debug;

use crate::config::TableConfig;
use crate::inline::parse_inline_table;
use crate::patterns::{INLINE_DIE, ITEM, strip_trash};
use crate::table::Table;

/// One weighted outcome of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableItem {
    /// How many faces of the table's die select this item.
    pub weight: u64,
    /// Outcome text, without its weight marker or inline table.
    pub outcome: String,
    /// A sub-table written on the same line as the outcome.
    pub inline: Option<Box<Table>>,
}

impl TableItem {
    /// Parse an outcome line such as `3 A goblin` or `5-6 Two goblins`.
    ///
    /// Returns `None` when the line does not start with a number. `depth` is
    /// the inline nesting level of the table that owns this line.
    pub fn parse(line: &str, depth: usize, config: &TableConfig) -> Option<Self> {
        let caps = ITEM.captures(strip_trash(line))?;
        let mut outcome = strip_trash(caps.get(3).map_or("", |m| m.as_str())).to_string();

        let weight = match caps.get(2) {
            None => 1,
            Some(range) => {
                let start = caps[1].parse::<u64>();
                let stop = strip_trash(range.as_str()).parse::<u64>();
                match (start, stop) {
                    (Ok(start), Ok(stop)) => stop
                        .checked_sub(start)
                        .and_then(|span| span.checked_add(1))
                        .unwrap_or(1),
                    _ => 1,
                }
            }
        };

        let mut inline = None;
        if let Some(start) = INLINE_DIE.find(&outcome).map(|m| m.start()) {
            if depth < config.max_inline_depth {
                match parse_inline_table(&outcome[start..], depth + 1, config) {
                    Some(table) => {
                        outcome = strip_trash(&outcome[..start]).to_string();
                        inline = Some(Box::new(table));
                    }
                    None => debug!(outcome = %outcome, "keeping inline die as plain text"),
                }
            } else {
                debug!(depth, "inline tables nested too deeply; keeping plain text");
            }
        }

        Some(Self {
            weight,
            outcome,
            inline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Option<TableItem> {
        TableItem::parse(line, 0, &TableConfig::default())
    }

    #[test]
    fn single_number_has_weight_one() {
        let item = parse("3. A goblin.").unwrap();
        assert_eq!(item.weight, 1);
        assert_eq!(item.outcome, "A goblin");
        assert!(item.inline.is_none());
    }

    #[test]
    fn range_weight() {
        assert_eq!(parse("5-6 Two goblins").unwrap().weight, 2);
        assert_eq!(parse("1 - 10: Nothing").unwrap().weight, 10);
        assert_eq!(parse("11--20 Rats").unwrap().weight, 10);
    }

    #[test]
    fn backwards_range_defaults_to_one() {
        assert_eq!(parse("6-5 Odd").unwrap().weight, 1);
    }

    #[test]
    fn oversized_range_defaults_to_one() {
        assert_eq!(parse("0-18446744073709551615 everything").unwrap().weight, 1);
        assert_eq!(parse("1-99999999999999999999999 too big").unwrap().weight, 1);
        assert_eq!(
            parse("1-18446744073709551615 nearly everything").unwrap().weight,
            u64::MAX
        );
    }

    #[test]
    fn non_item_lines() {
        assert!(parse("Goblins everywhere").is_none());
        assert!(parse("").is_none());
        assert!(parse("---").is_none());
    }

    #[test]
    fn inline_table_is_split_off() {
        let item = parse("2 Gems: d4 1 ruby 2 emerald 3-4 pearl").unwrap();
        assert_eq!(item.outcome, "Gems");
        let inline = item.inline.unwrap();
        assert_eq!(inline.die, 4);
        let outcomes: Vec<_> = inline.items.iter().map(|i| i.outcome.as_str()).collect();
        assert_eq!(outcomes, vec!["ruby", "emerald", "pearl"]);
        assert_eq!(inline.items[2].weight, 2);
    }

    #[test]
    fn unparseable_inline_keeps_plain_text() {
        let item = parse("4 Roll 3d6 gold").unwrap();
        assert_eq!(item.outcome, "Roll 3d6 gold");
        assert!(item.inline.is_none());
    }

    #[test]
    fn inline_depth_is_limited() {
        let config = TableConfig::default().with_max_inline_depth(0);
        let item = TableItem::parse("2 Gems: d2 1 ruby 2 pearl", 0, &config).unwrap();
        assert!(item.inline.is_none());
        assert_eq!(item.outcome, "Gems: d2 1 ruby 2 pearl");
    }
}
