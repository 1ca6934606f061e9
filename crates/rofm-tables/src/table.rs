//! Tables: a die-size heading followed by weighted outcome lines.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use crate::item::TableItem;
use crate::patterns::{HEADING, strip_trash};
use crate::roll::TableRoll;

/// Warning attached when item weights do not add up to the die.
pub const WEIGHT_MISMATCH: &str = "parsed die did not match sum of item weights";

/// Where a table was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    /// A heading line followed by one outcome per line.
    Block,
    /// Packed into a single outcome line.
    Inline,
}

/// A parsed random table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Text following the die on the heading line.
    pub header: String,
    /// Declared die size: `N*K` for a `NdK` heading.
    pub die: u64,
    /// Outcomes in the order they were written.
    pub items: Vec<TableItem>,
    /// Block or inline.
    pub kind: TableKind,
}

impl Table {
    /// Parse a block table from a heading line and the lines under it.
    ///
    /// Lines that do not start with a number are ignored. Returns `None` when
    /// the first line is not a heading.
    pub fn parse(chunk: &str, config: &TableConfig) -> Option<Self> {
        let mut lines = chunk.lines();
        let head = lines.next()?;
        let caps = HEADING.captures(strip_trash(head))?;

        let count = match caps.get(1) {
            Some(m) => m.as_str().parse::<u64>().ok()?,
            None => 1,
        };
        let faces = caps[2].parse::<u64>().ok()?;
        let die = count.checked_mul(faces)?;
        let header = strip_trash(caps.get(3).map_or("", |m| m.as_str())).to_string();

        let items: Vec<TableItem> = lines
            .filter_map(|line| TableItem::parse(line, 0, config))
            .collect();
        debug!(die, items = items.len(), header = %header, "parsed table");

        Some(Self {
            header,
            die,
            items,
            kind: TableKind::Block,
        })
    }

    /// Sum of all item weights, or `None` if it overflows.
    pub fn total_weight(&self) -> Option<u64> {
        self.items
            .iter()
            .try_fold(0u64, |total, item| total.checked_add(item.weight))
    }

    /// Non-fatal inconsistencies between the die and the items.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.total_weight() != Some(self.die) {
            warnings.push(WEIGHT_MISMATCH.to_string());
        }
        if self.items.len() as u64 != self.die {
            warnings.push(format!(
                "expected {} items, found {}",
                self.die,
                self.items.len()
            ));
        }
        warnings
    }

    /// Roll once, selecting an item with probability proportional to its
    /// weight, and roll any inline table it carries.
    ///
    /// The draw is uniform over the die. When the weights add up to less
    /// than the die it is taken over the total weight instead, so every draw
    /// still lands on an item.
    pub fn roll(&self, rng: &mut impl Rng) -> TableResult<TableRoll> {
        if self.die == 0 {
            return Err(TableError::InvalidDie(self.die));
        }
        let total = self.total_weight().ok_or(TableError::WeightOverflow)?;
        if total == 0 {
            return Err(TableError::NoOutcomes);
        }

        let rolled = rng.random_range(1..=self.die.min(total));

        let mut remaining = rolled;
        let item = self
            .items
            .iter()
            .find(|item| {
                if remaining <= item.weight {
                    true
                } else {
                    remaining -= item.weight;
                    false
                }
            })
            .ok_or(TableError::NoOutcomes)?;

        let inline = item
            .inline
            .as_ref()
            .map(|table| Box::new(table.roll_or_null(rng)));

        Ok(TableRoll {
            header: self.header.clone(),
            die: self.die,
            rolled: Some(rolled),
            outcome: Some(item.outcome.clone()),
            warnings: self.warnings(),
            inline,
        })
    }

    /// Roll once; a table that cannot be rolled yields a roll with no
    /// outcome instead of an error.
    pub fn roll_or_null(&self, rng: &mut impl Rng) -> TableRoll {
        self.roll(rng).unwrap_or_else(|err| {
            warn!(header = %self.header, error = %err, "table roll failed");
            TableRoll::failed(&self.header, self.die, &err)
        })
    }
}
