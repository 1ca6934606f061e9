//! The result of rolling one table once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::patterns::strip_trash;

/// One roll on one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRoll {
    /// The table's heading text.
    pub header: String,
    /// Declared die size.
    pub die: u64,
    /// The random draw, or `None` if the table could not be rolled.
    pub rolled: Option<u64>,
    /// The selected outcome text, or `None` if the table could not be rolled.
    pub outcome: Option<String>,
    /// Non-fatal problems found while rolling.
    pub warnings: Vec<String>,
    /// The roll on the selected outcome's inline table.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub inline: Option<Box<TableRoll>>,
}

impl TableRoll {
    /// A roll with no outcome, recording why the table could not be rolled.
    pub fn failed(header: &str, die: u64, error: &TableError) -> Self {
        Self {
            header: header.to_string(),
            die,
            rolled: None,
            outcome: None,
            warnings: vec![error.to_string()],
            inline: None,
        }
    }

    /// True when the table could not be rolled.
    pub fn is_null(&self) -> bool {
        self.outcome.is_none()
    }
}

impl fmt::Display for TableRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for warning in &self.warnings {
            writeln!(f, "[Table roll warning: {warning}.]")?;
        }
        let header = strip_trash(&self.header);
        if !header.is_empty() {
            writeln!(f, "{header}...")?;
        }
        match (self.rolled, &self.outcome) {
            (Some(rolled), Some(outcome)) => {
                write!(f, "(d{} -> {rolled}) {outcome}.", self.die)?;
            }
            _ => write!(f, "(d{}) no outcome.", self.die)?,
        }
        if let Some(inline) = &self.inline {
            write!(f, "\nSubtable: {inline}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableRoll {
        TableRoll {
            header: "Treasure".into(),
            die: 2,
            rolled: Some(1),
            outcome: Some("Gems".into()),
            warnings: Vec::new(),
            inline: Some(Box::new(TableRoll {
                header: String::new(),
                die: 4,
                rolled: Some(3),
                outcome: Some("pearl".into()),
                warnings: vec!["expected 4 items, found 3".into()],
                inline: None,
            })),
        }
    }

    #[test]
    fn render_with_subtable() {
        insta::assert_snapshot!(sample().to_string(), @r"
        Treasure...
        (d2 -> 1) Gems.
        Subtable: [Table roll warning: expected 4 items, found 3.]
        (d4 -> 3) pearl.
        ");
    }

    #[test]
    fn render_failed_roll() {
        let roll = TableRoll::failed("Empty", 6, &TableError::NoOutcomes);
        assert!(roll.is_null());
        assert_eq!(
            roll.to_string(),
            "[Table roll warning: table has no outcomes.]\nEmpty...\n(d6) no outcome."
        );
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["die"], 2);
        assert_eq!(json["outcome"], "Gems");
        assert_eq!(json["inline"]["outcome"], "pearl");
        assert!(json["inline"].get("inline").is_none());
    }
}
