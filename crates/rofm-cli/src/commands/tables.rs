use std::io::{self, Read};
use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use tracing::debug;

use rofm_tables::{TableConfig, TableSource};

/// Reply used when the text holds nothing that parses as a table.
pub const NOTHING_FOUND: &str = "I'm sorry, but I can't find anything that I know how to parse.";

/// What to print for the tables found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Rendered rolls, one block per table.
    Text,
    /// Rolls as a JSON array.
    Json,
    /// A listing of parsed tables without rolling.
    List,
}

impl Output {
    pub fn from_flags(json: bool, list: bool) -> Self {
        if list {
            Self::List
        } else if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

pub fn run(
    file: Option<&Path>,
    seed: Option<u64>,
    output: Output,
    max_inline_depth: usize,
) -> Result<(), String> {
    let (text, descriptor) = read_input(file)?;

    let mut config = TableConfig::default().with_max_inline_depth(max_inline_depth);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let source = TableSource::parse_with(&text, descriptor, &config);
    debug!(tables = source.len(), descriptor = source.descriptor(), "scanned input");
    let mut rng = config.rng();

    match output {
        Output::List => print_listing(&source),
        Output::Json => {
            let rolls = source.roll_all(&mut rng);
            let json = serde_json::to_string_pretty(&rolls).map_err(|e| e.to_string())?;
            println!("{json}");
        }
        Output::Text => match source.render(&mut rng) {
            Some(reply) => {
                for line in reply.lines() {
                    if line.starts_with("[Table roll warning") {
                        println!("{}", line.yellow());
                    } else {
                        println!("{line}");
                    }
                }
            }
            None => println!("{NOTHING_FOUND}"),
        },
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<(String, String), String> {
    match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Ok((text, path.display().to_string()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("cannot read stdin: {e}"))?;
            Ok((text, "standard input".to_string()))
        }
    }
}

fn print_listing(source: &TableSource) {
    if source.is_empty() {
        println!("{NOTHING_FOUND}");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Die", "Items", "Weight", "Header", "Warnings"]);

    for (i, t) in source.tables().iter().enumerate() {
        let header = if t.header.is_empty() {
            "-".to_string()
        } else {
            t.header.clone()
        };
        let warnings = t.warnings();
        let warnings = if warnings.is_empty() {
            "-".to_string()
        } else {
            warnings.join("; ")
        };
        table.add_row(vec![
            (i + 1).to_string(),
            format!("d{}", t.die),
            t.items.len().to_string(),
            t.total_weight().map_or_else(|| "overflow".to_string(), |w| w.to_string()),
            header,
            warnings,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} table{} in {}",
        source.len(),
        if source.len() == 1 { "" } else { "s" },
        source.descriptor()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_from_flags() {
        assert_eq!(Output::from_flags(false, false), Output::Text);
        assert_eq!(Output::from_flags(true, false), Output::Json);
        assert_eq!(Output::from_flags(true, true), Output::List);
    }
}
