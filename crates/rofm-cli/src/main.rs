//! CLI frontend for the roll-one dice and random table roller.

mod commands;
mod diagnostics;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use rofm_dice::RollLimits;

#[derive(Parser)]
#[command(
    name = "rofm",
    about = "Roll dice expressions and random tables",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log parsing details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Bounds applied while parsing a dice expression.
#[derive(Args)]
struct LimitArgs {
    /// Maximum dice in a single term
    #[arg(long, default_value = "100")]
    max_dice: u32,

    /// Maximum faces on a die
    #[arg(long, default_value = "1000")]
    max_faces: u32,

    /// Maximum operators in an expression
    #[arg(long, default_value = "20")]
    max_ops: usize,
}

impl LimitArgs {
    fn limits(&self) -> RollLimits {
        RollLimits::default()
            .with_max_dice_count(self.max_dice)
            .with_max_face_count(self.max_faces)
            .with_max_operator_count(self.max_ops)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice expression such as `2d6+3` or `4d6^3`
    Roll {
        /// The expression; several words are joined
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,

        /// Number of times to roll
        #[arg(short = 'n', long, default_value = "1")]
        times: u32,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Show every die alongside the total
        #[arg(short, long)]
        breakdown: bool,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Show the lowest and highest result of a dice expression
    Range {
        /// The expression; several words are joined
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Find random tables in text and roll each one
    Tables {
        /// File to scan (default: stdin)
        file: Option<PathBuf>,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the rolls as JSON
        #[arg(long)]
        json: bool,

        /// List the parsed tables instead of rolling
        #[arg(short, long)]
        list: bool,

        /// How deeply inline tables may nest
        #[arg(long, default_value = "3")]
        max_inline_depth: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Roll {
            expression,
            times,
            seed,
            breakdown,
            limits,
        } => commands::roll::run(&expression.join(" "), times, seed, breakdown, limits.limits()),
        Commands::Range { expression, limits } => {
            commands::range::run(&expression.join(" "), limits.limits())
        }
        Commands::Tables {
            file,
            seed,
            json,
            list,
            max_inline_depth,
        } => commands::tables::run(
            file.as_deref(),
            seed,
            commands::tables::Output::from_flags(json, list),
            max_inline_depth,
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
