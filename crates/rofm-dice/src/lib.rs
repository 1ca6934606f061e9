//! Dice expression engine for roll-one.
//!
//! Parses expressions such as `2d6+3`, `4d6^3` (keep the highest three) or
//! `3d20v1` (keep the lowest one), evaluates them with `*`/`/` binding tighter
//! than `+`/`-`, and re-rolls them in place. All sizes are bounded by
//! [`RollLimits`].

pub mod compound;
pub mod config;
pub mod error;
pub mod lexer;
pub mod roller;
pub mod simple;

use rand::Rng;

pub use compound::{CompoundRoll, Operator, Term, floor_div};
pub use config::RollLimits;
pub use error::{DiceError, DiceResult};
pub use roller::DiceRoller;
pub use simple::{KeepMode, SimpleRoll};

/// Parse and evaluate a dice expression once.
pub fn evaluate_dice_expression(
    text: &str,
    limits: &RollLimits,
    rng: &mut impl Rng,
) -> DiceResult<i64> {
    CompoundRoll::parse(text, limits, rng).map(|roll| roll.value())
}
