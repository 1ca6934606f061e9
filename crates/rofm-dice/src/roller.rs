//! A long-lived dice engine owning its limits and random source.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::compound::CompoundRoll;
use crate::config::RollLimits;
use crate::error::DiceResult;

/// Parses and rolls expressions against fixed limits and one RNG.
#[derive(Debug, Clone)]
pub struct DiceRoller {
    limits: RollLimits,
    rng: StdRng,
}

impl DiceRoller {
    /// Create a roller seeded from the operating system.
    pub fn new(limits: RollLimits) -> Self {
        Self {
            limits,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a roller with a fixed seed for reproducible rolls.
    pub fn seeded(limits: RollLimits, seed: u64) -> Self {
        Self {
            limits,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The limits applied to every parse.
    pub fn limits(&self) -> &RollLimits {
        &self.limits
    }

    /// Parse an expression, performing its initial roll.
    pub fn parse(&mut self, expression: &str) -> DiceResult<CompoundRoll> {
        CompoundRoll::parse(expression, &self.limits, &mut self.rng)
    }

    /// Parse and evaluate an expression once.
    pub fn evaluate(&mut self, expression: &str) -> DiceResult<i64> {
        self.parse(expression).map(|roll| roll.value())
    }

    /// Re-roll a previously parsed expression.
    pub fn reroll(&mut self, roll: &mut CompoundRoll) -> DiceResult<i64> {
        roll.roll(&mut self.rng)
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new(RollLimits::default())
    }
}
