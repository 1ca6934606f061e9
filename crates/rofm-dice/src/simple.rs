//! Single die terms: `[N]dK[(v|^)L]`.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RollLimits;
use crate::error::{DiceError, DiceResult};

/// Which dice count toward the total when only some are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeepMode {
    /// Keep the lowest dice (`v`).
    Lowest,
    /// Keep the highest dice (`^`).
    Highest,
}

impl KeepMode {
    /// The notation character for this mode.
    pub fn marker(self) -> char {
        match self {
            Self::Lowest => 'v',
            Self::Highest => '^',
        }
    }
}

/// A single die term such as `d20`, `3d6` or `4d6^3`.
///
/// Parameters are fixed at parse time; [`SimpleRoll::roll`] replaces the
/// stored dice and total in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRoll {
    notation: String,
    count: u32,
    sides: u32,
    keep: u32,
    mode: Option<KeepMode>,
    dice: Vec<u32>,
    value: i64,
}

impl SimpleRoll {
    /// Parse a die term and perform its initial roll.
    ///
    /// Whitespace is ignored and the input is lowercased. Returns
    /// [`DiceError::Parse`] when the text is not die notation and
    /// [`DiceError::Limit`] when it is but falls outside `limits`.
    pub fn parse(input: &str, limits: &RollLimits, rng: &mut impl Rng) -> DiceResult<Self> {
        let notation: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        let whole = 0..notation.len();

        let Some((count_str, tail)) = notation.split_once('d') else {
            return Err(DiceError::parse("missing 'd' separator", whole));
        };
        if tail.contains('d') {
            return Err(DiceError::parse("more than one 'd' in a die term", whole));
        }

        let count = if count_str.is_empty() {
            1
        } else {
            parse_number(count_str, "dice count", 0)?
        };

        let mode = match (tail.contains('v'), tail.contains('^')) {
            (true, true) => {
                return Err(DiceError::parse(
                    "a die term may keep lowest or highest, not both",
                    whole,
                ));
            }
            (true, false) => Some(KeepMode::Lowest),
            (false, true) => Some(KeepMode::Highest),
            (false, false) => None,
        };

        let tail_start = count_str.len() + 1;
        let (sides, keep) = match mode {
            None => (parse_number(tail, "face count", tail_start)?, count),
            Some(m) => {
                let (sides_str, keep_str) = tail.split_once(m.marker()).unwrap_or((tail, ""));
                let sides = parse_number(sides_str, "face count", tail_start)?;
                let keep = parse_number(
                    keep_str,
                    "kept dice count",
                    tail_start + sides_str.len() + 1,
                )?;
                (sides, keep)
            }
        };

        validate(count, sides, keep, limits)?;

        let mut roll = Self {
            notation,
            // validate() bounds all three by u32 limits
            count: count as u32,
            sides: sides as u32,
            keep: keep as u32,
            mode,
            dice: Vec::new(),
            value: 0,
        };
        roll.roll(rng);
        debug!(notation = %roll.notation, value = roll.value, "parsed die term");
        Ok(roll)
    }

    /// Re-roll every die, replacing the stored dice and total.
    pub fn roll(&mut self, rng: &mut impl Rng) -> i64 {
        let mut dice: Vec<u32> = (0..self.count)
            .map(|_| rng.random_range(1..=self.sides))
            .collect();
        dice.sort_unstable();
        self.value = sum(self.kept_slice_of(&dice));
        self.dice = dice;
        self.value
    }

    /// The total of the kept dice from the last roll.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// All dice from the last roll, sorted ascending.
    pub fn dice(&self) -> &[u32] {
        &self.dice
    }

    /// The dice from the last roll that count toward the total.
    pub fn kept(&self) -> &[u32] {
        self.kept_slice_of(&self.dice)
    }

    /// Number of dice rolled (`N`).
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Number of faces per die (`K`).
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Number of dice kept (`L`).
    pub fn keep(&self) -> u32 {
        self.keep
    }

    /// The keep marker, if one was written.
    pub fn keep_mode(&self) -> Option<KeepMode> {
        self.mode
    }

    /// The normalized notation this roll was parsed from.
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// Lowest and highest achievable totals: `(L, L*K)`.
    pub fn range(&self) -> (i64, i64) {
        let keep = i64::from(self.keep);
        (keep, keep * i64::from(self.sides))
    }

    /// True when a keep marker actually drops dice.
    fn is_restricted(&self) -> bool {
        self.mode.is_some() && self.keep < self.count
    }

    fn kept_slice_of<'a>(&self, dice: &'a [u32]) -> &'a [u32] {
        let keep = self.keep as usize;
        if !self.is_restricted() {
            return dice;
        }
        match self.mode {
            Some(KeepMode::Lowest) => &dice[..keep],
            Some(KeepMode::Highest) => &dice[dice.len() - keep..],
            None => dice,
        }
    }
}

fn parse_number(text: &str, what: &str, offset: usize) -> DiceResult<u64> {
    text.parse::<u64>().map_err(|_| {
        let span = offset..offset + text.len().max(1);
        if text.is_empty() {
            DiceError::parse(format!("missing {what}"), span)
        } else {
            DiceError::parse(format!("{what} '{text}' is not a number"), span)
        }
    })
}

fn validate(count: u64, sides: u64, keep: u64, limits: &RollLimits) -> DiceResult<()> {
    if keep == 0 {
        return Err(DiceError::limit("must keep at least one die"));
    }
    if count == 0 {
        return Err(DiceError::limit("must roll at least one die"));
    }
    if sides < 2 {
        return Err(DiceError::limit("a die needs at least two faces"));
    }
    if keep > count {
        return Err(DiceError::limit(format!(
            "cannot keep {keep} of {count} dice"
        )));
    }
    if count > u64::from(limits.max_dice_count) {
        return Err(DiceError::limit(format!(
            "{count} dice exceeds the maximum of {}",
            limits.max_dice_count
        )));
    }
    if sides > u64::from(limits.max_face_count) {
        return Err(DiceError::limit(format!(
            "d{sides} exceeds the maximum of {} faces",
            limits.max_face_count
        )));
    }
    Ok(())
}

fn sum(dice: &[u32]) -> i64 {
    dice.iter().map(|&d| i64::from(d)).sum()
}

fn join(dice: &[u32]) -> String {
    dice.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for SimpleRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 1 {
            let face = self.dice.first().copied().unwrap_or_default();
            return write!(f, "[d{}] -> {face}", self.sides);
        }
        let keep = self.keep as usize;
        match self.mode {
            Some(KeepMode::Lowest) if self.is_restricted() => write!(
                f,
                "[{}: {} ({})] -> {}",
                self.notation,
                join(&self.dice[..keep]),
                join(&self.dice[keep..]),
                self.value
            ),
            Some(KeepMode::Highest) if self.is_restricted() => {
                let split = self.dice.len() - keep;
                write!(
                    f,
                    "[{}: ({}) {}] -> {}",
                    self.notation,
                    join(&self.dice[..split]),
                    join(&self.dice[split..]),
                    self.value
                )
            }
            _ => write!(
                f,
                "[{}: {}] -> {}",
                self.notation,
                join(&self.dice),
                self.value
            ),
        }
    }
}
