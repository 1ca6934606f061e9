use colored::Colorize;

use rofm_dice::{DiceRoller, RollLimits};

use crate::diagnostics::report_dice_error;

pub fn run(expression: &str, limits: RollLimits) -> Result<(), String> {
    let mut roller = DiceRoller::seeded(limits, 0);
    let roll = roller
        .parse(expression)
        .map_err(|e| report_dice_error(expression, &e))?;
    let (low, high) = roll
        .range()
        .map_err(|e| report_dice_error(expression, &e))?;

    println!("  {} {low} to {high}", roll.notation().bold());
    Ok(())
}
