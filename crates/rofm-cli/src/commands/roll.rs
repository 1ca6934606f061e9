use colored::Colorize;

use rofm_dice::{DiceRoller, RollLimits};

use crate::diagnostics::report_dice_error;

pub fn run(
    expression: &str,
    times: u32,
    seed: Option<u64>,
    breakdown: bool,
    limits: RollLimits,
) -> Result<(), String> {
    let mut roller = match seed {
        Some(seed) => DiceRoller::seeded(limits, seed),
        None => DiceRoller::new(limits),
    };

    let mut roll = roller
        .parse(expression)
        .map_err(|e| report_dice_error(expression, &e))?;

    for i in 0..times.max(1) {
        if i > 0 {
            roller
                .reroll(&mut roll)
                .map_err(|e| report_dice_error(expression, &e))?;
        }
        if breakdown {
            println!("  {} {roll}", roll.notation().bold());
        } else {
            println!("{}", roll.value());
        }
    }

    Ok(())
}
