//! Source-pointing error reports for dice expressions.

use ariadne::{Color, Label, Report, ReportKind, Source};
use rofm_dice::{CompoundRoll, DiceError};

/// Render a dice error against the normalized expression.
///
/// Only parse errors carry a span; other errors render as an empty string.
pub fn render_dice_error(expression: &str, error: &DiceError) -> String {
    let Some(span) = error.span() else {
        return String::new();
    };
    let source = CompoundRoll::normalize(expression);
    // Empty input has nothing to point at
    if source.is_empty() {
        return String::new();
    }
    let end = span.end.min(source.len());
    let span = span.start.min(end)..end;
    let filename = "expression";
    let message = error.to_string();

    let mut output = Vec::new();
    Report::build(ReportKind::Error, (filename, span.clone()))
        .with_message(&message)
        .with_label(
            Label::new((filename, span))
                .with_message("not understood here")
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source.as_str())), &mut output)
        .ok();

    String::from_utf8(output).unwrap_or_default()
}

/// Turn a dice error into the CLI's error string, printing the source
/// report to stderr first when there is one.
pub fn report_dice_error(expression: &str, error: &DiceError) -> String {
    let rendered = render_dice_error(expression, error);
    if !rendered.is_empty() {
        eprint!("{rendered}");
    }
    match error {
        DiceError::Limit(_) => format!("{error} (expression too large)"),
        _ => error.to_string(),
    }
}
