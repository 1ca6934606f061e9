//! Error types for the dice engine.

use std::ops::Range;

use thiserror::Error;

/// Result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;

/// Errors that can occur while parsing or evaluating a dice expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// The input is not dice notation at all.
    #[error("not dice notation: {message}")]
    Parse {
        /// Human-readable description of what went wrong.
        message: String,
        /// Byte range of the offending input in the normalized expression.
        span: Range<usize>,
    },

    /// The input is well-formed but exceeds the configured limits.
    #[error("roll limit exceeded: {0}")]
    Limit(String),

    /// A divisor evaluated to zero.
    #[error("division by zero")]
    DivisionByZero,

    /// An intermediate value does not fit in 64 bits.
    #[error("arithmetic overflow")]
    Overflow,
}

impl DiceError {
    /// Build a parse error covering `span`.
    pub fn parse(message: impl Into<String>, span: Range<usize>) -> Self {
        Self::Parse {
            message: message.into(),
            span,
        }
    }

    /// Build a limit error.
    pub fn limit(message: impl Into<String>) -> Self {
        Self::Limit(message.into())
    }

    /// Returns true for [`DiceError::Parse`].
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns true for [`DiceError::Limit`].
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::Limit(_))
    }

    /// The source span of a parse error, if any.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::Parse { span, .. } => Some(span.clone()),
            _ => None,
        }
    }

    /// Shift a parse error's span by `offset` bytes.
    ///
    /// Used when a sub-term is parsed in isolation and the error needs to
    /// point back into the full expression.
    pub fn offset(self, offset: usize) -> Self {
        match self {
            Self::Parse { message, span } => Self::Parse {
                message,
                span: span.start + offset..span.end + offset,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let e = DiceError::parse("missing 'd' separator", 0..5);
        assert_eq!(e.to_string(), "not dice notation: missing 'd' separator");
        assert_eq!(
            DiceError::limit("too many dice").to_string(),
            "roll limit exceeded: too many dice"
        );
        assert_eq!(DiceError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn offset_shifts_parse_span_only() {
        let e = DiceError::parse("bad", 1..3).offset(4);
        assert_eq!(e.span(), Some(5..7));
        assert_eq!(DiceError::Overflow.offset(4), DiceError::Overflow);
    }

    #[test]
    fn kind_predicates() {
        assert!(DiceError::parse("x", 0..1).is_parse());
        assert!(!DiceError::parse("x", 0..1).is_limit());
        assert!(DiceError::limit("x").is_limit());
    }
}
