//! Tokenizer for dice expressions.

use logos::Logos;
use std::fmt;
use std::ops::Range;

use crate::compound::Operator;
use crate::error::{DiceError, DiceResult};

/// Token type for dice expressions.
///
/// Die terms are kept as raw text; their internal structure (`NdKvL`) is
/// validated by [`crate::SimpleRoll::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Non-negative integer literal.
    Number(i64),
    /// A single die term such as `4d6^3`.
    Die(String),
    /// One of `+ - * /`.
    Op(Operator),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{n}"),
            Token::Die(s) => write!(f, "{s}"),
            Token::Op(op) => write!(f, "{op}"),
        }
    }
}

/// Raw logos token, borrowed from the source and converted to a [`Token`].
#[derive(Logos, Debug)]
enum RawToken {
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"[0-9]*d[0-9v^]*")]
    Die,
}

/// Lex a normalized (lowercase, whitespace-free) expression into
/// `(Token, Span)` pairs. Stops at the first unrecognized character.
pub fn lex(source: &str) -> DiceResult<Vec<(Token, Range<usize>)>> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let raw = result.map_err(|()| {
            DiceError::parse(
                format!("unexpected character '{}'", lexer.slice()),
                span.clone(),
            )
        })?;
        let token = match raw {
            RawToken::Plus => Token::Op(Operator::Add),
            RawToken::Minus => Token::Op(Operator::Sub),
            RawToken::Star => Token::Op(Operator::Mul),
            RawToken::Slash => Token::Op(Operator::Div),
            RawToken::Number => {
                let value = lexer.slice().parse::<i64>().map_err(|_| {
                    DiceError::parse(
                        format!("number '{}' is too large", lexer.slice()),
                        span.clone(),
                    )
                })?;
                Token::Number(value)
            }
            RawToken::Die => Token::Die(lexer.slice().to_string()),
        };
        tokens.push((token, span));
    }

    Ok(tokens)
}
