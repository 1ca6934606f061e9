//! Compound expressions: die terms and integer literals joined by `+ - * /`.
//!
//! Multiplication and division bind tighter than addition and subtraction;
//! both levels associate left-to-right. Parentheses are not supported and
//! division rounds toward negative infinity.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RollLimits;
use crate::error::{DiceError, DiceResult};
use crate::lexer::{Token, lex};
use crate::simple::SimpleRoll;

/// A binary operator between two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/` (floor division)
    Div,
}

impl Operator {
    /// The notation character for this operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// True for `*` and `/`, which are resolved before `+` and `-`.
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }

    /// Apply this operator to two values.
    pub fn apply(self, lhs: i64, rhs: i64) -> DiceResult<i64> {
        match self {
            Self::Add => lhs.checked_add(rhs).ok_or(DiceError::Overflow),
            Self::Sub => lhs.checked_sub(rhs).ok_or(DiceError::Overflow),
            Self::Mul => lhs.checked_mul(rhs).ok_or(DiceError::Overflow),
            Self::Div => floor_div(lhs, rhs),
        }
    }

    /// Apply this operator to two `(low, high)` intervals, returning the
    /// interval of every possible result.
    pub fn apply_range(self, lhs: (i64, i64), rhs: (i64, i64)) -> DiceResult<(i64, i64)> {
        let (al, ah) = lhs;
        let (bl, bh) = rhs;
        match self {
            Self::Add => Ok((Self::Add.apply(al, bl)?, Self::Add.apply(ah, bh)?)),
            // largest subtrahend gives the smallest difference
            Self::Sub => Ok((Self::Sub.apply(al, bh)?, Self::Sub.apply(ah, bl)?)),
            Self::Mul | Self::Div => {
                if self == Self::Div && bl <= 0 && bh >= 0 {
                    return Err(DiceError::DivisionByZero);
                }
                let corners = [
                    self.apply(al, bl)?,
                    self.apply(al, bh)?,
                    self.apply(ah, bl)?,
                    self.apply(ah, bh)?,
                ];
                let low = corners.iter().copied().min().unwrap_or(al);
                let high = corners.iter().copied().max().unwrap_or(ah);
                Ok((low, high))
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Integer division rounding toward negative infinity.
pub fn floor_div(lhs: i64, rhs: i64) -> DiceResult<i64> {
    if rhs == 0 {
        return Err(DiceError::DivisionByZero);
    }
    let quotient = lhs.checked_div(rhs).ok_or(DiceError::Overflow)?;
    if lhs % rhs != 0 && ((lhs < 0) != (rhs < 0)) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// One operand of a compound expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// An integer literal such as `3`.
    Literal(i64),
    /// A die term such as `2d6`.
    Die(SimpleRoll),
}

impl Term {
    /// Current value of this term.
    pub fn value(&self) -> i64 {
        match self {
            Self::Literal(n) => *n,
            Self::Die(roll) => roll.value(),
        }
    }

    /// Lowest and highest value this term can take.
    pub fn range(&self) -> (i64, i64) {
        match self {
            Self::Literal(n) => (*n, *n),
            Self::Die(roll) => roll.range(),
        }
    }

    fn roll(&mut self, rng: &mut impl Rng) {
        if let Self::Die(roll) = self {
            roll.roll(rng);
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(n) => write!(f, "{n}"),
            Self::Die(roll) => write!(f, "{roll}"),
        }
    }
}

/// A parsed dice expression such as `2d6+3` or `4d6^3*2-1`.
///
/// Holds its first term and then `(operator, term)` pairs, so the sequence
/// always starts and ends with a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundRoll {
    notation: String,
    first: Term,
    rest: Vec<(Operator, Term)>,
    value: i64,
}

impl CompoundRoll {
    /// Parse an expression and evaluate its initial roll.
    ///
    /// Whitespace is ignored and the input is lowercased before lexing, so
    /// error spans refer to [`CompoundRoll::normalize`]d text.
    pub fn parse(input: &str, limits: &RollLimits, rng: &mut impl Rng) -> DiceResult<Self> {
        let notation = Self::normalize(input);
        let tokens = lex(&notation)?;

        if tokens.is_empty() {
            return Err(DiceError::parse("empty expression", 0..0));
        }

        let operators = tokens
            .iter()
            .filter(|(t, _)| matches!(t, Token::Op(_)))
            .count();
        if operators > limits.max_operator_count {
            return Err(DiceError::limit(format!(
                "{operators} operators exceeds the maximum of {}",
                limits.max_operator_count
            )));
        }

        let mut iter = tokens.into_iter();
        let first = match iter.next() {
            Some(token) => term_from(token, limits, rng)?,
            None => return Err(DiceError::parse("empty expression", 0..0)),
        };

        let mut rest = Vec::with_capacity(operators);
        while let Some((token, span)) = iter.next() {
            let Token::Op(op) = token else {
                return Err(DiceError::parse(
                    format!("expected an operator, found '{token}'"),
                    span,
                ));
            };
            let Some(next) = iter.next() else {
                return Err(DiceError::parse(
                    format!("expression ends with '{op}'"),
                    span,
                ));
            };
            rest.push((op, term_from(next, limits, rng)?));
        }

        let mut roll = Self {
            notation,
            first,
            rest,
            value: 0,
        };
        roll.evaluate()?;
        debug!(notation = %roll.notation, value = roll.value, "parsed expression");
        Ok(roll)
    }

    /// Strip whitespace and lowercase, as done before parsing.
    pub fn normalize(input: &str) -> String {
        input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
    }

    /// Re-roll every die term and re-evaluate.
    pub fn roll(&mut self, rng: &mut impl Rng) -> DiceResult<i64> {
        self.first.roll(rng);
        for (_, term) in &mut self.rest {
            term.roll(rng);
        }
        self.evaluate()
    }

    /// Recompute the value from the terms' current rolls.
    pub fn evaluate(&mut self) -> DiceResult<i64> {
        let rest: Vec<(Operator, i64)> = self.rest.iter().map(|(op, t)| (*op, t.value())).collect();
        self.value = reduce(self.first.value(), &rest, Operator::apply)?;
        Ok(self.value)
    }

    /// Value of the most recent roll.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Lowest and highest value the expression can evaluate to.
    ///
    /// Bounds are conservative interval bounds: each term contributes its own
    /// extremes independently, a subtrahend's bounds are swapped, and `*` and
    /// `/` take the extremes over all four corner results. Every roll lies
    /// inside the returned range.
    pub fn range(&self) -> DiceResult<(i64, i64)> {
        let rest: Vec<(Operator, (i64, i64))> =
            self.rest.iter().map(|(op, t)| (*op, t.range())).collect();
        reduce(self.first.range(), &rest, Operator::apply_range)
    }

    /// The normalized expression text.
    pub fn notation(&self) -> &str {
        &self.notation
    }

    /// All terms in order.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, t)| t))
    }

    /// All operators in order.
    pub fn operators(&self) -> impl Iterator<Item = Operator> + '_ {
        self.rest.iter().map(|(op, _)| *op)
    }
}

fn term_from(
    (token, span): (Token, std::ops::Range<usize>),
    limits: &RollLimits,
    rng: &mut impl Rng,
) -> DiceResult<Term> {
    match token {
        Token::Number(n) => Ok(Term::Literal(n)),
        Token::Die(text) => SimpleRoll::parse(&text, limits, rng)
            .map(Term::Die)
            .map_err(|e| e.offset(span.start)),
        Token::Op(op) => Err(DiceError::parse(
            format!("expected a number or die, found '{op}'"),
            span,
        )),
    }
}

/// Two-pass reduction: fold `*` and `/` into products left-to-right, then
/// fold the products with `+` and `-` left-to-right.
fn reduce<T: Copy>(
    first: T,
    rest: &[(Operator, T)],
    apply: impl Fn(Operator, T, T) -> DiceResult<T>,
) -> DiceResult<T> {
    // The leading Add is never applied; it only pairs with the first product.
    let mut products: Vec<(Operator, T)> = vec![(Operator::Add, first)];
    for &(op, rhs) in rest {
        if op.is_multiplicative() {
            if let Some((_, lhs)) = products.last_mut() {
                *lhs = apply(op, *lhs, rhs)?;
            }
        } else {
            products.push((op, rhs));
        }
    }

    let (_, mut total) = products[0];
    for &(op, rhs) in &products[1..] {
        total = apply(op, total, rhs)?;
    }
    Ok(total)
}

impl fmt::Display for CompoundRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rest.is_empty() {
            return write!(f, "{}", self.first);
        }
        write!(f, "[({})", self.first)?;
        for (op, term) in &self.rest {
            write!(f, " {op} ({term})")?;
        }
        write!(f, "] -> {}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn parse(s: &str) -> DiceResult<CompoundRoll> {
        CompoundRoll::parse(s, &RollLimits::default(), &mut StdRng::seed_from_u64(42))
    }

    fn eval(s: &str) -> i64 {
        parse(s).unwrap().value()
    }

    #[test]
    fn literal_arithmetic() {
        assert_eq!(eval("6"), 6);
        assert_eq!(eval("10/3"), 3);
        assert_eq!(eval("2+3*4"), 14);
        assert_eq!(eval("2*3+4"), 10);
        assert_eq!(eval("20/2/5"), 2);
        assert_eq!(eval("10-2-3"), 5);
    }

    #[test]
    fn precedence_before_subtraction() {
        assert_eq!(eval("1-10/5"), -1);
        assert_eq!(eval("1 - 10 / 5"), -1);
    }

    #[test]
    fn floor_division_rounds_down() {
        assert_eq!(floor_div(7, 2).unwrap(), 3);
        assert_eq!(floor_div(-7, 2).unwrap(), -4);
        assert_eq!(floor_div(7, -2).unwrap(), -4);
        assert_eq!(floor_div(-7, -2).unwrap(), 3);
        assert_eq!(floor_div(-8, 2).unwrap(), -4);
    }

    #[test]
    fn dice_with_modifier_in_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut roll = CompoundRoll::parse("2d6+3", &RollLimits::default(), &mut rng).unwrap();
        for _ in 0..500 {
            let v = roll.roll(&mut rng).unwrap();
            assert!((5..=15).contains(&v), "{v}");
        }
    }

    #[test]
    fn division_by_literal_zero_is_an_error() {
        assert_eq!(parse("10/0").unwrap_err(), DiceError::DivisionByZero);
        assert_eq!(parse("d6/0+1").unwrap_err(), DiceError::DivisionByZero);
    }

    #[test]
    fn overflow_is_an_error() {
        assert_eq!(
            parse("9223372036854775807+1").unwrap_err(),
            DiceError::Overflow
        );
        assert_eq!(
            parse("9223372036854775807*2").unwrap_err(),
            DiceError::Overflow
        );
    }

    #[test]
    fn parse_errors() {
        for input in ["", "hello", "+2", "2+", "2++3", "d6 d6", "2d6+x", "-3"] {
            let err = parse(input).unwrap_err();
            assert!(err.is_parse(), "{input:?} gave {err:?}");
        }
    }

    #[test]
    fn die_errors_propagate_with_offset() {
        let err = parse("1+2d6v").unwrap_err();
        assert!(err.is_parse());
        let span = err.span().unwrap();
        assert!(span.start >= 2, "{span:?}");

        assert!(parse("1+0d6").unwrap_err().is_limit());
        assert!(parse("2d1*3").unwrap_err().is_limit());
    }

    #[test]
    fn operator_limit() {
        let limits = RollLimits::default().with_max_operator_count(2);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(CompoundRoll::parse("1+2+3", &limits, &mut rng).is_ok());
        let err = CompoundRoll::parse("1+2+3+4", &limits, &mut rng).unwrap_err();
        assert!(err.is_limit());
    }

    #[test]
    fn structure_is_preserved() {
        let roll = parse("2d6 + 3 * d4").unwrap();
        assert_eq!(roll.notation(), "2d6+3*d4");
        assert_eq!(roll.terms().count(), 3);
        assert_eq!(
            roll.operators().collect::<Vec<_>>(),
            vec![Operator::Add, Operator::Mul]
        );
        assert!(matches!(roll.terms().nth(1), Some(Term::Literal(3))));
    }

    #[test]
    fn range_of_simple_expressions() {
        assert_eq!(parse("2d6+3").unwrap().range().unwrap(), (5, 15));
        assert_eq!(parse("d20").unwrap().range().unwrap(), (1, 20));
        assert_eq!(parse("4d6^3").unwrap().range().unwrap(), (3, 18));
        assert_eq!(parse("7").unwrap().range().unwrap(), (7, 7));
    }

    #[test]
    fn range_flips_divisor_bounds() {
        // 12 / d4: largest quotient from the smallest face
        assert_eq!(parse("12/d4").unwrap().range().unwrap(), (3, 12));
        assert_eq!(parse("d6/d3").unwrap().range().unwrap(), (0, 6));
    }

    #[test]
    fn range_flips_subtrahend_bounds() {
        assert_eq!(parse("d6-d4").unwrap().range().unwrap(), (-3, 5));
        assert_eq!(parse("10-2d6").unwrap().range().unwrap(), (-2, 8));
    }

    #[test]
    fn range_contains_every_roll() {
        let mut rng = StdRng::seed_from_u64(99);
        for expr in ["2d6+3", "d6-d4", "3d8/d4+1", "4d6^3*2-d10", "100/d6-d20v1"] {
            let mut roll = CompoundRoll::parse(expr, &RollLimits::default(), &mut rng).unwrap();
            let (low, high) = roll.range().unwrap();
            for _ in 0..1000 {
                let v = roll.roll(&mut rng).unwrap();
                assert!((low..=high).contains(&v), "{expr}: {v} not in {low}..={high}");
            }
        }
    }

    #[test]
    fn reroll_is_deterministic_with_seed() {
        let limits = RollLimits::default();
        let mut a_rng = StdRng::seed_from_u64(5);
        let mut b_rng = StdRng::seed_from_u64(5);
        let mut a = CompoundRoll::parse("3d6+d8*2", &limits, &mut a_rng).unwrap();
        let mut b = CompoundRoll::parse("3d6+d8*2", &limits, &mut b_rng).unwrap();
        assert_eq!(a.value(), b.value());
        for _ in 0..2 {
            assert_eq!(a.roll(&mut a_rng).unwrap(), b.roll(&mut b_rng).unwrap());
        }
    }

    #[test]
    fn sum_of_two_dice_matches_triangular_distribution() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut roll = CompoundRoll::parse("d6+d6", &RollLimits::default(), &mut rng).unwrap();
        let trials = 36_000;
        let mut counts = [0u32; 13];
        for _ in 0..trials {
            counts[roll.roll(&mut rng).unwrap() as usize] += 1;
        }
        for total in 2i32..=12 {
            let ways = 6 - (7 - total).abs();
            let expected = f64::from(ways) / 36.0;
            let observed = f64::from(counts[total as usize]) / f64::from(trials);
            assert!(
                (observed - expected).abs() < 0.015,
                "P({total}) observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn display() {
        let roll = parse("10/3").unwrap();
        assert_eq!(roll.to_string(), "[(10) / (3)] -> 3");

        let roll = parse("5").unwrap();
        assert_eq!(roll.to_string(), "5");

        let roll = parse("d4+1").unwrap();
        let die = roll.terms().next().unwrap().value();
        assert_eq!(
            roll.to_string(),
            format!("[([d4] -> {die}) + (1)] -> {}", die + 1)
        );
    }

    proptest! {
        #[test]
        fn literal_expressions_match_native_arithmetic(
            a in 0i64..1000, b in 0i64..1000, c in 1i64..1000,
        ) {
            prop_assert_eq!(eval(&format!("{a}+{b}*{c}")), a + b * c);
            prop_assert_eq!(eval(&format!("{a}-{b}/{c}")), a - b / c);
            prop_assert_eq!(eval(&format!("{a}*{b}-{c}")), a * b - c);
        }
    }
}
