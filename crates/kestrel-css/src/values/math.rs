//! Math functions: `calc()`, `min()`, `max()`, and `clamp()`.
//!
//! [§ 10 Mathematical Expressions](https://www.w3.org/TR/css-values-4/#math)
//!
//! Expressions are simplified while they are parsed. Every leaf whose unit
//! has a fixed conversion is stored in its canonical unit (`px`, `deg`, `s`,
//! `hz`, `dppx`), like terms are summed, and any `min()`/`max()`/`clamp()`
//! whose arguments all resolve is evaluated. What cannot be resolved without
//! layout (font-relative lengths, percentages mixed with lengths) stays as a
//! sorted sum of terms.

use core::cmp::Ordering;
use core::fmt;

use serde::Serialize;

use super::numeric::{NumericLiteral, UnitCategory, UnitType, format_number};
use crate::parser::stream::{BlockGuard, SavePoint, TokenStream};
use crate::tokenizer::CSSToken;

/// [§ 10.8.1 Type Checking](https://www.w3.org/TR/css-values-4/#calc-type-checking)
///
/// The resolved type of a math expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[allow(missing_docs)]
pub enum CalcCategory {
    Number,
    Percent,
    Length,
    /// A sum mixing lengths and percentages.
    LengthPercent,
    Angle,
    Time,
    Frequency,
    Resolution,
}

impl CalcCategory {
    const fn from_unit(unit: UnitType) -> Option<Self> {
        Some(match unit.category() {
            UnitCategory::Number => Self::Number,
            UnitCategory::Percent => Self::Percent,
            UnitCategory::Length => Self::Length,
            UnitCategory::Angle => Self::Angle,
            UnitCategory::Time => Self::Time,
            UnitCategory::Frequency => Self::Frequency,
            UnitCategory::Resolution => Self::Resolution,
            UnitCategory::Flex => return None,
        })
    }

    /// "If both types are the same, the result is that type." Lengths and
    /// percentages combine into a length-percentage.
    fn add(self, other: Self) -> Option<Self> {
        use CalcCategory::{Length, LengthPercent, Percent};
        if self == other {
            return Some(self);
        }
        match (self, other) {
            (Length | Percent | LengthPercent, Length | Percent | LengthPercent) => {
                Some(LengthPercent)
            }
            _ => None,
        }
    }

    /// Returns true if a value of this type may be used where `target` is
    /// expected.
    #[must_use]
    pub fn fits(self, target: Self) -> bool {
        self == target
            || (target == Self::LengthPercent && matches!(self, Self::Length | Self::Percent))
    }
}

/// One node of a simplified math expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MathExpression {
    /// A leaf value.
    Value(NumericLiteral),
    /// Terms added together; subtraction is stored as a negative term.
    Sum(Vec<MathExpression>),
    /// A number times a node that cannot be folded.
    Product(f64, Box<MathExpression>),
    /// `min(a, b, ...)` with unresolved arguments.
    Min(Vec<MathExpression>),
    /// `max(a, b, ...)` with unresolved arguments.
    Max(Vec<MathExpression>),
    /// `clamp(min, value, max)` with unresolved arguments.
    Clamp(Box<[MathExpression; 3]>),
}

/// A parsed math function and its resolved type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MathFunction {
    expression: MathExpression,
    category: CalcCategory,
}

impl MathFunction {
    /// The simplified expression tree.
    #[must_use]
    pub const fn expression(&self) -> &MathExpression {
        &self.expression
    }

    /// The resolved type.
    #[must_use]
    pub const fn category(&self) -> CalcCategory {
        self.category
    }

    /// The single value the expression folded to, if it folded completely.
    #[must_use]
    pub const fn resolved(&self) -> Option<NumericLiteral> {
        match self.expression {
            MathExpression::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expression {
            e @ (MathExpression::Min(_) | MathExpression::Max(_) | MathExpression::Clamp(_)) => {
                write!(f, "{e}")
            }
            e => write!(f, "calc({e})"),
        }
    }
}

impl fmt::Display for MathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Sum(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i == 0 {
                        write!(f, "{term}")?;
                    } else if term.is_negative() {
                        write!(f, " - {}", multiply(term.clone(), -1.0))?;
                    } else {
                        write!(f, " + {term}")?;
                    }
                }
                Ok(())
            }
            Self::Product(k, inner) => {
                let k = if k.is_finite() {
                    format_number(*k)
                } else {
                    super::numeric::format_non_finite(*k)
                };
                if matches!(**inner, Self::Sum(_)) {
                    write!(f, "{k} * ({inner})")
                } else {
                    write!(f, "{k} * {inner}")
                }
            }
            Self::Min(args) => write_function(f, "min", args),
            Self::Max(args) => write_function(f, "max", args),
            Self::Clamp(args) => write_function(f, "clamp", args.as_slice()),
        }
    }
}

fn snap(value: f64) -> f64 {
    if value.is_finite() && value.abs() > 0.0 {
        format_number(value).parse().unwrap_or(value)
    } else {
        value
    }
}

fn write_function(f: &mut fmt::Formatter<'_>, name: &str, args: &[MathExpression]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{arg}")?;
    }
    f.write_str(")")
}

impl MathExpression {
    /// Round every number to the precision it serializes with, so a
    /// folded result reparses to the same tree.
    fn snapped(self) -> Self {
        match self {
            Self::Value(v) => Self::Value(NumericLiteral::new(snap(v.value), v.unit)),
            Self::Sum(terms) => Self::Sum(terms.into_iter().map(Self::snapped).collect()),
            Self::Product(k, inner) => Self::Product(snap(k), Box::new(inner.snapped())),
            Self::Min(args) => Self::Min(args.into_iter().map(Self::snapped).collect()),
            Self::Max(args) => Self::Max(args.into_iter().map(Self::snapped).collect()),
            Self::Clamp(args) => Self::Clamp(Box::new((*args).map(Self::snapped))),
        }
    }

    fn is_negative(&self) -> bool {
        match self {
            Self::Value(v) => v.value < 0.0,
            Self::Product(k, _) => *k < 0.0,
            _ => false,
        }
    }

    /// Sort key: numbers, then percentages, then dimensions by unit name,
    /// then anything unresolved.
    fn sort_key(&self) -> (u8, &'static str) {
        match self {
            Self::Value(v) => match v.unit {
                UnitType::Number | UnitType::Integer => (0, ""),
                UnitType::Percentage => (1, ""),
                unit => (2, unit.as_str()),
            },
            _ => (3, ""),
        }
    }
}

/// Returns true if the next token starts a math function.
#[must_use]
pub fn is_math_function(token: &CSSToken) -> bool {
    ["calc", "-webkit-calc", "min", "max", "clamp"]
        .iter()
        .any(|name| token.function_matches(name))
}

/// [§ 10.1 Basic Arithmetic](https://www.w3.org/TR/css-values-4/#calc-func)
///
/// Consume a math function at the cursor. On failure the stream is left
/// where it was.
pub fn consume_math_function(stream: &mut TokenStream) -> Option<MathFunction> {
    if !is_math_function(stream.peek()) {
        return None;
    }
    let mut save = SavePoint::new(stream);
    let (expression, category) = consume_value(&mut save)?;
    save.release();
    Some(MathFunction {
        expression: expression.snapped(),
        category,
    })
}

type Typed = (MathExpression, CalcCategory);

/// `<calc-sum> = <calc-product> [ [ '+' | '-' ] <calc-product> ]*`
///
/// "the + and - operators must be surrounded by whitespace"
fn consume_sum(stream: &mut TokenStream) -> Option<Typed> {
    let (mut expr, mut category) = consume_product(stream)?;
    loop {
        let before = stream.save();
        if !stream.peek().is_whitespace() {
            break;
        }
        stream.consume_whitespace();
        let negate = match stream.peek_delim() {
            Some('+') => false,
            Some('-') => true,
            _ => {
                stream.restore(before);
                break;
            }
        };
        let _ = stream.consume();
        if !stream.peek().is_whitespace() {
            return None;
        }
        stream.consume_whitespace();
        let (rhs, rhs_category) = consume_product(stream)?;
        category = category.add(rhs_category)?;
        let rhs = if negate { multiply(rhs, -1.0) } else { rhs };
        expr = add(expr, rhs);
    }
    Some((expr, category))
}

/// `<calc-product> = <calc-value> [ [ '*' | '/' ] <calc-value> ]*`
fn consume_product(stream: &mut TokenStream) -> Option<Typed> {
    let (mut expr, mut category) = consume_value(stream)?;
    loop {
        let before = stream.save();
        stream.consume_whitespace();
        let divide = match stream.peek_delim() {
            Some('*') => false,
            Some('/') => true,
            _ => {
                stream.restore(before);
                break;
            }
        };
        let _ = stream.consume_including_whitespace();
        let (rhs, rhs_category) = consume_value(stream)?;

        // "At *, at least one side must resolve to <number>."
        // "At /, the right side must resolve to <number>."
        let (scale, other, other_category) = match (category, rhs_category, divide) {
            (_, CalcCategory::Number, true) => (1.0 / number_of(&rhs)?, expr, category),
            (_, CalcCategory::Number, false) => (number_of(&rhs)?, expr, category),
            (CalcCategory::Number, _, false) => (number_of(&expr)?, rhs, rhs_category),
            _ => return None,
        };
        expr = multiply(other, scale);
        category = other_category;
    }
    Some((expr, category))
}

fn number_of(expr: &MathExpression) -> Option<f64> {
    match expr {
        MathExpression::Value(v) if v.unit.category() == UnitCategory::Number => Some(v.value),
        _ => None,
    }
}

/// `<calc-value> = <number> | <dimension> | <percentage> | <calc-keyword> | ( <calc-sum> )`
fn consume_value(stream: &mut TokenStream) -> Option<Typed> {
    let token = stream.peek().clone();
    match &token {
        CSSToken::Number { value, .. } => {
            let _ = stream.consume();
            Some((MathExpression::Value(NumericLiteral::number(*value)), CalcCategory::Number))
        }
        CSSToken::Percentage { value, .. } => {
            let _ = stream.consume();
            Some((
                MathExpression::Value(NumericLiteral::percentage(*value)),
                CalcCategory::Percent,
            ))
        }
        CSSToken::Dimension { value, unit, .. } => {
            let unit = UnitType::from_unit_str(unit)?;
            let category = CalcCategory::from_unit(unit)?;
            let _ = stream.consume();
            Some((MathExpression::Value(canonicalize(NumericLiteral::new(*value, unit))), category))
        }
        // [§ 10.7.1 Numeric Constants](https://www.w3.org/TR/css-values-4/#calc-constants)
        CSSToken::Ident(name) => {
            let value = match name.to_ascii_lowercase().as_str() {
                "e" => core::f64::consts::E,
                "pi" => core::f64::consts::PI,
                "infinity" => f64::INFINITY,
                "-infinity" => f64::NEG_INFINITY,
                "nan" => f64::NAN,
                _ => return None,
            };
            let _ = stream.consume();
            Some((MathExpression::Value(NumericLiteral::number(value)), CalcCategory::Number))
        }
        CSSToken::LeftParen => consume_parenthesized(stream),
        CSSToken::Function(name) => match name.to_ascii_lowercase().as_str() {
            "calc" | "-webkit-calc" => consume_parenthesized(stream),
            "min" => consume_min_max(stream, true),
            "max" => consume_min_max(stream, false),
            "clamp" => consume_clamp(stream),
            _ => None,
        },
        _ => None,
    }
}

fn consume_parenthesized(stream: &mut TokenStream) -> Option<Typed> {
    let mut guard = BlockGuard::new(stream)?;
    guard.consume_whitespace();
    let result = consume_sum(&mut guard)?;
    guard.consume_whitespace();
    guard.at_end().then_some(result)
}

fn consume_arguments(stream: &mut TokenStream) -> Option<(Vec<MathExpression>, CalcCategory)> {
    let mut guard = BlockGuard::new(stream)?;
    let mut args = Vec::new();
    let mut category: Option<CalcCategory> = None;
    loop {
        guard.consume_whitespace();
        let (arg, arg_category) = consume_sum(&mut guard)?;
        category = Some(match category {
            Some(c) => c.add(arg_category)?,
            None => arg_category,
        });
        args.push(arg);
        guard.consume_whitespace();
        if guard.at_end() {
            break;
        }
        if !matches!(guard.consume(), CSSToken::Comma) {
            return None;
        }
    }
    category.map(|c| (args, c))
}

/// [§ 10.2 Comparison Functions](https://www.w3.org/TR/css-values-4/#comp-func)
fn consume_min_max(stream: &mut TokenStream, is_min: bool) -> Option<Typed> {
    let (args, category) = consume_arguments(stream)?;
    let expr = match resolve_all(&args) {
        Some((values, unit)) => {
            let pick = if is_min { css_min } else { css_max };
            let folded = values.into_iter().reduce(pick)?;
            MathExpression::Value(NumericLiteral::new(folded, unit))
        }
        None if is_min => MathExpression::Min(args),
        None => MathExpression::Max(args),
    };
    Some((expr, category))
}

/// "clamp(MIN, VAL, MAX) is resolved as max(MIN, min(VAL, MAX))"
fn consume_clamp(stream: &mut TokenStream) -> Option<Typed> {
    let (args, category) = consume_arguments(stream)?;
    let Ok(args) = <[MathExpression; 3]>::try_from(args) else {
        return None;
    };
    let expr = match resolve_all(&args) {
        Some((values, unit)) => {
            let clamped = css_max(values[0], css_min(values[1], values[2]));
            MathExpression::Value(NumericLiteral::new(clamped, unit))
        }
        None => MathExpression::Clamp(Box::new(args)),
    };
    Some((expr, category))
}

/// The argument values if every argument is a leaf in the same unit.
fn resolve_all(args: &[MathExpression]) -> Option<(Vec<f64>, UnitType)> {
    let mut unit = None;
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        let MathExpression::Value(v) = arg else {
            return None;
        };
        match unit {
            Some(u) if u != v.unit => return None,
            _ => unit = Some(v.unit),
        }
        values.push(v.value);
    }
    unit.map(|u| (values, u))
}

/// IEEE-754 `minimum`: NaN propagates and `-0` is less than `0`.
fn css_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => a,
        Some(Ordering::Greater) => b,
        _ => {
            if a.is_sign_negative() {
                a
            } else {
                b
            }
        }
    }
}

/// IEEE-754 `maximum`: NaN propagates and `0` is greater than `-0`.
fn css_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => a,
        Some(Ordering::Less) => b,
        _ => {
            if a.is_sign_positive() {
                a
            } else {
                b
            }
        }
    }
}

fn canonicalize(literal: NumericLiteral) -> NumericLiteral {
    match literal.unit.canonical_factor() {
        Some(factor) => NumericLiteral::new(literal.value * factor, literal.unit.canonical_unit()),
        None => literal,
    }
}

/// Scale an expression, distributing over sums.
#[allow(clippy::float_cmp)]
fn multiply(expr: MathExpression, k: f64) -> MathExpression {
    match expr {
        MathExpression::Value(v) => MathExpression::Value(NumericLiteral::new(v.value * k, v.unit)),
        MathExpression::Sum(terms) => {
            MathExpression::Sum(terms.into_iter().map(|t| multiply(t, k)).collect())
        }
        MathExpression::Product(c, inner) if c * k == 1.0 => *inner,
        MathExpression::Product(c, inner) => MathExpression::Product(c * k, inner),
        other if k == 1.0 => other,
        other => MathExpression::Product(k, Box::new(other)),
    }
}

/// [§ 10.10.1 Simplification](https://www.w3.org/TR/css-values-4/#calc-simplification)
///
/// "For each of the terms with the same unit, combine them."
fn add(lhs: MathExpression, rhs: MathExpression) -> MathExpression {
    let mut terms: Vec<MathExpression> = Vec::new();
    for term in [lhs, rhs] {
        match term {
            MathExpression::Sum(inner) => terms.extend(inner),
            other => terms.push(other),
        }
    }

    let mut combined: Vec<MathExpression> = Vec::with_capacity(terms.len());
    for term in terms {
        if let MathExpression::Value(v) = &term
            && let Some(MathExpression::Value(existing)) = combined
                .iter_mut()
                .find(|t| matches!(t, MathExpression::Value(e) if e.unit == v.unit))
        {
            existing.value += v.value;
            continue;
        }
        combined.push(term);
    }

    combined.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    if combined.len() == 1 {
        combined.pop().unwrap_or(MathExpression::Sum(Vec::new()))
    } else {
        MathExpression::Sum(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(text: &str) -> Option<MathFunction> {
        let mut stream = TokenStream::new(text);
        let result = consume_math_function(&mut stream)?;
        stream.at_end().then_some(result)
    }

    fn text(input: &str) -> String {
        calc(input).map(|m| m.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_resolution_folding() {
        assert_eq!(text("calc(2x + 3x)"), "calc(5dppx)");
        assert_eq!(text("calc(96dpi + 2x)"), "calc(3dppx)");
        assert_eq!(text("calc(1dpcm * 37.79532)"), "calc(1dppx)");
        assert_eq!(text("calc(32dpi * 3)"), "calc(1dppx)");
        assert_eq!(text("calc(-1x)"), "calc(-1dppx)");
    }

    #[test]
    fn test_non_finite_propagation() {
        assert_eq!(
            text("calc(1 * max(infinity * 3x, 0dpcm))"),
            "calc(infinity * 1dppx)"
        );
        assert_eq!(text("min(infinity * 4x, 0dpi)"), "calc(0dppx)");
        assert_eq!(
            text("clamp(-infinity * 0dppx, 0dppx, infinity * 0dppx)"),
            "calc(NaN * 1dppx)"
        );
    }

    #[test]
    fn test_unresolved_sum_is_sorted() {
        assert_eq!(text("calc(1em + 50% + 10px)"), "calc(50% + 1em + 10px)");
        assert_eq!(text("calc(10px - 1em)"), "calc(-1em + 10px)");
        assert_eq!(text("min(1em, 10px)"), "min(1em, 10px)");
        assert_eq!(text("calc(2 * min(1em, 10px))"), "calc(2 * min(1em, 10px))");
    }

    #[test]
    fn test_type_errors() {
        assert!(calc("calc(2 + 3x)").is_none());
        assert!(calc("calc(2x + 3)").is_none());
        assert!(calc("calc(2x * 3x)").is_none());
        assert!(calc("calc(6x / 3x)").is_none());
        assert!(calc("calc(1px +2px)").is_none());
    }

    #[test]
    fn test_signed_zero() {
        assert!(css_min(0.0, -0.0).is_sign_negative());
        assert!(css_max(-0.0, 0.0).is_sign_positive());
        assert!(css_min(f64::NAN, 1.0).is_nan());
    }
}
