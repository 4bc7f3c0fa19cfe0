//! Numeric literals and their units.
//!
//! [§ 4 Numeric Data Types](https://www.w3.org/TR/css-values-4/#numeric-types)

use core::fmt;

use serde::Serialize;

/// The unit attached to a numeric literal.
///
/// [§ 5 Distance Units](https://www.w3.org/TR/css-values-4/#lengths),
/// [§ 7 Other Quantities](https://www.w3.org/TR/css-values-4/#other-units)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[allow(missing_docs)]
pub enum UnitType {
    /// A `<number>` with no unit.
    Number,
    /// A `<number>` known to have no fractional part.
    Integer,
    Percentage,
    // Font-relative lengths
    Em,
    Rem,
    Ex,
    Ch,
    Ic,
    Lh,
    Rlh,
    // Viewport-percentage lengths
    Vw,
    Vh,
    Vi,
    Vb,
    Vmin,
    Vmax,
    Svw,
    Svh,
    Lvw,
    Lvh,
    Dvw,
    Dvh,
    // Container query lengths
    Cqw,
    Cqh,
    Cqi,
    Cqb,
    Cqmin,
    Cqmax,
    // Absolute lengths
    Px,
    Cm,
    Mm,
    Q,
    In,
    Pt,
    Pc,
    // Angles
    Deg,
    Rad,
    Grad,
    Turn,
    // Durations
    Ms,
    S,
    // Frequencies
    Hz,
    Khz,
    // Resolutions
    Dppx,
    X,
    Dpi,
    Dpcm,
    // Flexible lengths
    Fr,
}

/// The broad type of a numeric value, used for grammar checks and `calc()`
/// type compatibility.
///
/// [§ 10.8.1 Type Checking](https://www.w3.org/TR/css-values-4/#calc-type-checking)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[allow(missing_docs)]
pub enum UnitCategory {
    Number,
    Percent,
    Length,
    Angle,
    Time,
    Frequency,
    Resolution,
    Flex,
}

/// Lowercase unit spellings, matched ASCII case-insensitively.
const UNIT_TABLE: &[(&str, UnitType)] = &[
    ("em", UnitType::Em),
    ("rem", UnitType::Rem),
    ("ex", UnitType::Ex),
    ("ch", UnitType::Ch),
    ("ic", UnitType::Ic),
    ("lh", UnitType::Lh),
    ("rlh", UnitType::Rlh),
    ("vw", UnitType::Vw),
    ("vh", UnitType::Vh),
    ("vi", UnitType::Vi),
    ("vb", UnitType::Vb),
    ("vmin", UnitType::Vmin),
    ("vmax", UnitType::Vmax),
    ("svw", UnitType::Svw),
    ("svh", UnitType::Svh),
    ("lvw", UnitType::Lvw),
    ("lvh", UnitType::Lvh),
    ("dvw", UnitType::Dvw),
    ("dvh", UnitType::Dvh),
    ("cqw", UnitType::Cqw),
    ("cqh", UnitType::Cqh),
    ("cqi", UnitType::Cqi),
    ("cqb", UnitType::Cqb),
    ("cqmin", UnitType::Cqmin),
    ("cqmax", UnitType::Cqmax),
    ("px", UnitType::Px),
    ("cm", UnitType::Cm),
    ("mm", UnitType::Mm),
    ("q", UnitType::Q),
    ("in", UnitType::In),
    ("pt", UnitType::Pt),
    ("pc", UnitType::Pc),
    ("deg", UnitType::Deg),
    ("rad", UnitType::Rad),
    ("grad", UnitType::Grad),
    ("turn", UnitType::Turn),
    ("ms", UnitType::Ms),
    ("s", UnitType::S),
    ("hz", UnitType::Hz),
    ("khz", UnitType::Khz),
    ("dppx", UnitType::Dppx),
    ("x", UnitType::X),
    ("dpi", UnitType::Dpi),
    ("dpcm", UnitType::Dpcm),
    ("fr", UnitType::Fr),
];

impl UnitType {
    /// Matches a `<dimension-token>` unit against the known-unit table.
    #[must_use]
    pub fn from_unit_str(unit: &str) -> Option<Self> {
        UNIT_TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(unit))
            .map(|&(_, unit)| unit)
    }

    /// The serialized unit suffix (empty for numbers).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number | Self::Integer => "",
            Self::Percentage => "%",
            Self::Q => "Q",
            other => UNIT_TABLE
                .iter()
                .find(|(_, unit)| *unit == other)
                .map_or("", |(name, _)| name),
        }
    }

    /// The broad category this unit belongs to.
    #[must_use]
    pub const fn category(self) -> UnitCategory {
        match self {
            Self::Number | Self::Integer => UnitCategory::Number,
            Self::Percentage => UnitCategory::Percent,
            Self::Deg | Self::Rad | Self::Grad | Self::Turn => UnitCategory::Angle,
            Self::Ms | Self::S => UnitCategory::Time,
            Self::Hz | Self::Khz => UnitCategory::Frequency,
            Self::Dppx | Self::X | Self::Dpi | Self::Dpcm => UnitCategory::Resolution,
            Self::Fr => UnitCategory::Flex,
            _ => UnitCategory::Length,
        }
    }

    /// [§ 5.2 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
    ///
    /// The factor converting this unit to its category's canonical unit
    /// (`px`, `deg`, `s`, `hz`, `dppx`), or `None` for units that depend on
    /// layout context.
    #[must_use]
    pub fn canonical_factor(self) -> Option<f64> {
        let factor = match self {
            Self::Number
            | Self::Integer
            | Self::Percentage
            | Self::Fr
            | Self::Px
            | Self::Deg
            | Self::S
            | Self::Hz
            | Self::Dppx
            | Self::X => 1.0,
            // "1in = 2.54cm = 96px"
            Self::Cm => 96.0 / 2.54,
            Self::Mm => 96.0 / 25.4,
            Self::Q => 96.0 / 101.6,
            Self::In => 96.0,
            Self::Pt => 96.0 / 72.0,
            Self::Pc => 16.0,
            Self::Rad => 180.0 / core::f64::consts::PI,
            Self::Grad => 0.9,
            Self::Turn => 360.0,
            Self::Ms => 0.001,
            Self::Khz => 1000.0,
            Self::Dpi => 1.0 / 96.0,
            Self::Dpcm => 2.54 / 96.0,
            _ => return None,
        };
        Some(factor)
    }

    /// The canonical unit of this unit's category.
    #[must_use]
    pub const fn canonical_unit(self) -> Self {
        match self.category() {
            UnitCategory::Number => Self::Number,
            UnitCategory::Percent => Self::Percentage,
            UnitCategory::Length => Self::Px,
            UnitCategory::Angle => Self::Deg,
            UnitCategory::Time => Self::S,
            UnitCategory::Frequency => Self::Hz,
            UnitCategory::Resolution => Self::Dppx,
            UnitCategory::Flex => Self::Fr,
        }
    }

    /// Returns true for lengths.
    #[must_use]
    pub fn is_length(self) -> bool {
        self.category() == UnitCategory::Length
    }
}

/// A number with a unit tag.
///
/// [§ 4.3 Real Numbers](https://www.w3.org/TR/css-values-4/#numbers)
///
/// Equality treats NaN as equal to NaN so that parsed values compare
/// structurally.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NumericLiteral {
    /// The numeric value.
    pub value: f64,
    /// The unit tag.
    pub unit: UnitType,
}

impl PartialEq for NumericLiteral {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
            && (self.value == other.value || (self.value.is_nan() && other.value.is_nan()))
    }
}

impl NumericLiteral {
    /// Create a literal with the given unit.
    #[must_use]
    pub const fn new(value: f64, unit: UnitType) -> Self {
        Self { value, unit }
    }

    /// A unitless number.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::new(value, UnitType::Number)
    }

    /// A unitless integer.
    #[must_use]
    pub const fn integer(value: f64) -> Self {
        Self::new(value, UnitType::Integer)
    }

    /// A pixel length.
    #[must_use]
    pub const fn px(value: f64) -> Self {
        Self::new(value, UnitType::Px)
    }

    /// A percentage.
    #[must_use]
    pub const fn percentage(value: f64) -> Self {
        Self::new(value, UnitType::Percentage)
    }

    /// The category of this literal's unit.
    #[must_use]
    pub const fn category(&self) -> UnitCategory {
        self.unit.category()
    }
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit.as_str();
        if self.unit == UnitType::Integer && self.value.is_finite() {
            write!(f, "{:.0}", self.value)
        } else if self.value.is_finite() {
            write!(f, "{}{unit}", format_number(self.value))
        } else {
            f.write_str(&format_non_finite(self.value))?;
            if unit.is_empty() {
                Ok(())
            } else {
                write!(f, " * 1{unit}")
            }
        }
    }
}

/// `infinity`, `-infinity`, or `NaN`.
#[must_use]
pub fn format_non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value > 0.0 {
        "infinity".to_string()
    } else {
        "-infinity".to_string()
    }
}

/// Serialize a finite number the way CSSOM does.
///
/// Integral values up to six digits print as integers; everything else
/// uses six significant digits with trailing zeros removed.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() <= 999_999.0 {
        return format!("{value:.0}");
    }

    // Let the float formatter do the rounding to six significant digits.
    let scientific = format!("{value:.5e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..6).contains(&exponent) {
        let decimals = usize::try_from(5 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    }
}

fn trim_fraction(repr: &str) -> &str {
    if repr.contains('.') {
        repr.trim_end_matches('0').trim_end_matches('.')
    } else {
        repr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(37.795_32), "37.7953");
        assert_eq!(format_number(1e7), "1e+07");
        assert_eq!(format_number(0.000_01), "1e-05");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_unit_lookup_is_case_insensitive() {
        assert_eq!(UnitType::from_unit_str("PX"), Some(UnitType::Px));
        assert_eq!(UnitType::from_unit_str("dPpX"), Some(UnitType::Dppx));
        assert_eq!(UnitType::from_unit_str("furlong"), None);
        assert_eq!(UnitType::Q.as_str(), "Q");
    }

    #[test]
    fn test_non_finite_display() {
        let inf = NumericLiteral::new(f64::INFINITY, UnitType::Dppx);
        assert_eq!(inf.to_string(), "infinity * 1dppx");
        let nan = NumericLiteral::number(f64::NAN);
        assert_eq!(nan.to_string(), "NaN");
        assert_eq!(nan, NumericLiteral::number(f64::NAN));
    }

    #[test]
    fn test_integers_print_in_full() {
        assert_eq!(NumericLiteral::integer(10_000_000.0).to_string(), "10000000");
        assert_eq!(NumericLiteral::number(10_000_000.0).to_string(), "1e+07");
    }
}
