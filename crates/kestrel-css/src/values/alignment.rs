//! [CSS Box Alignment Module Level 3](https://www.w3.org/TR/css-align-3/)

use core::fmt;

use serde::Serialize;

use super::CSSValueID;

/// [§ 5.1 The align-content and justify-content Properties](https://www.w3.org/TR/css-align-3/#align-justify-content)
///
/// `normal | <baseline-position> | <content-distribution> |
///  <overflow-position>? <content-position>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentDistribution {
    /// `space-between`, `space-around`, `space-evenly`, `stretch`.
    pub distribution: Option<CSSValueID>,
    /// A content position, `normal`, `baseline` or `last baseline`.
    pub position: Option<CSSValueID>,
    /// `safe` or `unsafe`.
    pub overflow: Option<CSSValueID>,
}

impl ContentDistribution {
    /// Create a value from its parts.
    #[must_use]
    pub const fn new(
        distribution: Option<CSSValueID>,
        position: Option<CSSValueID>,
        overflow: Option<CSSValueID>,
    ) -> Self {
        Self {
            distribution,
            position,
            overflow,
        }
    }
}

impl fmt::Display for ContentDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(baseline @ (CSSValueID::Baseline | CSSValueID::LastBaseline)) = self.position {
            return write!(f, "{baseline}");
        }
        let parts: Vec<&str> = [self.distribution, self.overflow, self.position]
            .into_iter()
            .flatten()
            .map(CSSValueID::into_static)
            .collect();
        if parts.is_empty() {
            f.write_str("normal")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_order() {
        let value = ContentDistribution::new(None, Some(CSSValueID::Center), Some(CSSValueID::Safe));
        assert_eq!(value.to_string(), "safe center");
        let value = ContentDistribution::new(None, Some(CSSValueID::LastBaseline), None);
        assert_eq!(value.to_string(), "last baseline");
        assert_eq!(ContentDistribution::new(None, None, None).to_string(), "normal");
    }
}
