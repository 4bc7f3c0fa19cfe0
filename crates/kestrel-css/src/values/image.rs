//! Image values.
//!
//! [CSS Images Module Level 4](https://www.w3.org/TR/css-images-4/)

use core::fmt;

use serde::Serialize;

use super::{ValueList, ValueRef, write_string};

/// A `url()` reference.
///
/// [§ 4.5 Resource Locators](https://www.w3.org/TR/css-values-4/#urls)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlValue {
    /// The URL as written; this is what serializes.
    pub relative: String,
    /// The URL resolved against the context's base URL.
    pub absolute: String,
}

impl fmt::Display for UrlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("url(")?;
        write_string(f, &self.relative)?;
        f.write_str(")")
    }
}

/// [§ 2.2 Image Fallbacks and Annotations](https://www.w3.org/TR/css-images-4/#image-set-notation)
///
/// `<image-set-option> = [ <image> | <string> ] [ <resolution> || type(<string>) ]?`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSetOption {
    /// The candidate image. Strings are stored as urls.
    pub image: ValueRef,
    /// The resolution, `1x` when none was written.
    pub resolution: ValueRef,
    /// A [`super::CSSValue::ImageSetType`].
    pub mime_type: Option<ValueRef>,
}

impl fmt::Display for ImageSetOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.image, self.resolution)?;
        if let Some(mime_type) = &self.mime_type {
            write!(f, " {mime_type}")?;
        }
        Ok(())
    }
}

/// Which gradient function produced a [`Gradient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GradientKind {
    /// `linear-gradient()`
    Linear,
    /// `radial-gradient()`
    Radial,
    /// `conic-gradient()`
    Conic,
}

impl GradientKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear-gradient",
            Self::Radial => "radial-gradient",
            Self::Conic => "conic-gradient",
        }
    }
}

/// [§ 3 Gradients](https://www.w3.org/TR/css-images-4/#gradients)
///
/// The arguments are kept as parsed: an optional leading configuration
/// (direction, shape, or `from`/`at` clause) then the color stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    /// The gradient function.
    pub kind: GradientKind,
    /// `repeating-` prefix.
    pub repeating: bool,
    /// Comma-separated arguments.
    pub args: ValueList,
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.repeating {
            f.write_str("repeating-")?;
        }
        write!(f, "{}({})", self.kind.as_str(), self.args)
    }
}
