//! Declaration blocks.
//!
//! This module holds parsed declarations per:
//! - [CSS Object Model](https://drafts.csswg.org/cssom/#css-declaration-blocks)
//! - [CSS Cascading and Inheritance Level 5](https://www.w3.org/TR/css-cascade-5/)

mod property_set;

// Re-export all public types
pub use property_set::{MutablePropertyValueSet, SetResult};
