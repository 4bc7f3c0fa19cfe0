//! Common utilities for the Kestrel CSS engine.
//!
//! This crate provides shared infrastructure used by the parser crates:
//! - **Warning System** - colored terminal output for unsupported or suspicious input

pub mod warning;
