//! Concrete `SanitizationEngine` implementations.
//!
//! License: MIT OR APACHE 2.0

pub mod unicode_engine;
