//! Notes query engine entry points.
//!
//! # Responsibility
//! - Filter, score and order note snapshots without side effects.
//! - Resolve relative date ranges and provide text-matching helpers.

pub mod query;
pub mod text;
pub mod window;
