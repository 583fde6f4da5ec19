//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Derive dashboard/calendar statistics and result exports.
//! - Keep presentation layers decoupled from storage details.

pub mod calendar;
pub mod clock;
pub mod export;
pub mod note_service;
pub mod stats;
