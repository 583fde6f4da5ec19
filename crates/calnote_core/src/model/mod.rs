//! Domain model for the note collection.
//!
//! # Responsibility
//! - Define the canonical `Note` record shared by store, query and service.
//! - Own tag normalization and timestamp invariants.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` unique within the collection.
//! - `modified_at` is never earlier than `created_at`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod defaults;
pub mod note;
