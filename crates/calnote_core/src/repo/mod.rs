//! Note store adapter.
//!
//! # Responsibility
//! - Define the collection-level persistence contract for notes.
//! - Isolate blob encoding and fallback policy from use-case services.
//!
//! # Invariants
//! - Writes validate every note and never persist duplicate ids.
//! - Update/delete on an absent id fail with `NotFound`.

pub mod note_repo;
