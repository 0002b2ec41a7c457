//! Domain model for the student roster.
//!
//! # Responsibility
//! - Define the canonical student record shared by both view projections.
//! - Separate raw form input from normalized, storable field values.
//!
//! # Invariants
//! - Every record is identified by a `StudentId` that is never reused.
//! - `initials` is always derived from the current name fields.

pub mod student;
