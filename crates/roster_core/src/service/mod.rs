//! Form-submit orchestration.
//!
//! # Responsibility
//! - Route form events through validator, store and projector in order.
//! - Produce status-region announcements.
//!
//! # Invariants
//! - Validation runs fully before any mutation.
//! - Every completed mutation is followed by a reconcile of both projections.

pub mod roster_service;
