//! Authoritative roster state.
//!
//! # Responsibility
//! - Own the ordered student sequence and the edit-session slot.
//! - Persist the whole roster after every mutation.
//!
//! # Invariants
//! - Mutations go through `RosterStore` only; callers get read-only views.
//! - In-memory and persisted state are equal after every completed call.

pub mod roster_store;
