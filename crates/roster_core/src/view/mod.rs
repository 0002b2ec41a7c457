//! Card and table projections of the roster.
//!
//! # Responsibility
//! - Decide which records match the active filter.
//! - Reconcile visual nodes through the `Renderer` collaborator.
//!
//! # Invariants
//! - Each projection holds exactly one node per roster record after
//!   reconciliation; non-matching nodes are hidden, not removed.
//! - Card order follows the roster; table order is newest first.
//!
//! # See also
//! - `store::roster_store` for the snapshot source.

pub mod filter;
pub mod headless;
pub mod preview;
pub mod projector;
pub mod renderer;
