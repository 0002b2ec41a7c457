//! Write-time validation for student submissions.
//!
//! # Responsibility
//! - Check field-level rules and the cross-record email uniqueness rule.
//! - Report every violation in one pass with presentable messages.
//!
//! # Invariants
//! - Validation is pure: no I/O, no logging, no mutation.
//! - At most one error is reported per field.

pub mod student_validator;
