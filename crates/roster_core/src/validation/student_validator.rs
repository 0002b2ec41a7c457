//! Student submission validator.
//!
//! # Responsibility
//! - Validate a raw `StudentInput` against the configured closed sets and the
//!   existing roster.
//!
//! # Invariants
//! - Email format is checked before uniqueness; only one email error is
//!   reported per pass.
//! - The record being edited never collides with its own email.

use crate::config::RosterConfig;
use crate::model::student::{StudentId, StudentInput, StudentRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[^\s@]+@[^\s@]+\.(com|na)$").expect("valid email regex"));
static PHOTO_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://").expect("valid photo url regex"));

/// Validated form fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Programme,
    Year,
    PhotoUrl,
}

impl Field {
    /// Every validated field, in form order.
    pub const ALL: [Field; 6] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Programme,
        Field::Year,
        Field::PhotoUrl,
    ];

    /// Form field name, matching the persisted camelCase key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Programme => "programme",
            Self::Year => "year",
            Self::PhotoUrl => "photoUrl",
        }
    }
}

/// Category of one field violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Required,
    Format,
    Duplicate,
}

impl FieldErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Format => "format",
            Self::Duplicate => "duplicate",
        }
    }
}

/// One field violation with its user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: &'static str,
}

impl FieldError {
    fn new(kind: FieldErrorKind, message: &'static str) -> Self {
        Self { kind, message }
    }
}

/// Outcome of one validation pass.
///
/// A fresh report is produced on every pass; fields absent from it have no
/// error and their previous message should be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Message to show next to `field`, or `None` to clear it.
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).map(|err| err.message)
    }

    /// Field errors in form order.
    pub fn errors(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, err)| (*field, err))
    }

    /// First erroring field in form order, used for focus.
    pub fn first_invalid_field(&self) -> Option<Field> {
        self.errors.keys().next().copied()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    fn reject(&mut self, field: Field, kind: FieldErrorKind, message: &'static str) {
        self.errors.insert(field, FieldError::new(kind, message));
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed:")?;
        for (index, (field, err)) in self.errors().enumerate() {
            let separator = if index == 0 { " " } else { ", " };
            write!(f, "{separator}{} ({})", field.as_str(), err.kind.as_str())?;
        }
        Ok(())
    }
}

impl Error for ValidationReport {}

/// Validates one submission.
///
/// `editing_id` is the record under edit, whose own email is exempt from the
/// uniqueness rule. All rules run; violations are collected, not
/// short-circuited.
pub fn validate_student(
    input: &StudentInput,
    existing: &[StudentRecord],
    editing_id: Option<StudentId>,
    config: &RosterConfig,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if input.first_name.trim().is_empty() {
        report.reject(
            Field::FirstName,
            FieldErrorKind::Required,
            "First name is required.",
        );
    }
    if input.last_name.trim().is_empty() {
        report.reject(
            Field::LastName,
            FieldErrorKind::Required,
            "Last name is required.",
        );
    }

    let email = input.email.trim();
    if !is_valid_email(email) {
        report.reject(
            Field::Email,
            FieldErrorKind::Format,
            "Please enter a valid email.",
        );
    } else if !is_email_unique(email, existing, editing_id) {
        report.reject(
            Field::Email,
            FieldErrorKind::Duplicate,
            "This email is already registered.",
        );
    }

    let programme = input.programme.trim();
    if programme.is_empty() || !config.has_programme(programme) {
        report.reject(
            Field::Programme,
            FieldErrorKind::Required,
            "Please select a programme.",
        );
    }

    let year_selected = input
        .year
        .as_deref()
        .map(str::trim)
        .is_some_and(|year| !year.is_empty() && config.has_year(year));
    if !year_selected {
        report.reject(Field::Year, FieldErrorKind::Required, "Please select a year.");
    }

    let photo_url = input.photo_url.trim();
    if !photo_url.is_empty() && !is_valid_photo_url(photo_url) {
        report.reject(
            Field::PhotoUrl,
            FieldErrorKind::Format,
            "Please enter a valid URL starting with http:// or https://",
        );
    }

    report
}

/// Returns whether `value` matches the accepted address pattern.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Returns whether no record other than `editing_id` already uses `email`,
/// compared case-insensitively.
pub fn is_email_unique(
    email: &str,
    existing: &[StudentRecord],
    editing_id: Option<StudentId>,
) -> bool {
    let needle = email.trim().to_lowercase();
    !existing
        .iter()
        .any(|record| Some(record.id()) != editing_id && record.email().to_lowercase() == needle)
}

/// Returns whether `value` starts with `http://` or `https://`.
pub fn is_valid_photo_url(value: &str) -> bool {
    PHOTO_URL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, is_valid_photo_url};

    #[test]
    fn email_pattern_accepts_only_known_top_level_labels() {
        assert!(is_valid_email("ada@x.com"));
        assert!(is_valid_email("ADA@UNAM.NA"));
        assert!(!is_valid_email("ada@x.org"));
        assert!(!is_valid_email("ada x@x.com"));
        assert!(!is_valid_email("ada@@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn photo_url_requires_http_scheme_case_insensitively() {
        assert!(is_valid_photo_url("https://img.example/a.png"));
        assert!(is_valid_photo_url("HTTP://img.example/a.png"));
        assert!(!is_valid_photo_url("ftp://img.example/a.png"));
        assert!(!is_valid_photo_url("img.example/a.png"));
    }
}
