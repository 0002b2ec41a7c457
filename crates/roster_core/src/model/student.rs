//! Student domain model.
//!
//! # Responsibility
//! - Define the raw form field bag (`StudentInput`) and its normalized shape
//!   (`StudentFields`).
//! - Define the canonical stored record (`StudentRecord`) and its wire format.
//!
//! # Invariants
//! - `id` is assigned once by the roster store and never changes.
//! - `initials` is recomputed on every construction and on every decode.
//! - Stored interests never contain empty or untrimmed tags.
//! - An absent photo URL is `None` in memory and `""` on the wire.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of one student record.
///
/// Derived from epoch milliseconds at creation time and strictly increasing
/// within a process.
pub type StudentId = i64;

/// Raw form submission as entered by the user.
///
/// Values are kept untrimmed; `year` is `None` when no option is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub programme: String,
    pub year: Option<String>,
    /// Comma-separated tag list.
    pub interests: String,
    pub photo_url: String,
}

impl StudentInput {
    /// Normalizes raw input into storable field values.
    ///
    /// Does not validate; callers gate on the validator first.
    pub fn normalize(&self) -> StudentFields {
        let photo_url = self.photo_url.trim();
        StudentFields {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            programme: self.programme.trim().to_string(),
            year: self
                .year
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            interests: parse_interests(&self.interests),
            photo_url: if photo_url.is_empty() {
                None
            } else {
                Some(photo_url.to_string())
            },
        }
    }
}

/// Normalized student field values, as stored in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub programme: String,
    pub year: String,
    pub interests: Vec<String>,
    pub photo_url: Option<String>,
}

impl StudentFields {
    /// Converts stored values back into a form field bag for editing.
    pub fn to_input(&self) -> StudentInput {
        StudentInput {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            programme: self.programme.clone(),
            year: if self.year.is_empty() {
                None
            } else {
                Some(self.year.clone())
            },
            interests: self.interests.join(", "),
            photo_url: self.photo_url.clone().unwrap_or_default(),
        }
    }
}

/// Splits a comma-separated interest list into trimmed, non-empty tags.
///
/// Order and duplicates are preserved.
pub fn parse_interests(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Derives avatar initials from the first character of each name.
pub fn derive_initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .take(1)
        .chain(last_name.chars().take(1))
        .collect()
}

/// Canonical student record owned by the roster store.
///
/// Fields are private so that `initials` can never drift from the names.
/// Updates produce a new record value carrying the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredStudent", into = "StoredStudent")]
pub struct StudentRecord {
    id: StudentId,
    fields: StudentFields,
    initials: String,
}

impl StudentRecord {
    /// Builds a record from an id and normalized fields, deriving initials.
    pub fn new(id: StudentId, fields: StudentFields) -> Self {
        let initials = derive_initials(&fields.first_name, &fields.last_name);
        Self {
            id,
            fields,
            initials,
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub fn fields(&self) -> &StudentFields {
        &self.fields
    }

    pub fn first_name(&self) -> &str {
        &self.fields.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.fields.last_name
    }

    pub fn email(&self) -> &str {
        &self.fields.email
    }

    pub fn programme(&self) -> &str {
        &self.fields.programme
    }

    pub fn year(&self) -> &str {
        &self.fields.year
    }

    pub fn interests(&self) -> &[String] {
        &self.fields.interests
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.fields.photo_url.as_deref()
    }

    pub fn initials(&self) -> &str {
        &self.initials
    }

    /// `"{first} {last}"`, as used in status announcements.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.fields.first_name, self.fields.last_name)
    }
}

/// Decode failure for one persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDecodeError {
    BlankName { id: StudentId },
}

impl Display for RecordDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName { id } => {
                write!(f, "student {id} has a blank first or last name")
            }
        }
    }
}

impl Error for RecordDecodeError {}

/// Wire shape of one record inside the persisted roster blob.
///
/// Field names are camelCase; `initials` is written for readers of the blob
/// but ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredStudent {
    id: StudentId,
    first_name: String,
    last_name: String,
    email: String,
    programme: String,
    year: String,
    #[serde(default)]
    interests: Vec<String>,
    #[serde(default)]
    photo_url: String,
    #[serde(default)]
    initials: String,
}

impl TryFrom<StoredStudent> for StudentRecord {
    type Error = RecordDecodeError;

    fn try_from(value: StoredStudent) -> Result<Self, Self::Error> {
        let first_name = value.first_name.trim();
        let last_name = value.last_name.trim();
        if first_name.is_empty() || last_name.is_empty() {
            return Err(RecordDecodeError::BlankName { id: value.id });
        }

        let photo_url = value.photo_url.trim();
        let fields = StudentFields {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: value.email.trim().to_string(),
            programme: value.programme.trim().to_string(),
            year: value.year.trim().to_string(),
            interests: value
                .interests
                .iter()
                .map(|tag| tag.trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            photo_url: if photo_url.is_empty() {
                None
            } else {
                Some(photo_url.to_string())
            },
        };
        Ok(Self::new(value.id, fields))
    }
}

impl From<StudentRecord> for StoredStudent {
    fn from(value: StudentRecord) -> Self {
        let StudentRecord {
            id,
            fields,
            initials,
        } = value;
        Self {
            id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            programme: fields.programme,
            year: fields.year,
            interests: fields.interests,
            photo_url: fields.photo_url.unwrap_or_default(),
            initials,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_initials, parse_interests, StudentInput, StudentRecord};

    fn ada_input() -> StudentInput {
        StudentInput {
            first_name: "  Ada ".to_string(),
            last_name: "Lovelace".to_string(),
            email: " ada@x.com ".to_string(),
            programme: "CS".to_string(),
            year: Some("2".to_string()),
            interests: "math, , music ,".to_string(),
            photo_url: "   ".to_string(),
        }
    }

    #[test]
    fn parse_interests_drops_empty_artifacts() {
        assert_eq!(parse_interests(" a ,, b,a ,"), vec!["a", "b", "a"]);
        assert!(parse_interests("").is_empty());
        assert!(parse_interests(" , ").is_empty());
    }

    #[test]
    fn initials_take_first_character_of_each_name() {
        assert_eq!(derive_initials("Ada", "Lovelace"), "AL");
        assert_eq!(derive_initials("Émile", "Zola"), "ÉZ");
    }

    #[test]
    fn normalize_trims_and_maps_blank_photo_to_none() {
        let fields = ada_input().normalize();
        assert_eq!(fields.first_name, "Ada");
        assert_eq!(fields.email, "ada@x.com");
        assert_eq!(fields.interests, vec!["math", "music"]);
        assert_eq!(fields.photo_url, None);
    }

    #[test]
    fn record_derives_initials_from_fields() {
        let record = StudentRecord::new(7, ada_input().normalize());
        assert_eq!(record.initials(), "AL");
        assert_eq!(record.display_name(), "Ada Lovelace");
    }

    #[test]
    fn to_input_joins_interests_for_form_population() {
        let fields = ada_input().normalize();
        let input = fields.to_input();
        assert_eq!(input.interests, "math, music");
        assert_eq!(input.year.as_deref(), Some("2"));
        assert_eq!(input.normalize(), fields);
    }
}
