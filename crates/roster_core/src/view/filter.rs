//! Search filter predicate and count label.

use crate::model::student::StudentRecord;

/// Normalized search filter.
///
/// Input is trimmed and lowercased once; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    needle: String,
}

impl StudentFilter {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring test against `search_haystack(record)`.
    pub fn matches(&self, record: &StudentRecord) -> bool {
        self.is_empty() || search_haystack(record).contains(&self.needle)
    }
}

/// Searchable text of one record, lowercased:
/// `first last programme Year <year> <interests...>`.
pub fn search_haystack(record: &StudentRecord) -> String {
    let year = format!("Year {}", record.year());
    let interests = record.interests().join(" ");
    [
        record.first_name(),
        record.last_name(),
        record.programme(),
        year.as_str(),
        interests.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// `Displaying N student profile(s)`; plural for every count except one.
pub fn count_label(count: usize) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("Displaying {count} student profile{suffix}")
}

#[cfg(test)]
mod tests {
    use super::{count_label, search_haystack, StudentFilter};
    use crate::model::student::{StudentInput, StudentRecord};

    fn ada() -> StudentRecord {
        let input = StudentInput {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.com".to_string(),
            programme: "CS".to_string(),
            year: Some("2".to_string()),
            interests: "math, music".to_string(),
            photo_url: String::new(),
        };
        StudentRecord::new(1, input.normalize())
    }

    #[test]
    fn haystack_joins_fields_in_fixed_order() {
        assert_eq!(search_haystack(&ada()), "ada lovelace cs year 2 math music");
    }

    #[test]
    fn filter_is_trimmed_and_case_insensitive() {
        let record = ada();
        assert!(StudentFilter::new("  MUSIC ").matches(&record));
        assert!(StudentFilter::new("year 2").matches(&record));
        assert!(StudentFilter::new("lovelace cs").matches(&record));
        assert!(!StudentFilter::new("bio").matches(&record));
        assert!(!StudentFilter::new("ada@x.com").matches(&record));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = StudentFilter::new("   ");
        assert!(filter.is_empty());
        assert!(filter.matches(&ada()));
    }

    #[test]
    fn count_label_pluralizes_zero_and_many() {
        assert_eq!(count_label(0), "Displaying 0 student profiles");
        assert_eq!(count_label(1), "Displaying 1 student profile");
        assert_eq!(count_label(3), "Displaying 3 student profiles");
    }
}
