//! Photo preview and avatar fallbacks.
//!
//! Image load failures are cosmetic: they swap in a placeholder and never
//! touch roster state.

use crate::model::student::StudentRecord;
use log::debug;

/// Form-side preview of the photo URL field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoPreview {
    /// Field is blank.
    NoImage,
    /// Image requested from the given URL.
    Image(String),
    /// Image failed to load.
    Invalid,
}

impl PhotoPreview {
    /// Preview for the raw field value, computed on blur.
    pub fn for_url(raw: &str) -> Self {
        let url = raw.trim();
        if url.is_empty() {
            Self::NoImage
        } else {
            Self::Image(url.to_string())
        }
    }

    /// Preview after the image reported a load error.
    pub fn load_failed(self) -> Self {
        match self {
            Self::Image(_) => {
                debug!("event=photo_preview module=view status=fallback");
                Self::Invalid
            }
            other => other,
        }
    }

    pub fn placeholder_text(&self) -> Option<&'static str> {
        match self {
            Self::NoImage => Some("No Image"),
            Self::Image(_) => None,
            Self::Invalid => Some("Invalid URL"),
        }
    }
}

/// Card avatar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    Photo(String),
    Initials(String),
}

impl Avatar {
    /// Photo when the record has one, initials otherwise.
    pub fn for_record(record: &StudentRecord) -> Self {
        match record.photo_url() {
            Some(url) => Self::Photo(url.to_string()),
            None => Self::Initials(record.initials().to_string()),
        }
    }

    /// Avatar after the photo failed to load.
    pub fn fallback(record: &StudentRecord) -> Self {
        debug!(
            "event=avatar_render module=view status=fallback id={}",
            record.id()
        );
        Self::Initials(record.initials().to_string())
    }
}
