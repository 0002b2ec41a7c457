//! Edit-mode tracking.
//!
//! # Invariants
//! - At most one record id is held at a time.
//! - The owning roster store ends the session when the held record is
//!   removed, so the session never points at a missing record.

use crate::model::student::StudentId;

/// Marker of which record, if any, the form is currently editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSession {
    current: Option<StudentId>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing `id`, replacing any previous session.
    ///
    /// Existence of `id` is checked by `RosterStore::begin_edit`.
    pub fn begin(&mut self, id: StudentId) {
        self.current = Some(id);
    }

    /// Clears the session unconditionally.
    pub fn end(&mut self) {
        self.current = None;
    }

    /// Ends the session only if it currently holds `id`.
    ///
    /// Returns whether the session was ended.
    pub fn end_if(&mut self, id: StudentId) -> bool {
        if self.current == Some(id) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<StudentId> {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::EditSession;

    #[test]
    fn begin_replaces_and_end_clears() {
        let mut session = EditSession::new();
        assert_eq!(session.current(), None);

        session.begin(1);
        session.begin(2);
        assert_eq!(session.current(), Some(2));

        session.end();
        session.end();
        assert!(!session.is_active());
    }

    #[test]
    fn end_if_only_clears_matching_id() {
        let mut session = EditSession::new();
        session.begin(5);

        assert!(!session.end_if(6));
        assert_eq!(session.current(), Some(5));

        assert!(session.end_if(5));
        assert_eq!(session.current(), None);
    }
}
