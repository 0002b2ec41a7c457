//! Roster store: CRUD, id allocation, persistence and edit session.
//!
//! # Responsibility
//! - Provide create/update/remove/lookup over the ordered roster.
//! - Load and save the roster wholesale through a `KeyValueStore`.
//!
//! # Invariants
//! - Ids strictly increase within a process and are never reissued.
//! - `update` keeps the record at its position.
//! - A failed save rolls the in-memory mutation back (all-or-nothing).
//! - Missing or corrupt persisted data loads as an empty roster. Duplicate
//!   ids, case-insensitive duplicate emails and ids outside `1..i64::MAX`
//!   count as corrupt.
//! - Removing the edited record ends the edit session.

use crate::model::student::{StudentFields, StudentId, StudentInput, StudentRecord};
use crate::session::EditSession;
use crate::storage::{KeyValueStore, StorageError};
use crate::validation::student_validator::ValidationReport;
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type RosterResult<T> = Result<T, RosterError>;

/// Wall-clock source for id allocation, in epoch milliseconds.
pub type Clock = fn() -> StudentId;

/// Error for roster operations.
#[derive(Debug)]
pub enum RosterError {
    /// Submission rejected; nothing was mutated.
    Validation(ValidationReport),
    /// Operation referenced an id that is not in the roster.
    NotFound(StudentId),
    /// Persistence medium failed; the mutation was rolled back.
    Storage(StorageError),
    /// Roster could not be serialized.
    Encode(serde_json::Error),
    /// No id above the last issued one remains below `i64::MAX`.
    IdSpaceExhausted,
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(report) => write!(f, "{report}"),
            Self::NotFound(id) => write!(f, "student not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode roster: {err}"),
            Self::IdSpaceExhausted => write!(f, "student id space exhausted"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(report) => Some(report),
            Self::NotFound(_) | Self::IdSpaceExhausted => None,
            Self::Storage(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<ValidationReport> for RosterError {
    fn from(value: ValidationReport) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RosterError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Result of `RosterStore::load`. Never an error: bad data resets to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Persisted roster decoded successfully.
    Loaded { count: usize },
    /// Nothing persisted under the key.
    Missing,
    /// Persisted data could not be read or decoded; roster reset to empty.
    Corrupt { reason: String },
}

/// Owner of the authoritative roster.
pub struct RosterStore<S: KeyValueStore> {
    storage: S,
    key: String,
    records: Vec<StudentRecord>,
    last_issued_id: StudentId,
    session: EditSession,
    clock: Clock,
}

impl<S: KeyValueStore> RosterStore<S> {
    /// Creates an empty store persisting under `key`. Call `load()` to read
    /// the persisted roster.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            records: Vec::new(),
            last_issued_id: 0,
            session: EditSession::new(),
            clock: epoch_millis,
        }
    }

    /// Replaces the wall-clock source used for id allocation.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces in-memory state with the persisted roster.
    ///
    /// Ends any edit session. Corrupt or missing data yields an empty roster.
    pub fn load(&mut self) -> LoadOutcome {
        self.session.end();
        let outcome = match self.read_persisted() {
            Ok(Some(records)) => {
                let count = records.len();
                if let Some(max_id) = records.iter().map(StudentRecord::id).max() {
                    self.last_issued_id = self.last_issued_id.max(max_id);
                }
                self.records = records;
                LoadOutcome::Loaded { count }
            }
            Ok(None) => {
                self.records.clear();
                LoadOutcome::Missing
            }
            Err(reason) => {
                self.records.clear();
                LoadOutcome::Corrupt { reason }
            }
        };

        match &outcome {
            LoadOutcome::Loaded { count } => {
                info!("event=roster_load module=store status=ok count={count}");
            }
            LoadOutcome::Missing => {
                info!("event=roster_load module=store status=empty");
            }
            LoadOutcome::Corrupt { reason } => {
                warn!(
                    "event=roster_load module=store status=reset error_code=persistence_corrupt error={reason}"
                );
            }
        }
        outcome
    }

    /// Writes the whole roster to the persistence port.
    pub fn save(&mut self) -> RosterResult<()> {
        let blob = serde_json::to_string(&self.records)?;
        self.storage.set(&self.key, &blob)?;
        Ok(())
    }

    /// Appends a new record built from pre-validated fields.
    ///
    /// Callers must have validated the input with no edit session.
    pub fn create(&mut self, fields: StudentFields) -> RosterResult<StudentRecord> {
        let id = self.next_id()?;
        let record = StudentRecord::new(id, fields);
        self.records.push(record.clone());

        if let Err(err) = self.save() {
            self.records.pop();
            warn!("event=student_create module=store status=error id={id} error={err}");
            return Err(err);
        }

        info!(
            "event=student_create module=store status=ok id={id} total={}",
            self.records.len()
        );
        Ok(record)
    }

    /// Replaces the record `id` in place with pre-validated fields.
    pub fn update(&mut self, id: StudentId, fields: StudentFields) -> RosterResult<StudentRecord> {
        let index = self.position_of(id).ok_or(RosterError::NotFound(id))?;
        let record = StudentRecord::new(id, fields);
        let previous = std::mem::replace(&mut self.records[index], record.clone());

        if let Err(err) = self.save() {
            self.records[index] = previous;
            warn!("event=student_update module=store status=error id={id} error={err}");
            return Err(err);
        }

        info!("event=student_update module=store status=ok id={id}");
        Ok(record)
    }

    /// Removes the record `id`, ending the edit session if it held `id`.
    pub fn remove(&mut self, id: StudentId) -> RosterResult<StudentRecord> {
        let index = self.position_of(id).ok_or(RosterError::NotFound(id))?;
        let removed = self.records.remove(index);

        if let Err(err) = self.save() {
            self.records.insert(index, removed);
            warn!("event=student_remove module=store status=error id={id} error={err}");
            return Err(err);
        }

        let session_ended = self.session.end_if(id);
        info!(
            "event=student_remove module=store status=ok id={id} session_ended={session_ended} total={}",
            self.records.len()
        );
        Ok(removed)
    }

    pub fn find_by_id(&self, id: StudentId) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Read-only snapshot in insertion order.
    pub fn all(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Starts editing `id` and returns its values for form population.
    pub fn begin_edit(&mut self, id: StudentId) -> RosterResult<StudentInput> {
        let input = self
            .find_by_id(id)
            .map(|record| record.fields().to_input())
            .ok_or(RosterError::NotFound(id))?;
        self.session.begin(id);
        Ok(input)
    }

    pub fn end_edit(&mut self) {
        self.session.end();
    }

    /// Id of the record under edit, if any.
    pub fn editing(&self) -> Option<StudentId> {
        self.session.current()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position_of(&self, id: StudentId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    fn next_id(&mut self) -> RosterResult<StudentId> {
        let floor = self
            .last_issued_id
            .checked_add(1)
            .ok_or(RosterError::IdSpaceExhausted)?;
        let id = (self.clock)().max(floor);
        if id == StudentId::MAX {
            return Err(RosterError::IdSpaceExhausted);
        }
        self.last_issued_id = id;
        Ok(id)
    }

    fn read_persisted(&self) -> Result<Option<Vec<StudentRecord>>, String> {
        let blob = match self.storage.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Ok(None),
            Err(err) => return Err(format!("storage read failed: {err}")),
        };

        let records = serde_json::from_str::<Option<Vec<StudentRecord>>>(&blob)
            .map_err(|err| err.to_string())?
            .unwrap_or_default();

        if let Some(record) = records
            .iter()
            .find(|record| record.id() <= 0 || record.id() == StudentId::MAX)
        {
            return Err(format!("student id {} out of range", record.id()));
        }

        let mut seen = HashSet::with_capacity(records.len());
        if let Some(duplicate) = records.iter().find(|record| !seen.insert(record.id())) {
            return Err(format!("duplicate student id {}", duplicate.id()));
        }

        let mut emails = HashSet::with_capacity(records.len());
        if let Some(duplicate) = records
            .iter()
            .find(|record| !emails.insert(record.email().to_lowercase()))
        {
            return Err(format!("duplicate email on student id {}", duplicate.id()));
        }
        Ok(Some(records))
    }
}

fn epoch_millis() -> StudentId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| StudentId::try_from(elapsed.as_millis()).unwrap_or(StudentId::MAX))
        .unwrap_or_default()
}
