//! Roster use-case service.
//!
//! # Responsibility
//! - Provide the entry points the form layer calls: submit, edit, remove,
//!   filter.
//! - Keep store, edit session and both projections in step.
//!
//! # Invariants
//! - A rejected submission mutates nothing and reconciles nothing.
//! - Filter changes never touch the store.
//! - A successful update ends the edit session.

use crate::config::{ConfigError, RosterConfig};
use crate::model::student::{StudentId, StudentInput, StudentRecord};
use crate::storage::KeyValueStore;
use crate::store::roster_store::{LoadOutcome, RosterError, RosterResult, RosterStore};
use crate::validation::student_validator::{validate_student, ValidationReport};
use crate::view::projector::{ReconcileReport, ViewProjector};
use crate::view::renderer::Renderer;
use log::{info, warn};

const STATUS_FIX_ERRORS: &str = "Fix errors before submitting.";
const STATUS_NOT_FOUND: &str = "That student no longer exists.";
const STATUS_RESET: &str = "Saved roster could not be read; starting with an empty roster.";

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(StudentRecord),
    Updated(StudentRecord),
}

impl SubmitOutcome {
    pub fn record(&self) -> &StudentRecord {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }
}

/// Whether the next submit adds or updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    Add,
    Update(StudentId),
}

impl SubmitMode {
    /// Submit button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add Student",
            Self::Update(_) => "Update Student",
        }
    }
}

/// Roster application facade over store, projector and renderer.
pub struct RosterService<S: KeyValueStore, R: Renderer> {
    config: RosterConfig,
    store: RosterStore<S>,
    projector: ViewProjector,
    renderer: R,
    filter_text: String,
    status: Option<String>,
}

impl<S: KeyValueStore, R: Renderer> RosterService<S, R> {
    /// Validates `config`, loads the persisted roster and renders it.
    ///
    /// # Errors
    /// - Returns `ConfigError` for an invalid config. Unreadable persisted
    ///   data is not an error; it is reported through `LoadOutcome`.
    pub fn open(
        storage: S,
        renderer: R,
        config: RosterConfig,
    ) -> Result<(Self, LoadOutcome), ConfigError> {
        config.validate()?;
        let mut store = RosterStore::new(storage, config.storage_key.clone());
        let outcome = store.load();

        let mut service = Self {
            config,
            store,
            projector: ViewProjector::new(),
            renderer,
            filter_text: String::new(),
            status: None,
        };
        if matches!(outcome, LoadOutcome::Corrupt { .. }) {
            service.status = Some(STATUS_RESET.to_string());
        }
        service.reconcile();
        Ok((service, outcome))
    }

    /// Validates and applies one form submission.
    ///
    /// Routes to create or update depending on the edit session.
    pub fn submit(&mut self, input: &StudentInput) -> RosterResult<SubmitOutcome> {
        let editing = self.store.editing();
        let report = self.validate(input);
        if !report.is_valid() {
            warn!(
                "event=student_submit module=service status=rejected errors={} first_field={}",
                report.error_count(),
                report
                    .first_invalid_field()
                    .map(|field| field.as_str())
                    .unwrap_or("none")
            );
            self.status = Some(STATUS_FIX_ERRORS.to_string());
            return Err(RosterError::Validation(report));
        }

        let fields = input.normalize();
        let outcome = match editing {
            Some(id) => match self.store.update(id, fields) {
                Ok(record) => {
                    self.store.end_edit();
                    self.projector.invalidate(record.id());
                    self.status = Some(format!("Updated {}.", record.display_name()));
                    SubmitOutcome::Updated(record)
                }
                Err(RosterError::NotFound(id)) => {
                    self.store.end_edit();
                    self.status = Some(STATUS_NOT_FOUND.to_string());
                    return Err(RosterError::NotFound(id));
                }
                Err(err) => return Err(err),
            },
            None => {
                let record = self.store.create(fields)?;
                self.status = Some(format!("Added {}.", record.display_name()));
                SubmitOutcome::Created(record)
            }
        };

        self.reconcile();
        Ok(outcome)
    }

    /// Runs validation for the current edit mode without mutating anything.
    pub fn validate(&self, input: &StudentInput) -> ValidationReport {
        validate_student(input, self.store.all(), self.store.editing(), &self.config)
    }

    /// Removes one record; a missing id is a no-op with a status message.
    pub fn remove(&mut self, id: StudentId) -> RosterResult<StudentRecord> {
        match self.store.remove(id) {
            Ok(removed) => {
                self.status = Some(format!("Removed {}.", removed.display_name()));
                self.reconcile();
                Ok(removed)
            }
            Err(RosterError::NotFound(id)) => {
                info!("event=student_remove module=service status=not_found id={id}");
                self.status = Some(STATUS_NOT_FOUND.to_string());
                Err(RosterError::NotFound(id))
            }
            Err(err) => Err(err),
        }
    }

    /// Enters edit mode for `id` and returns the values to populate the form.
    pub fn begin_edit(&mut self, id: StudentId) -> RosterResult<StudentInput> {
        let result = self.store.begin_edit(id);
        if result.is_err() {
            self.status = Some(STATUS_NOT_FOUND.to_string());
        }
        result
    }

    pub fn cancel_edit(&mut self) {
        self.store.end_edit();
    }

    pub fn submit_mode(&self) -> SubmitMode {
        match self.store.editing() {
            Some(id) => SubmitMode::Update(id),
            None => SubmitMode::Add,
        }
    }

    /// Applies new search text to both projections.
    pub fn set_filter(&mut self, raw: &str) -> ReconcileReport {
        self.filter_text = raw.to_string();
        self.reconcile()
    }

    pub fn count_label(&self) -> String {
        self.projector.count_label()
    }

    /// Latest status-region announcement.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn store(&self) -> &RosterStore<S> {
        &self.store
    }

    pub fn projector(&self) -> &ViewProjector {
        &self.projector
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    fn reconcile(&mut self) -> ReconcileReport {
        self.projector
            .reconcile(self.store.all(), &self.filter_text, &mut self.renderer)
    }
}
