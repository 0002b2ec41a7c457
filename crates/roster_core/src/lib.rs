//! Core domain logic for the student roster.
//! This crate is the single source of truth for roster invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod session;
pub mod storage;
pub mod store;
pub mod validation;
pub mod view;

pub use config::{ConfigError, RosterConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::student::{StudentFields, StudentId, StudentInput, StudentRecord};
pub use service::roster_service::{RosterService, SubmitMode, SubmitOutcome};
pub use session::EditSession;
pub use storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError};
pub use store::roster_store::{LoadOutcome, RosterError, RosterResult, RosterStore};
pub use validation::student_validator::{
    validate_student, Field, FieldError, FieldErrorKind, ValidationReport,
};
pub use view::filter::{count_label, StudentFilter};
pub use view::headless::HeadlessRenderer;
pub use view::preview::{Avatar, PhotoPreview};
pub use view::projector::{ProjectionChanges, ReconcileReport, ViewProjector};
pub use view::renderer::{Projection, Renderer};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
