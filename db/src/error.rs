//! Domain error taxonomy for the attendance subsystem.
//!
//! Handlers convert these into the `{success, data, message}` envelope at the
//! HTTP boundary; they are never allowed to cross it as panics.

use chrono::NaiveDate;
use sea_orm::DbErr;
use thiserror::Error;

/// Failures of the encounter store.
#[derive(Debug, Error)]
pub enum EncounterError {
    /// Another encounter already occupies this calendar date.
    #[error("an encounter is already scheduled for {0}")]
    DuplicateDate(NaiveDate),

    #[error("encounter not found")]
    NotFound,

    /// Finalized encounters are immutable.
    #[error("a finalized encounter can no longer be edited")]
    Finalized,

    /// Encounters with attendance records are never physically deleted.
    #[error("encounter has attendance records and cannot be deleted")]
    HasPresence,

    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

/// Failures of the presence store write path.
///
/// Underlying storage errors are wrapped rather than retried; the caller
/// resubmits the whole batch on user action, which is idempotent because the
/// upsert is keyed by (encounter, member).
#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("failed to save attendance: {0}")]
    SaveFailed(#[from] DbErr),
}
