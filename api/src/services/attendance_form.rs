//! Role-gated attendance form controller.
//!
//! Holds the merged roster view for one encounter and decides, per acting
//! role and encounter state, which fields may be edited. On submit it packages
//! the full current view as one batch for the presence store, so fields the
//! actor could not edit are echoed back unchanged.
//!
//! The same [`FieldAccess`] matrix is applied again by the attendance save
//! handler before anything reaches the store: the client is never trusted to
//! enforce its own permissions.

use db::error::PresenceError;
use db::models::encounter::Status as EncounterStatus;
use db::models::presence::{self, PresenceItem, RosterEntry, Status as PresenceStatus};
use db::models::user::Role;
use sea_orm::DbConn;
use serde::Serialize;

/// Which presence fields the acting role may currently edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldAccess {
    pub status: bool,
    pub material: bool,
    pub uniform: bool,
    pub note: bool,
}

impl FieldAccess {
    /// Everything read-only.
    pub const NONE: FieldAccess = FieldAccess {
        status: false,
        material: false,
        uniform: false,
        note: false,
    };

    /// The editability matrix.
    ///
    /// Attendance/punctuality judgment is an administrative act; equipment
    /// and uniform checks may be delegated to the unit's counselor for the
    /// same row. Nothing is editable outside the in_progress window.
    pub fn for_role(role: Role, encounter_status: EncounterStatus) -> Self {
        if encounter_status != EncounterStatus::InProgress {
            return Self::NONE;
        }

        match role {
            Role::Admin => FieldAccess {
                status: true,
                material: true,
                uniform: true,
                note: true,
            },
            Role::Counselor => FieldAccess {
                status: false,
                material: true,
                uniform: true,
                note: false,
            },
            Role::Secretariat | Role::Treasurer => Self::NONE,
        }
    }

    /// True when at least one field is editable.
    pub fn any(self) -> bool {
        self.status || self.material || self.uniform || self.note
    }

    /// Merges a submitted item with the stored (or sentinel) state, keeping
    /// every field this access level may not touch at its stored value.
    pub fn merge(self, submitted: &PresenceItem, stored: &PresenceItem) -> PresenceItem {
        PresenceItem {
            member_id: submitted.member_id,
            status: if self.status {
                submitted.status
            } else {
                stored.status
            },
            has_material: if self.material {
                submitted.has_material
            } else {
                stored.has_material
            },
            has_uniform: if self.uniform {
                submitted.has_uniform
            } else {
                stored.has_uniform
            },
            note: if self.note {
                submitted.note.clone()
            } else {
                stored.note.clone()
            },
        }
    }
}

/// In-memory state of one attendance screen.
pub struct AttendanceForm {
    encounter_id: i64,
    role: Role,
    access: FieldAccess,
    rows: Vec<RosterEntry>,
}

impl AttendanceForm {
    pub fn new(
        encounter_id: i64,
        encounter_status: EncounterStatus,
        role: Role,
        rows: Vec<RosterEntry>,
    ) -> Self {
        Self {
            encounter_id,
            role,
            access: FieldAccess::for_role(role, encounter_status),
            rows,
        }
    }

    pub fn access(&self) -> FieldAccess {
        self.access
    }

    pub fn rows(&self) -> &[RosterEntry] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row_mut(&mut self, member_id: i64) -> Option<&mut RosterEntry> {
        self.rows.iter_mut().find(|r| r.member_id == member_id)
    }

    /// Each setter applies the edit only when the matrix allows it and
    /// reports whether it did.
    pub fn set_status(&mut self, member_id: i64, status: PresenceStatus) -> bool {
        if !self.access.status {
            return false;
        }
        match self.row_mut(member_id) {
            Some(row) => {
                row.status = status;
                true
            }
            None => false,
        }
    }

    pub fn set_material(&mut self, member_id: i64, has_material: bool) -> bool {
        if !self.access.material {
            return false;
        }
        match self.row_mut(member_id) {
            Some(row) => {
                row.has_material = has_material;
                true
            }
            None => false,
        }
    }

    pub fn set_uniform(&mut self, member_id: i64, has_uniform: bool) -> bool {
        if !self.access.uniform {
            return false;
        }
        match self.row_mut(member_id) {
            Some(row) => {
                row.has_uniform = has_uniform;
                true
            }
            None => false,
        }
    }

    pub fn set_note(&mut self, member_id: i64, note: Option<String>) -> bool {
        if !self.access.note {
            return false;
        }
        match self.row_mut(member_id) {
            Some(row) => {
                row.note = note;
                true
            }
            None => false,
        }
    }

    /// Batch convenience: rewrites every row's status, leaving material and
    /// uniform untouched. Admin-only while roll call is open.
    pub fn mark_all(&mut self, status: PresenceStatus) -> bool {
        if self.role != Role::Admin || !self.access.status {
            return false;
        }
        for row in &mut self.rows {
            row.status = status;
        }
        true
    }

    /// The full current view as an upsert batch, in roster order.
    pub fn to_batch(&self) -> Vec<PresenceItem> {
        self.rows.iter().map(RosterEntry::to_item).collect()
    }

    /// Sends the whole view to the presence store.
    ///
    /// An empty roster performs no store call at all. On failure the store's
    /// message is returned verbatim for the UI to surface; the caller
    /// re-fetches the view after either outcome.
    pub async fn submit(&self, db: &DbConn, actor_id: i64) -> Result<usize, String> {
        if self.rows.is_empty() {
            return Ok(0);
        }

        presence::Model::upsert_batch(db, self.encounter_id, &self.to_batch(), actor_id)
            .await
            .map_err(|e: PresenceError| e.to_string())
    }
}
