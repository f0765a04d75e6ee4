use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use db::models::encounter::{Model as Encounter, Status};

#[derive(Debug, Serialize)]
pub struct EncounterResponse {
    pub id: i64,
    /// ISO calendar date, e.g. "2025-06-01".
    pub event_date: String,
    pub description: Option<String>,
    pub status: Status,
    pub created_by: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Encounter> for EncounterResponse {
    fn from(m: Encounter) -> Self {
        Self {
            id: m.id,
            event_date: m.event_date.to_string(),
            description: m.description,
            status: m.status,
            created_by: m.created_by,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEncounterReq {
    pub event_date: NaiveDate,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct EditEncounterReq {
    pub event_date: Option<NaiveDate>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<Status>,
    /// Inclusive lower bound on the event date.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the event date.
    pub to: Option<NaiveDate>,
    pub page: Option<i32>,
    pub per_page: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub encounters: Vec<EncounterResponse>,
    pub page: i32,
    pub per_page: i32,
    pub total: i32,
}
