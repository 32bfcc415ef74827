//! Session-note wire types and endpoint calls.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

/// A play session as returned by the service.
///
/// The service emits naive ISO date-times (no offset), which is exactly
/// what chrono's serde impl for `NaiveDateTime` speaks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub campaign_id: i64,
    pub date: NaiveDateTime,
    #[serde(default)]
    pub notes: String,
}

/// Body for session create and full-record replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPayload {
    pub campaign_id: i64,
    pub date: NaiveDateTime,
    pub notes: String,
}

pub async fn list_sessions(api: &ApiClient) -> Result<Vec<Session>, ApiError> {
    api.get("/sessions").await
}

pub async fn create_session(api: &ApiClient, payload: &SessionPayload) -> Result<Session, ApiError> {
    api.post("/sessions", payload).await
}

pub async fn update_session(
    api: &ApiClient,
    id: i64,
    payload: &SessionPayload,
) -> Result<Session, ApiError> {
    api.put(&format!("/sessions/{id}"), payload).await
}

pub async fn delete_session(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/sessions/{id}")).await
}
