//! Character wire types and endpoint calls.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

/// A player character as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub race: String,
    #[serde(default)]
    pub character_class: String,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub hit_points: i32,
    pub campaign_id: i64,
}

fn default_level() -> i32 {
    1
}

/// Body for character create and full-record replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPayload {
    pub name: String,
    pub race: String,
    pub character_class: String,
    pub level: i32,
    pub hit_points: i32,
    pub campaign_id: i64,
}

pub async fn list_characters(api: &ApiClient) -> Result<Vec<Character>, ApiError> {
    api.get("/characters").await
}

pub async fn create_character(
    api: &ApiClient,
    payload: &CharacterPayload,
) -> Result<Character, ApiError> {
    api.post("/characters", payload).await
}

pub async fn update_character(
    api: &ApiClient,
    id: i64,
    payload: &CharacterPayload,
) -> Result<Character, ApiError> {
    api.put(&format!("/characters/{id}"), payload).await
}
