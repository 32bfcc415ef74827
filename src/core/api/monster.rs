//! Monster wire types and endpoint calls.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::core::store::selectors::Searchable;

/// A monster as returned by the service. Campaign-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub challenge_rating: f64,
    #[serde(default)]
    pub hit_points: i32,
    #[serde(default)]
    pub armor_class: i32,
    #[serde(default)]
    pub description: String,
}

impl Searchable for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Body for monster create and full-record replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterPayload {
    pub name: String,
    pub challenge_rating: f64,
    pub hit_points: i32,
    pub armor_class: i32,
    pub description: String,
}

pub async fn list_monsters(api: &ApiClient) -> Result<Vec<Monster>, ApiError> {
    api.get("/monsters").await
}

pub async fn create_monster(api: &ApiClient, payload: &MonsterPayload) -> Result<Monster, ApiError> {
    api.post("/monsters", payload).await
}

pub async fn update_monster(
    api: &ApiClient,
    id: i64,
    payload: &MonsterPayload,
) -> Result<Monster, ApiError> {
    api.put(&format!("/monsters/{id}"), payload).await
}

pub async fn delete_monster(api: &ApiClient, id: i64) -> Result<(), ApiError> {
    api.delete(&format!("/monsters/{id}")).await
}
