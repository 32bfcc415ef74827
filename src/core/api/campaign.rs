//! Campaign wire types and endpoint calls.

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::core::store::selectors::Searchable;

/// A campaign as returned by the service.
///
/// The service serializes relationships as id lists; both default to
/// empty so older payloads without them still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// ISO date-time the campaign started; set server-side on insert.
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub characters: Vec<i64>,
    #[serde(default)]
    pub sessions: Vec<i64>,
}

impl Searchable for Campaign {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Body for `POST /campaigns`. Campaigns are create-only from this
/// client; the id and start date are assigned server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub name: String,
    pub description: String,
}

pub async fn list_campaigns(api: &ApiClient) -> Result<Vec<Campaign>, ApiError> {
    api.get("/campaigns").await
}

pub async fn create_campaign(api: &ApiClient, draft: &CampaignDraft) -> Result<Campaign, ApiError> {
    api.post("/campaigns", draft).await
}
