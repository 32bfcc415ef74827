//! Canned entities and helpers shared across test modules.

use chrono::NaiveDateTime;
use reqwest::StatusCode;

use crate::config::ApiConfig;
use crate::core::api::campaign::Campaign;
use crate::core::api::character::Character;
use crate::core::api::monster::Monster;
use crate::core::api::session::Session;
use crate::core::api::{ApiClient, ApiError};

/// A client pointed at a mock server, with a short timeout so transport
/// failures surface quickly.
pub fn api_client(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2_000,
    })
    .expect("client should build")
}

pub fn campaign(id: i64, name: &str) -> Campaign {
    Campaign {
        id,
        name: name.to_string(),
        description: String::new(),
        start_date: Some("2024-01-01T00:00:00".to_string()),
        characters: Vec::new(),
        sessions: Vec::new(),
    }
}

pub fn character(id: i64, name: &str, level: i32) -> Character {
    Character {
        id,
        name: name.to_string(),
        race: "Human".to_string(),
        character_class: "Fighter".to_string(),
        level,
        hit_points: 8 + 4 * level,
        campaign_id: 1,
    }
}

pub fn monster(id: i64, name: &str, challenge_rating: f64) -> Monster {
    Monster {
        id,
        name: name.to_string(),
        challenge_rating,
        hit_points: 10,
        armor_class: 12,
        description: String::new(),
    }
}

pub fn session(id: i64, campaign_id: i64, date: &str) -> Session {
    Session {
        id,
        campaign_id,
        date: NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
            .expect("fixture date should parse"),
        notes: String::new(),
    }
}

/// A normalized HTTP-status error, the shape stores record on failure.
pub fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.to_string(),
    }
}
