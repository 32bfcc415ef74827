//! HTTP adapter unit tests.
//!
//! Uses wiremock to verify:
//! - Content negotiation headers on every request
//! - Cookie passing between requests
//! - 2xx body decoding
//! - Non-2xx status normalization (with and without a server message)
//! - Transport failure normalization

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::api::{self, ApiError};
use crate::core::api::dice::Die;
use crate::tests::common::fixtures;

// =============================================================================
// Content Negotiation
// =============================================================================

#[tokio::test]
async fn test_accept_header_on_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/monsters"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let monsters = api::monster::list_monsters(&client).await.unwrap();
    assert!(monsters.is_empty());
}

#[tokio::test]
async fn test_json_content_type_on_post() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/campaigns"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "name": "Lost Mine",
            "description": "Intro adventure"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "name": "Lost Mine",
            "description": "Intro adventure",
            "start_date": "2024-01-01T00:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let draft = crate::core::api::campaign::CampaignDraft {
        name: "Lost Mine".to_string(),
        description: "Intro adventure".to_string(),
    };
    let created = api::campaign::create_campaign(&client, &draft).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Lost Mine");
}

#[tokio::test]
async fn test_cookies_replayed_on_subsequent_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/")
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/monsters"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    api::campaign::list_campaigns(&client).await.unwrap();
    api::monster::list_monsters(&client).await.unwrap();
}

// =============================================================================
// Error Normalization
// =============================================================================

#[tokio::test]
async fn test_status_error_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/characters"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "database exploded"})),
        )
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let err = api::character::list_characters(&client).await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(message, "database exploded");
        }
        other => panic!("expected status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_status_error_without_body_uses_canonical_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let err = api::session::list_sessions(&client).await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected status error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_error_when_no_response() {
    // Bind a server to grab a free port, then drop it so the connect
    // is refused.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = fixtures::api_client(&uri);
    let err = api::campaign::list_campaigns(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let err = api::campaign::list_campaigns(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =============================================================================
// Dice Endpoint
// =============================================================================

#[tokio::test]
async fn test_roll_sends_combined_notation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/roll"))
        .and(body_json(json!({"dice": "2d20"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"rolls": [14, 7], "total": 21, "dice": "2d20"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let outcome = api::dice::roll(&client, Die::D20, 2).await.unwrap();
    assert_eq!(outcome.rolls, vec![14, 7]);
    assert_eq!(outcome.total, 21);
}

#[tokio::test]
async fn test_roll_rejection_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/roll"))
        .respond_with(ResponseTemplate::new(400).set_body_json(
            json!({"error": "Invalid dice notation. Use format: NdM (e.g. 2d6)"}),
        ))
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let err = api::dice::roll(&client, Die::D4, 1).await.unwrap_err();
    assert!(err.to_string().contains("Invalid dice notation"));
}
