//! Fetch/submit flows: endpoint call plus store transition, against a
//! mock service. Each test drives the same two-phase path the event
//! loop does — apply `FetchStarted`, await the call, apply the
//! completion.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::api;
use crate::core::api::character::CharacterPayload;
use crate::core::api::dice::Die;
use crate::core::api::monster::MonsterPayload;
use crate::core::store::{
    CampaignEvent, CampaignStore, CharacterEvent, CharacterStore, DiceEvent, DiceStore,
    MonsterEvent, MonsterStore, RequestStatus,
};
use crate::tests::common::fixtures;

#[tokio::test]
async fn test_fetch_campaigns_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/campaigns"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Lost Mine",
            "description": "",
            "start_date": "2024-01-01"
        }])))
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let mut store = CampaignStore::default();

    store.apply(CampaignEvent::FetchStarted);
    assert_eq!(store.status(), RequestStatus::Loading);

    let result = api::campaign::list_campaigns(&client).await;
    store.apply(CampaignEvent::FetchFinished(result));

    assert_eq!(store.status(), RequestStatus::Succeeded);
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.all()[0].name, "Lost Mine");
    assert_eq!(store.all()[0].start_date.as_deref(), Some("2024-01-01"));
}

#[tokio::test]
async fn test_fetch_replaces_stale_entries_exactly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/monsters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 5, "name": "Owlbear", "challenge_rating": 3.0,
             "hit_points": 59, "armor_class": 13, "description": ""}
        ])))
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let mut store = MonsterStore::default();
    // Pre-populate with entries the server no longer returns.
    store.apply(MonsterEvent::FetchFinished(Ok(vec![
        fixtures::monster(1, "Goblin", 0.25),
        fixtures::monster(2, "Wolf", 0.25),
    ])));

    store.apply(MonsterEvent::FetchStarted);
    let result = api::monster::list_monsters(&client).await;
    store.apply(MonsterEvent::FetchFinished(result));

    // No leftover stale entries: the collection equals the server list.
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.all()[0].id, 5);
    assert_eq!(store.all()[0].hit_points, 59);
}

#[tokio::test]
async fn test_create_monster_appends_exactly_one() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/monsters"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 9, "name": "Mimic", "challenge_rating": 2.0,
            "hit_points": 58, "armor_class": 12, "description": "A hungry chest"
        })))
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let mut store = MonsterStore::default();
    store.apply(MonsterEvent::FetchFinished(Ok(vec![fixtures::monster(
        1, "Goblin", 0.25,
    )])));
    let before = store.all().len();

    let payload = MonsterPayload {
        name: "Mimic".to_string(),
        challenge_rating: 2.0,
        hit_points: 58,
        armor_class: 12,
        description: "A hungry chest".to_string(),
    };
    let result = api::monster::create_monster(&client, &payload).await;
    store.apply(MonsterEvent::CreateFinished(result));

    assert_eq!(store.all().len(), before + 1);
    // The record shown is the server's echo, not a client guess.
    let created = store.all().iter().find(|m| m.id == 9).unwrap();
    assert_eq!(created.description, "A hungry chest");
}

#[tokio::test]
async fn test_update_character_full_record_replace() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/characters/2"))
        .and(body_json(json!({
            "name": "Thokk",
            "race": "Half-Orc",
            "character_class": "Barbarian",
            "level": 6,
            "hit_points": 58,
            "campaign_id": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 2, "name": "Thokk", "race": "Half-Orc",
            "character_class": "Barbarian", "level": 6,
            "hit_points": 58, "campaign_id": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let mut store = CharacterStore::default();
    let bystander = fixtures::character(1, "Mira", 3);
    let mut thokk = fixtures::character(2, "Thokk", 5);
    thokk.race = "Half-Orc".to_string();
    thokk.character_class = "Barbarian".to_string();
    store.apply(CharacterEvent::FetchFinished(Ok(vec![
        bystander.clone(),
        thokk,
    ])));

    let payload = CharacterPayload {
        name: "Thokk".to_string(),
        race: "Half-Orc".to_string(),
        character_class: "Barbarian".to_string(),
        level: 6,
        hit_points: 58,
        campaign_id: 1,
    };
    let result = api::character::update_character(&client, 2, &payload).await;
    store.apply(CharacterEvent::UpdateFinished(result));

    // Every field reflects the server's returned record.
    let updated = store.all().iter().find(|c| c.id == 2).unwrap();
    assert_eq!(updated.level, 6);
    assert_eq!(updated.hit_points, 58);
    // Entries with other ids are unchanged.
    assert_eq!(store.all()[0], bystander);
}

#[tokio::test]
async fn test_update_with_locally_absent_id_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/characters/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "name": "Stranger", "race": "", "character_class": "",
            "level": 2, "hit_points": 12, "campaign_id": 1
        })))
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let mut store = CharacterStore::default();
    store.apply(CharacterEvent::FetchFinished(Ok(vec![fixtures::character(
        1, "Mira", 3,
    )])));
    let before = store.all().to_vec();

    let payload = CharacterPayload {
        name: "Stranger".to_string(),
        race: String::new(),
        character_class: String::new(),
        level: 2,
        hit_points: 12,
        campaign_id: 1,
    };
    let result = api::character::update_character(&client, 42, &payload).await;
    store.apply(CharacterEvent::UpdateFinished(result));

    assert_eq!(store.all(), before.as_slice());
}

#[tokio::test]
async fn test_failed_create_leaves_collection_and_surfaces_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/monsters"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Missing required field: name"})),
        )
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let mut store = MonsterStore::default();
    store.apply(MonsterEvent::FetchFinished(Ok(vec![fixtures::monster(
        1, "Goblin", 0.25,
    )])));

    let payload = MonsterPayload {
        name: String::new(),
        challenge_rating: 0.0,
        hit_points: 10,
        armor_class: 10,
        description: String::new(),
    };
    let result = api::monster::create_monster(&client, &payload).await;
    assert!(result
        .as_ref()
        .unwrap_err()
        .to_string()
        .contains("Missing required field"));
    store.apply(MonsterEvent::CreateFinished(result));

    // The submitting controller shows the error; the store is untouched.
    assert_eq!(store.all().len(), 1);
    assert_eq!(store.status(), RequestStatus::Succeeded);
    assert_eq!(store.error(), None);
}

#[tokio::test]
async fn test_roll_flow_records_history_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/roll"))
        .and(body_json(json!({"dice": "2d20"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"rolls": [14, 7], "total": 21})),
        )
        .mount(&server)
        .await;

    let client = fixtures::api_client(&server.uri());
    let mut store = DiceStore::default();

    store.apply(DiceEvent::RollStarted);
    let outcome = api::dice::roll(&client, Die::D20, 2).await;
    store.apply(DiceEvent::RollFinished {
        die: Die::D20,
        num: 2,
        outcome,
    });

    let newest = store.last_roll().unwrap();
    assert_eq!(newest.die.label(), "d20");
    assert_eq!(newest.num, 2);
    assert_eq!(newest.results, vec![14, 7]);
    assert_eq!(newest.total, 21);
    assert_eq!(newest.total, newest.results.iter().sum::<i64>());
}
