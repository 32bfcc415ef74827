//! Network effect dispatch for the TUI.
//!
//! Views never await: every operation here spawns a task against the
//! shared [`ApiClient`] and routes the completion back through the app
//! event channel, so store mutations happen on the main loop in event
//! arrival order. Nothing is cancelled — a page losing focus does not
//! abort its in-flight calls.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::api::campaign::CampaignDraft;
use crate::core::api::character::CharacterPayload;
use crate::core::api::dice::Die;
use crate::core::api::monster::MonsterPayload;
use crate::core::api::session::SessionPayload;
use crate::core::api::{self, ApiClient};
use crate::core::store::{
    CampaignEvent, CampaignStore, CharacterEvent, CharacterStore, DiceEvent, DiceStore,
    MonsterEvent, MonsterStore, SessionEvent, SessionStore, StoreEvent,
};

use super::events::AppEvent;

/// Handle to the API client plus the channel completions return on.
#[derive(Clone)]
pub struct Services {
    api: Arc<ApiClient>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    pub fn new(api: Arc<ApiClient>, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { api, event_tx }
    }

    fn send(tx: &mpsc::UnboundedSender<AppEvent>, event: StoreEvent) {
        // The receiver only drops on shutdown; late completions are fine
        // to discard then.
        let _ = tx.send(AppEvent::Store(event));
    }

    /// One-shot liveness probe against `GET /test`.
    pub fn check_health(&self) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::ping(&api).await;
            let _ = tx.send(AppEvent::Health(result));
        });
    }

    // ── Campaigns ───────────────────────────────────────────────────────

    pub fn fetch_campaigns(&self, store: &mut CampaignStore) {
        store.apply(CampaignEvent::FetchStarted);
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::campaign::list_campaigns(&api).await;
            Self::send(&tx, StoreEvent::Campaigns(CampaignEvent::FetchFinished(result)));
        });
    }

    pub fn create_campaign(&self, draft: CampaignDraft) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::campaign::create_campaign(&api, &draft).await;
            Self::send(&tx, StoreEvent::Campaigns(CampaignEvent::CreateFinished(result)));
        });
    }

    // ── Characters ──────────────────────────────────────────────────────

    pub fn fetch_characters(&self, store: &mut CharacterStore) {
        store.apply(CharacterEvent::FetchStarted);
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::character::list_characters(&api).await;
            Self::send(&tx, StoreEvent::Characters(CharacterEvent::FetchFinished(result)));
        });
    }

    pub fn create_character(&self, payload: CharacterPayload) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::character::create_character(&api, &payload).await;
            Self::send(&tx, StoreEvent::Characters(CharacterEvent::CreateFinished(result)));
        });
    }

    pub fn update_character(&self, id: i64, payload: CharacterPayload) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::character::update_character(&api, id, &payload).await;
            Self::send(&tx, StoreEvent::Characters(CharacterEvent::UpdateFinished(result)));
        });
    }

    // ── Monsters ────────────────────────────────────────────────────────

    pub fn fetch_monsters(&self, store: &mut MonsterStore) {
        store.apply(MonsterEvent::FetchStarted);
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::monster::list_monsters(&api).await;
            Self::send(&tx, StoreEvent::Monsters(MonsterEvent::FetchFinished(result)));
        });
    }

    pub fn create_monster(&self, payload: MonsterPayload) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::monster::create_monster(&api, &payload).await;
            Self::send(&tx, StoreEvent::Monsters(MonsterEvent::CreateFinished(result)));
        });
    }

    pub fn update_monster(&self, id: i64, payload: MonsterPayload) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::monster::update_monster(&api, id, &payload).await;
            Self::send(&tx, StoreEvent::Monsters(MonsterEvent::UpdateFinished(result)));
        });
    }

    /// Available at this layer; no page currently exposes a control.
    pub fn delete_monster(&self, id: i64) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::monster::delete_monster(&api, id).await.map(|()| id);
            Self::send(&tx, StoreEvent::Monsters(MonsterEvent::DeleteFinished(result)));
        });
    }

    // ── Sessions ────────────────────────────────────────────────────────

    pub fn fetch_sessions(&self, store: &mut SessionStore) {
        store.apply(SessionEvent::FetchStarted);
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::session::list_sessions(&api).await;
            Self::send(&tx, StoreEvent::Sessions(SessionEvent::FetchFinished(result)));
        });
    }

    pub fn create_session(&self, payload: SessionPayload) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::session::create_session(&api, &payload).await;
            Self::send(&tx, StoreEvent::Sessions(SessionEvent::CreateFinished(result)));
        });
    }

    pub fn update_session(&self, id: i64, payload: SessionPayload) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::session::update_session(&api, id, &payload).await;
            Self::send(&tx, StoreEvent::Sessions(SessionEvent::UpdateFinished(result)));
        });
    }

    /// Available at this layer; no page currently exposes a control.
    pub fn delete_session(&self, id: i64) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = api::session::delete_session(&api, id).await.map(|()| id);
            Self::send(&tx, StoreEvent::Sessions(SessionEvent::DeleteFinished(result)));
        });
    }

    // ── Dice ────────────────────────────────────────────────────────────

    pub fn roll_dice(&self, store: &mut DiceStore, die: Die, num: u32) {
        store.apply(DiceEvent::RollStarted);
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let outcome = api::dice::roll(&api, die, num).await;
            Self::send(&tx, StoreEvent::Dice(DiceEvent::RollFinished { die, num, outcome }));
        });
    }
}
