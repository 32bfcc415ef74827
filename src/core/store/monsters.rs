//! Monster store.
//!
//! `delete` exists here (and at the endpoint layer) even though no page
//! currently wires it to a control.

use crate::core::api::monster::Monster;
use crate::core::api::ApiError;

use super::RequestStatus;

/// In-memory cache of the monster encyclopedia.
#[derive(Debug, Default)]
pub struct MonsterStore {
    monsters: Vec<Monster>,
    status: RequestStatus,
    error: Option<String>,
}

/// Completion events for monster operations.
#[derive(Debug)]
pub enum MonsterEvent {
    FetchStarted,
    FetchFinished(Result<Vec<Monster>, ApiError>),
    CreateFinished(Result<Monster, ApiError>),
    UpdateFinished(Result<Monster, ApiError>),
    /// Carries the deleted id; the service answers 204 with no body.
    DeleteFinished(Result<i64, ApiError>),
}

impl MonsterStore {
    pub fn apply(&mut self, event: MonsterEvent) {
        match event {
            MonsterEvent::FetchStarted => {
                self.status = RequestStatus::Loading;
            }
            MonsterEvent::FetchFinished(Ok(monsters)) => {
                self.status = RequestStatus::Succeeded;
                self.error = None;
                self.monsters = monsters;
            }
            MonsterEvent::FetchFinished(Err(e)) => {
                self.status = RequestStatus::Failed;
                self.error = Some(e.to_string());
            }
            MonsterEvent::CreateFinished(Ok(monster)) => {
                self.monsters.push(monster);
            }
            MonsterEvent::UpdateFinished(Ok(monster)) => {
                if let Some(existing) = self.monsters.iter_mut().find(|m| m.id == monster.id) {
                    *existing = monster;
                }
            }
            MonsterEvent::DeleteFinished(Ok(id)) => {
                self.monsters.retain(|m| m.id != id);
            }
            MonsterEvent::CreateFinished(Err(_))
            | MonsterEvent::UpdateFinished(Err(_))
            | MonsterEvent::DeleteFinished(Err(_)) => {}
        }
    }

    pub fn all(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
