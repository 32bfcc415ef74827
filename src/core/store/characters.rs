//! Character store.

use crate::core::api::character::Character;
use crate::core::api::ApiError;

use super::RequestStatus;

/// In-memory cache of the character collection (all campaigns).
#[derive(Debug, Default)]
pub struct CharacterStore {
    characters: Vec<Character>,
    status: RequestStatus,
    error: Option<String>,
}

/// Completion events for character operations.
#[derive(Debug)]
pub enum CharacterEvent {
    FetchStarted,
    FetchFinished(Result<Vec<Character>, ApiError>),
    CreateFinished(Result<Character, ApiError>),
    UpdateFinished(Result<Character, ApiError>),
}

impl CharacterStore {
    pub fn apply(&mut self, event: CharacterEvent) {
        match event {
            CharacterEvent::FetchStarted => {
                self.status = RequestStatus::Loading;
            }
            CharacterEvent::FetchFinished(Ok(characters)) => {
                self.status = RequestStatus::Succeeded;
                self.error = None;
                self.characters = characters;
            }
            CharacterEvent::FetchFinished(Err(e)) => {
                self.status = RequestStatus::Failed;
                self.error = Some(e.to_string());
            }
            CharacterEvent::CreateFinished(Ok(character)) => {
                self.characters.push(character);
            }
            // Update of an id we do not hold locally is silently dropped.
            CharacterEvent::UpdateFinished(Ok(character)) => {
                if let Some(existing) = self.characters.iter_mut().find(|c| c.id == character.id) {
                    *existing = character;
                }
            }
            CharacterEvent::CreateFinished(Err(_)) | CharacterEvent::UpdateFinished(Err(_)) => {}
        }
    }

    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
