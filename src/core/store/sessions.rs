//! Session-note store.

use crate::core::api::session::Session;
use crate::core::api::ApiError;

use super::RequestStatus;

/// In-memory cache of the session-note collection.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<Session>,
    status: RequestStatus,
    error: Option<String>,
}

/// Completion events for session operations.
#[derive(Debug)]
pub enum SessionEvent {
    FetchStarted,
    FetchFinished(Result<Vec<Session>, ApiError>),
    CreateFinished(Result<Session, ApiError>),
    UpdateFinished(Result<Session, ApiError>),
    DeleteFinished(Result<i64, ApiError>),
}

impl SessionStore {
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::FetchStarted => {
                self.status = RequestStatus::Loading;
            }
            SessionEvent::FetchFinished(Ok(sessions)) => {
                self.status = RequestStatus::Succeeded;
                self.error = None;
                self.sessions = sessions;
            }
            SessionEvent::FetchFinished(Err(e)) => {
                self.status = RequestStatus::Failed;
                self.error = Some(e.to_string());
            }
            // New sessions go to the front: the list reads newest-first.
            SessionEvent::CreateFinished(Ok(session)) => {
                self.sessions.insert(0, session);
            }
            SessionEvent::UpdateFinished(Ok(session)) => {
                if let Some(existing) = self.sessions.iter_mut().find(|s| s.id == session.id) {
                    *existing = session;
                }
            }
            SessionEvent::DeleteFinished(Ok(id)) => {
                self.sessions.retain(|s| s.id != id);
            }
            SessionEvent::CreateFinished(Err(_))
            | SessionEvent::UpdateFinished(Err(_))
            | SessionEvent::DeleteFinished(Err(_)) => {}
        }
    }

    pub fn all(&self) -> &[Session] {
        &self.sessions
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::common::fixtures;

    #[test]
    fn test_create_prepends() {
        let mut store = SessionStore::default();
        store.apply(SessionEvent::FetchFinished(Ok(vec![fixtures::session(
            1,
            1,
            "2024-01-05T19:00:00",
        )])));

        store.apply(SessionEvent::CreateFinished(Ok(fixtures::session(
            2,
            1,
            "2024-01-12T19:00:00",
        ))));

        assert_eq!(store.all()[0].id, 2);
        assert_eq!(store.all().len(), 2);
    }

    #[test]
    fn test_update_rewrites_notes_in_place() {
        let mut store = SessionStore::default();
        store.apply(SessionEvent::FetchFinished(Ok(vec![
            fixtures::session(1, 1, "2024-01-05T19:00:00"),
            fixtures::session(2, 1, "2024-01-12T19:00:00"),
        ])));

        let mut edited = fixtures::session(1, 1, "2024-01-05T19:00:00");
        edited.notes = "The party reached Phandalin.".to_string();
        store.apply(SessionEvent::UpdateFinished(Ok(edited)));

        assert_eq!(store.all()[0].notes, "The party reached Phandalin.");
        assert_eq!(store.all()[1].notes, "");
    }

    #[test]
    fn test_delete_removes_by_id() {
        let mut store = SessionStore::default();
        store.apply(SessionEvent::FetchFinished(Ok(vec![
            fixtures::session(1, 1, "2024-01-05T19:00:00"),
            fixtures::session(2, 1, "2024-01-12T19:00:00"),
        ])));

        store.apply(SessionEvent::DeleteFinished(Ok(1)));

        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].id, 2);
    }
}
