//! Campaign store.
//!
//! Campaigns are create-only from this client: no update or delete
//! operations exist at any layer.

use crate::core::api::campaign::Campaign;
use crate::core::api::ApiError;

use super::RequestStatus;

/// In-memory cache of the campaign collection.
#[derive(Debug, Default)]
pub struct CampaignStore {
    campaigns: Vec<Campaign>,
    status: RequestStatus,
    error: Option<String>,
}

/// Completion events for campaign operations.
///
/// Create failures carry no event for the store: the collection stays
/// untouched and the submitting controller surfaces the error inline.
#[derive(Debug)]
pub enum CampaignEvent {
    FetchStarted,
    FetchFinished(Result<Vec<Campaign>, ApiError>),
    CreateFinished(Result<Campaign, ApiError>),
}

impl CampaignStore {
    pub fn apply(&mut self, event: CampaignEvent) {
        match event {
            CampaignEvent::FetchStarted => {
                self.status = RequestStatus::Loading;
            }
            CampaignEvent::FetchFinished(Ok(campaigns)) => {
                self.status = RequestStatus::Succeeded;
                self.error = None;
                self.campaigns = campaigns;
            }
            CampaignEvent::FetchFinished(Err(e)) => {
                self.status = RequestStatus::Failed;
                self.error = Some(e.to_string());
            }
            CampaignEvent::CreateFinished(Ok(campaign)) => {
                self.campaigns.push(campaign);
            }
            CampaignEvent::CreateFinished(Err(_)) => {}
        }
    }

    pub fn all(&self) -> &[Campaign] {
        &self.campaigns
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
    fn test_fetch_replaces_collection() {
        let mut store = CampaignStore::default();
        store.apply(CampaignEvent::FetchFinished(Ok(vec![fixtures::campaign(
            7,
            "Stale",
        )])));
        assert_eq!(store.all().len(), 1);

        let fresh = vec![fixtures::campaign(1, "Lost Mine")];
        store.apply(CampaignEvent::FetchStarted);
        assert!(store.status().is_loading());
        store.apply(CampaignEvent::FetchFinished(Ok(fresh.clone())));

        assert_eq!(store.all(), fresh.as_slice());
        assert_eq!(store.status(), RequestStatus::Succeeded);
        assert_eq!(store.error(), None);
    }

    #[test]
    fn test_fetch_failure_keeps_collection() {
        let mut store = CampaignStore::default();
        store.apply(CampaignEvent::FetchFinished(Ok(vec![fixtures::campaign(
            1,
            "Lost Mine",
        )])));

        store.apply(CampaignEvent::FetchStarted);
        store.apply(CampaignEvent::FetchFinished(Err(fixtures::server_error(
            "boom",
        ))));

        assert_eq!(store.status(), RequestStatus::Failed);
        assert!(store.error().unwrap().contains("boom"));
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_create_appends_echoed_record() {
        let mut store = CampaignStore::default();
        store.apply(CampaignEvent::FetchFinished(Ok(vec![fixtures::campaign(
            1,
            "Lost Mine",
        )])));

        store.apply(CampaignEvent::CreateFinished(Ok(fixtures::campaign(
            2,
            "Curse of Strahd",
        ))));

        assert_eq!(store.all().len(), 2);
        assert_eq!(store.all()[1].name, "Curse of Strahd");
    }

    #[test]
    fn test_create_failure_leaves_store_unchanged() {
        let mut store = CampaignStore::default();
        store.apply(CampaignEvent::FetchFinished(Ok(vec![fixtures::campaign(
            1,
            "Lost Mine",
        )])));

        store.apply(CampaignEvent::CreateFinished(Err(fixtures::server_error(
            "name required",
        ))));

        assert_eq!(store.all().len(), 1);
        assert_eq!(store.status(), RequestStatus::Succeeded);
        assert_eq!(store.error(), None);
    }

    #[test]
    fn test_overlapping_fetches_last_write_wins() {
        let mut store = CampaignStore::default();
        store.apply(CampaignEvent::FetchStarted);
        store.apply(CampaignEvent::FetchStarted);

        store.apply(CampaignEvent::FetchFinished(Ok(vec![fixtures::campaign(
            1,
            "First",
        )])));
        store.apply(CampaignEvent::FetchFinished(Ok(vec![
            fixtures::campaign(2, "Second"),
            fixtures::campaign(3, "Third"),
        ])));

        let names: Vec<_> = store.all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Second", "Third"]);
    }
}
