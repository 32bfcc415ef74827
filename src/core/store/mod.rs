//! Domain stores: in-memory, normalized caches of the server's entity
//! collections.
//!
//! Each store owns one collection plus a request-status flag and the
//! last error. Stores are plain state machines driven by `apply`:
//! network effects run as spawned tasks and their completions re-enter
//! the store through the event loop, in arrival order. Overlapping
//! requests of the same kind are not deduplicated — the last completion
//! to arrive wins the whole collection.

use serde::{Deserialize, Serialize};

pub mod campaigns;
pub mod characters;
pub mod dice;
pub mod monsters;
pub mod selectors;
pub mod sessions;

pub use campaigns::{CampaignEvent, CampaignStore};
pub use characters::{CharacterEvent, CharacterStore};
pub use dice::{DiceEvent, DiceStore, RollRecord, MAX_ROLL_HISTORY};
pub use monsters::{MonsterEvent, MonsterStore};
pub use sessions::{SessionEvent, SessionStore};

// ============================================================================
// Request Status
// ============================================================================

/// Lifecycle of a store's most recent fetch.
///
/// `Idle -> Loading -> {Succeeded | Failed}`, re-entering `Loading` on
/// the next fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn is_idle(self) -> bool {
        self == RequestStatus::Idle
    }

    pub fn is_loading(self) -> bool {
        self == RequestStatus::Loading
    }
}

// ============================================================================
// Store Aggregate
// ============================================================================

/// All domain stores, one per entity collection.
///
/// Constructed fresh (no process-wide singletons) so tests can inject a
/// store instance with a known initial state.
#[derive(Debug, Default)]
pub struct Stores {
    pub campaigns: CampaignStore,
    pub characters: CharacterStore,
    pub monsters: MonsterStore,
    pub sessions: SessionStore,
    pub dice: DiceStore,
}

/// A completion (or start) event addressed to one store.
#[derive(Debug)]
pub enum StoreEvent {
    Campaigns(CampaignEvent),
    Characters(CharacterEvent),
    Monsters(MonsterEvent),
    Sessions(SessionEvent),
    Dice(DiceEvent),
}

impl Stores {
    /// Route an event to its store. Events mutate only the store they
    /// address; atomicity is "apply the whole decoded response or
    /// apply nothing".
    pub fn apply(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Campaigns(e) => self.campaigns.apply(e),
            StoreEvent::Characters(e) => self.characters.apply(e),
            StoreEvent::Monsters(e) => self.monsters.apply(e),
            StoreEvent::Sessions(e) => self.sessions.apply(e),
            StoreEvent::Dice(e) => self.dice.apply(e),
        }
    }
}
