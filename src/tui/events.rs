//! Events flowing through the Elm-architecture event loop.

use crate::core::api::{ApiError, Health};
use crate::core::store::StoreEvent;

/// Everything the main loop can wake up on.
#[derive(Debug)]
pub enum AppEvent {
    /// Raw terminal input (keyboard/resize).
    Input(crossterm::event::Event),
    /// A network effect completed (or started) for one store.
    Store(StoreEvent),
    /// Startup liveness probe result.
    Health(Result<Health, ApiError>),
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FocusCampaigns,
    FocusCharacters,
    FocusMonsters,
    FocusSessions,
    FocusDice,
    TabNext,
    TabPrev,
    ShowHelp,
    CloseHelp,
    Quit,
}

/// Which page has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Campaigns,
    Characters,
    Monsters,
    Sessions,
    Dice,
}

impl Focus {
    pub const ALL: [Focus; 5] = [
        Focus::Campaigns,
        Focus::Characters,
        Focus::Monsters,
        Focus::Sessions,
        Focus::Dice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Campaigns => "Campaigns",
            Focus::Characters => "Characters",
            Focus::Monsters => "Monsters",
            Focus::Sessions => "Sessions",
            Focus::Dice => "Dice Roller",
        }
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
    }

    pub fn to_action(self) -> Action {
        match self {
            Focus::Campaigns => Action::FocusCampaigns,
            Focus::Characters => Action::FocusCharacters,
            Focus::Monsters => Action::FocusMonsters,
            Focus::Sessions => Action::FocusSessions,
            Focus::Dice => Action::FocusDice,
        }
    }
}

/// Reachability of the campaign service, shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Connected,
    Unreachable,
}

impl BackendStatus {
    pub fn label(self) -> &'static str {
        match self {
            BackendStatus::Unknown => "connecting…",
            BackendStatus::Connected => "online",
            BackendStatus::Unreachable => "offline",
        }
    }
}
