//! Dice-roll wire types and the `/roll` endpoint call.
//!
//! Notation interpretation lives server-side; the client only assembles
//! `<count>d<sides>` strings from a typed die selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

/// The seven standard polyhedral dice the roller offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Die {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl Die {
    pub const ALL: [Die; 7] = [
        Die::D4,
        Die::D6,
        Die::D8,
        Die::D10,
        Die::D12,
        Die::D20,
        Die::D100,
    ];

    pub fn sides(self) -> u32 {
        match self {
            Die::D4 => 4,
            Die::D6 => 6,
            Die::D8 => 8,
            Die::D10 => 10,
            Die::D12 => 12,
            Die::D20 => 20,
            Die::D100 => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Die::D4 => "d4",
            Die::D6 => "d6",
            Die::D8 => "d8",
            Die::D10 => "d10",
            Die::D12 => "d12",
            Die::D20 => "d20",
            Die::D100 => "d100",
        }
    }

    /// Combined notation for a batch roll, e.g. `(D20, 2)` -> `"2d20"`.
    pub fn notation(self, num: u32) -> String {
        format!("{num}d{}", self.sides())
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Die {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Die::ALL
            .iter()
            .copied()
            .find(|d| d.label() == s)
            .ok_or_else(|| format!("unknown die: {s}"))
    }
}

/// Body for `POST /roll`.
#[derive(Debug, Serialize)]
struct RollRequest {
    dice: String,
}

/// Server-computed roll: one entry per die plus the sum.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RollOutcome {
    pub rolls: Vec<i64>,
    pub total: i64,
}

pub async fn roll(api: &ApiClient, die: Die, num: u32) -> Result<RollOutcome, ApiError> {
    let request = RollRequest {
        dice: die.notation(num),
    };
    api.post("/roll", &request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notation() {
        assert_eq!(Die::D20.notation(2), "2d20");
        assert_eq!(Die::D100.notation(1), "1d100");
    }

    #[test]
    fn test_label_roundtrip() {
        for die in Die::ALL {
            assert_eq!(die.label().parse::<Die>(), Ok(die));
        }
    }

    #[test]
    fn test_unknown_die_rejected() {
        assert!("d7".parse::<Die>().is_err());
    }
}
