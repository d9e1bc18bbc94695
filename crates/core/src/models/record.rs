use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Outcome of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Nithin,
    Vishvesh,
    Draw,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nithin => "nithin",
            Self::Vishvesh => "vishvesh",
            Self::Draw => "draw",
        }
    }

    /// Capitalised name used by the admin surface ("Nithin", "Draw").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nithin => "Nithin",
            Self::Vishvesh => "Vishvesh",
            Self::Draw => "Draw",
        }
    }

    /// Upper-cased label used by the dashboard and chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nithin => "NITHIN",
            Self::Vishvesh => "VISHVESH",
            Self::Draw => "DRAW",
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Self::Draw)
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Winner {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nithin" => Ok(Self::Nithin),
            "vishvesh" => Ok(Self::Vishvesh),
            "draw" => Ok(Self::Draw),
            _ => Err(Error::InvalidWinner(s.to_string())),
        }
    }
}

/// A single completed game as persisted in the `chessGames` blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: i64,
    pub date: NaiveDate,
    pub game_number: u32,
    pub winner: Winner,
    /// Older blobs call this `timestamp`. An entry carrying both names is a
    /// duplicate field and fails to deserialize.
    #[serde(alias = "timestamp")]
    pub recorded_at: DateTime<Utc>,
}

impl GameRecord {
    pub(crate) fn new(
        id: i64,
        date: NaiveDate,
        game_number: u32,
        winner: Winner,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            date,
            game_number,
            winner,
            recorded_at,
        }
    }

    /// Key used for every display ordering: date first, then game number.
    pub fn sort_key(&self) -> (NaiveDate, u32) {
        (self.date, self.game_number)
    }
}
