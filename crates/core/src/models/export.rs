use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::models::{GameRecord, GameStats};

/// Snapshot written by the admin export action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(serialize_with = "serialize_iso")]
    pub export_date: DateTime<Utc>,
    pub statistics: GameStats,
    pub games: Vec<GameRecord>,
}

impl ExportDocument {
    /// `chess-games-YYYY-MM-DD.json`, dated by the export time.
    pub fn file_name(&self) -> String {
        format!("chess-games-{}.json", self.export_date.format("%Y-%m-%d"))
    }

    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn serialize_iso<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}
