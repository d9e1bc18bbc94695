use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::config::GAMES_STORAGE_KEY;
use crate::db::{Database, StorageDao};
use crate::domain::statistics;
use crate::error::{Error, Result};
use crate::models::{ExportDocument, GameRecord, GameStats, PerformanceSeries, Winner};
use crate::utils::time::{next_record_id, parse_game_date};

/// Owner of the game collection and the only writer of its storage key.
///
/// Every mutation rewrites the whole collection. There is no merge with
/// writes made by another process since this store was loaded; the last
/// writer wins.
#[derive(Debug)]
pub struct RecordStore {
    storage: StorageDao,
    games: Vec<GameRecord>,
}

impl RecordStore {
    /// Load the collection from local storage.
    ///
    /// A missing or malformed blob yields an empty store. Storage failures
    /// are still returned.
    pub fn load(db: Arc<Database>) -> Result<Self> {
        let storage = StorageDao::local(db);
        let games = match storage.get_item(GAMES_STORAGE_KEY)? {
            Some(raw) => decode_games(&raw),
            None => Vec::new(),
        };

        tracing::debug!(count = games.len(), "loaded game records");

        Ok(Self { storage, games })
    }

    /// Raw collection in stored order.
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Record a finished game and persist the collection.
    pub fn add(&mut self, date: NaiveDate, game_number: u32, winner: Winner) -> Result<GameRecord> {
        self.add_at(date, game_number, winner, Utc::now())
    }

    pub fn add_at(
        &mut self,
        date: NaiveDate,
        game_number: u32,
        winner: Winner,
        now: DateTime<Utc>,
    ) -> Result<GameRecord> {
        if game_number == 0 {
            return Err(Error::InvalidInput(
                "Game number must be a positive integer".into(),
            ));
        }

        let current_max = self.games.iter().map(|game| game.id).max();
        let record = GameRecord::new(
            next_record_id(now, current_max)?,
            date,
            game_number,
            winner,
            now,
        );

        self.games.push(record.clone());
        if let Err(e) = self.persist() {
            self.games.pop();
            return Err(e);
        }

        tracing::info!(
            id = record.id,
            date = %record.date,
            game_number = record.game_number,
            winner = %record.winner,
            "game added"
        );

        Ok(record)
    }

    /// Validate raw form fields, then [`add`](Self::add).
    ///
    /// All three fields must be present. Nothing is stored if any of them
    /// fails to parse.
    pub fn add_from_input(
        &mut self,
        date: &str,
        game_number: &str,
        winner: &str,
    ) -> Result<GameRecord> {
        if [date, game_number, winner]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(Error::InvalidInput("Please fill all fields".into()));
        }

        let date = parse_game_date(date)?;
        let game_number = game_number
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Game number must be a positive integer, got '{}'",
                    game_number.trim()
                ))
            })?;
        let winner = winner.parse::<Winner>()?;

        self.add(date, game_number, winner)
    }

    /// Remove the game with `id`. Returns whether a game was removed; an
    /// unknown id leaves both memory and storage untouched.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let Some(index) = self.games.iter().position(|game| game.id == id) else {
            tracing::debug!(id, "delete ignored, no such game");
            return Ok(false);
        };

        let removed = self.games.remove(index);
        if let Err(e) = self.persist() {
            self.games.insert(index, removed);
            return Err(e);
        }

        tracing::info!(id, "game deleted");
        Ok(true)
    }

    /// Drop every game and persist the empty collection.
    pub fn clear(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.games);
        if let Err(e) = self.persist() {
            self.games = previous;
            return Err(e);
        }

        tracing::info!(removed = previous.len(), "all games cleared");
        Ok(())
    }

    pub fn stats(&self) -> GameStats {
        statistics::compute_stats(&self.games)
    }

    pub fn recent_games(&self, limit: usize) -> Vec<GameRecord> {
        statistics::recent_games(&self.games, limit)
    }

    /// Every game, newest first.
    pub fn all_games_sorted(&self) -> Vec<GameRecord> {
        statistics::sorted_newest_first(&self.games)
    }

    pub fn performance_series(&self) -> PerformanceSeries {
        statistics::performance_series(&self.games)
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        ExportDocument {
            export_date: now,
            statistics: self.stats(),
            games: self.games.clone(),
        }
    }

    fn persist(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.games)?;
        self.storage.set_item(GAMES_STORAGE_KEY, &blob)?;
        Ok(())
    }
}

/// Decode the stored blob, keeping every entry that parses.
fn decode_games(raw: &str) -> Vec<GameRecord> {
    let entries = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "stored games are not a JSON array, starting empty");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(game) => Some(game),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping unreadable game record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn setup_store() -> (Arc<Database>, RecordStore) {
        let db = Arc::new(Database::in_memory().unwrap());
        let store = RecordStore::load(Arc::clone(&db)).unwrap();
        (db, store)
    }

    fn stored_blob(db: &Arc<Database>) -> Option<String> {
        StorageDao::local(Arc::clone(db))
            .get_item(GAMES_STORAGE_KEY)
            .unwrap()
    }

    #[test]
    fn test_three_game_scenario() {
        let (_db, mut store) = setup_store();

        store.add(date("2024-01-01"), 1, Winner::Nithin).unwrap();
        store.add(date("2024-01-02"), 1, Winner::Vishvesh).unwrap();
        store.add(date("2024-01-02"), 2, Winner::Draw).unwrap();

        assert_eq!(
            store.stats(),
            GameStats {
                total: 3,
                nithin: 1,
                vishvesh: 1,
                draws: 1,
            }
        );

        let recent = store.recent_games(2);
        assert_eq!(recent.len(), 2);
        assert_eq!((recent[0].date, recent[0].game_number), (date("2024-01-02"), 2));
        assert_eq!((recent[1].date, recent[1].game_number), (date("2024-01-02"), 1));
    }

    #[test]
    fn test_reload_round_trip() {
        let (db, mut store) = setup_store();

        store.add(date("2024-03-01"), 2, Winner::Vishvesh).unwrap();
        store.add(date("2024-02-01"), 1, Winner::Nithin).unwrap();
        store.add(date("2024-03-01"), 1, Winner::Draw).unwrap();

        let reloaded = RecordStore::load(db).unwrap();
        assert_eq!(reloaded.games(), store.games());
    }

    #[test]
    fn test_total_tracks_adds_minus_deletes() {
        let (_db, mut store) = setup_store();

        let first = store.add(date("2024-01-01"), 1, Winner::Nithin).unwrap();
        store.add(date("2024-01-01"), 2, Winner::Nithin).unwrap();
        store.add(date("2024-01-01"), 3, Winner::Draw).unwrap();

        assert!(store.delete(first.id).unwrap());
        assert!(!store.delete(first.id).unwrap());
        assert!(!store.delete(42).unwrap());

        let stats = store.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.nithin + stats.vishvesh + stats.draws, stats.total);
    }

    #[test]
    fn test_ids_unique_within_same_instant() {
        let (_db, mut store) = setup_store();
        let now = Utc::now();

        let a = store.add_at(date("2024-01-01"), 1, Winner::Nithin, now).unwrap();
        let b = store.add_at(date("2024-01-01"), 2, Winner::Nithin, now).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(b.id, a.id + 1);
    }

    #[test]
    fn test_delete_missing_id_leaves_storage_untouched() {
        let (db, mut store) = setup_store();
        store.add(date("2024-01-01"), 1, Winner::Nithin).unwrap();
        let before = stored_blob(&db);

        assert!(!store.delete(-1).unwrap());

        assert_eq!(store.len(), 1);
        assert_eq!(stored_blob(&db), before);
    }

    #[test]
    fn test_clear_persists_empty_collection() {
        let (db, mut store) = setup_store();
        store.add(date("2024-01-01"), 1, Winner::Nithin).unwrap();
        store.add(date("2024-01-02"), 1, Winner::Vishvesh).unwrap();

        store.clear().unwrap();

        assert_eq!(store.stats().total, 0);
        assert_eq!(stored_blob(&db).as_deref(), Some("[]"));
        assert!(RecordStore::load(db).unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_zero_game_number() {
        let (db, mut store) = setup_store();

        let err = store.add(date("2024-01-01"), 0, Winner::Draw).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(store.is_empty());
        assert_eq!(stored_blob(&db), None);
    }

    #[test]
    fn test_add_from_input() {
        let (_db, mut store) = setup_store();

        let game = store.add_from_input("2024-05-04", "3", "Vishvesh").unwrap();
        assert_eq!(game.date, date("2024-05-04"));
        assert_eq!(game.game_number, 3);
        assert_eq!(game.winner, Winner::Vishvesh);
    }

    #[test]
    fn test_add_from_input_validation() {
        let (db, mut store) = setup_store();

        let missing = store.add_from_input("2024-05-04", "", "draw").unwrap_err();
        assert_eq!(missing.to_string(), "Invalid input: Please fill all fields");

        let bad_winner = store.add_from_input("2024-05-04", "1", "carlsen").unwrap_err();
        assert!(matches!(bad_winner, Error::InvalidWinner(_)));

        let bad_number = store.add_from_input("2024-05-04", "-2", "draw").unwrap_err();
        assert!(matches!(bad_number, Error::InvalidInput(_)));

        let bad_date = store.add_from_input("yesterday", "1", "draw").unwrap_err();
        assert!(bad_date.is_user_error());

        assert!(store.is_empty());
        assert_eq!(stored_blob(&db), None);
    }

    #[test]
    fn test_load_malformed_blob_is_empty() {
        let db = Arc::new(Database::in_memory().unwrap());
        StorageDao::local(Arc::clone(&db))
            .set_item(GAMES_STORAGE_KEY, "{not json")
            .unwrap();

        let store = RecordStore::load(db).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_skips_unreadable_entries() {
        let db = Arc::new(Database::in_memory().unwrap());
        let blob = r#"[
            {"id": 1, "date": "2024-01-01", "gameNumber": 1, "winner": "nithin",
             "timestamp": "2024-01-01T10:00:00.000Z"},
            {"id": 2, "date": "2024-01-01", "gameNumber": 2, "winner": "magnus",
             "recordedAt": "2024-01-01T11:00:00.000Z"},
            {"id": 3, "date": "2024-01-01", "gameNumber": 3, "winner": "draw",
             "recordedAt": "2024-01-01T12:00:00.000Z"}
        ]"#;
        StorageDao::local(Arc::clone(&db))
            .set_item(GAMES_STORAGE_KEY, blob)
            .unwrap();

        let store = RecordStore::load(db).unwrap();
        let ids: Vec<i64> = store.games().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_entry_with_both_time_fields_is_skipped() {
        let db = Arc::new(Database::in_memory().unwrap());
        let blob = r#"[
            {"id": 1, "date": "2024-01-01", "gameNumber": 1, "winner": "nithin",
             "recordedAt": "2024-01-01T10:00:00.000Z",
             "timestamp": "2024-01-01T10:00:00.000Z"},
            {"id": 2, "date": "2024-01-01", "gameNumber": 2, "winner": "draw",
             "recordedAt": "2024-01-01T11:00:00.000Z"}
        ]"#;
        StorageDao::local(Arc::clone(&db))
            .set_item(GAMES_STORAGE_KEY, blob)
            .unwrap();

        let store = RecordStore::load(db).unwrap();
        let ids: Vec<i64> = store.games().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_add_after_largest_possible_id_fails() {
        let db = Arc::new(Database::in_memory().unwrap());
        let blob = r#"[
            {"id": 9223372036854775807, "date": "2024-01-01", "gameNumber": 1,
             "winner": "nithin", "recordedAt": "2024-01-01T10:00:00.000Z"}
        ]"#;
        StorageDao::local(Arc::clone(&db))
            .set_item(GAMES_STORAGE_KEY, blob)
            .unwrap();

        let mut store = RecordStore::load(Arc::clone(&db)).unwrap();
        assert_eq!(store.games()[0].id, i64::MAX);

        let err = store.add(date("2024-01-02"), 1, Winner::Draw).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(stored_blob(&db).as_deref(), Some(blob));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let (db, mut store) = setup_store();
        let kept = store.add(date("2024-01-01"), 1, Winner::Nithin).unwrap();

        db.with_connection(|conn| {
            conn.execute_batch("DROP TABLE local_storage")?;
            Ok(())
        })
        .unwrap();

        let err = store.add(date("2024-01-02"), 1, Winner::Draw).unwrap_err();
        assert!(matches!(err, Error::Database(_)));
        assert_eq!(store.games(), std::slice::from_ref(&kept));

        assert!(store.delete(kept.id).is_err());
        assert_eq!(store.len(), 1);

        assert!(store.clear().is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_export_snapshot() {
        let (_db, mut store) = setup_store();
        store.add(date("2024-01-01"), 1, Winner::Nithin).unwrap();

        let now: DateTime<Utc> = "2024-06-01T08:30:00Z".parse().unwrap();
        let doc = store.export(now);

        assert_eq!(doc.file_name(), "chess-games-2024-06-01.json");
        assert_eq!(doc.statistics.total, 1);

        let value: Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(value["exportDate"], "2024-06-01T08:30:00.000Z");
        assert_eq!(value["statistics"]["nithin"], 1);
        assert_eq!(value["games"].as_array().unwrap().len(), 1);
    }
}
