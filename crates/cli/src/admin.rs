use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tally_core::domain::{AccessGate, RecordStore};
use tally_core::error::{Error, Result};

/// Admin surface: record maintenance behind the PIN gate.
pub struct AdminPanel {
    store: RecordStore,
    gate: AccessGate,
}

impl AdminPanel {
    pub fn new(store: RecordStore, gate: AccessGate) -> Self {
        Self { store, gate }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn login(&self, pin: &str) -> Result<String> {
        self.gate.unlock(pin)?;
        Ok(format!(
            "Admin panel unlocked for {} minutes",
            self.gate.expiry().num_minutes()
        ))
    }

    pub fn logout(&self) -> Result<String> {
        self.gate.lock()?;
        Ok("Logged out".to_string())
    }

    pub fn add(&mut self, date: &str, game_number: &str, winner: &str) -> Result<String> {
        self.gate.require()?;

        let game = self.store.add_from_input(date, game_number, winner)?;
        Ok(format!(
            "Game added successfully! Winner: {}",
            game.winner.display_name()
        ))
    }

    pub fn delete(&mut self, id: i64) -> Result<String> {
        self.gate.require()?;

        if self.store.delete(id)? {
            Ok("Game deleted successfully".to_string())
        } else {
            Ok(format!("No game with id {}", id))
        }
    }

    pub fn stats(&self) -> Result<String> {
        self.gate.require()?;

        let stats = self.store.stats();
        Ok(format!(
            "Total games: {}\nNithin wins: {}\nVishvesh wins: {}\nDraws: {}\n",
            stats.total, stats.nithin, stats.vishvesh, stats.draws
        ))
    }

    /// Every game, newest first, with the id needed for `delete`.
    pub fn list(&self) -> Result<String> {
        self.gate.require()?;

        let games = self.store.all_games_sorted();
        if games.is_empty() {
            return Ok("No games recorded yet.\n".to_string());
        }

        let mut out = String::new();
        for game in games {
            let _ = writeln!(
                out,
                "{:>15}  {}  Game #{:<3} {}",
                game.id,
                game.date.format("%Y-%m-%d"),
                game.game_number,
                game.winner.display_name()
            );
        }
        Ok(out)
    }

    /// Write the export document into `out`, or into `dir` under its
    /// default file name. Returns the path written.
    pub fn export(&self, out: Option<&Path>, dir: &Path) -> Result<(PathBuf, String)> {
        self.gate.require()?;

        let doc = self.store.export(Utc::now());
        let path = match out {
            Some(path) => path.to_path_buf(),
            None => dir.join(doc.file_name()),
        };

        std::fs::write(&path, doc.to_json_pretty()?)?;
        tracing::info!(path = %path.display(), games = doc.games.len(), "exported games");

        Ok((path, "Data exported successfully!".to_string()))
    }

    pub fn clear(&mut self, confirmed: bool) -> Result<String> {
        self.gate.require()?;

        if !confirmed {
            return Err(Error::InvalidInput(
                "Deleting all game data cannot be undone, pass --yes to confirm".into(),
            ));
        }

        self.store.clear()?;
        Ok("All data has been cleared".to_string())
    }
}
