//! ScoreTracker - PyO3 class over the record store
//!
//! Records and statistics are handed to Python as plain dicts so the UI
//! layer never depends on Rust types.

use chrono::Utc;
use parking_lot::Mutex;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use tally_core::config::DEFAULT_RECENT_LIMIT;
use tally_core::domain::RecordStore;
use tally_core::models::{GameRecord, GameStats};

use crate::db::get_or_create_database;
use crate::to_py_err;

#[pyclass]
pub struct ScoreTracker {
    store: Mutex<RecordStore>,
}

#[pymethods]
impl ScoreTracker {
    #[new]
    fn new(data_dir: &str) -> PyResult<Self> {
        let db = get_or_create_database(data_dir).map_err(to_py_err)?;
        let store = RecordStore::load(db).map_err(to_py_err)?;

        Ok(Self {
            store: Mutex::new(store),
        })
    }

    /// Add a game from form values. Raises ValueError on missing or invalid fields.
    fn add_game<'py>(
        &self,
        py: Python<'py>,
        date: &str,
        game_number: &str,
        winner: &str,
    ) -> PyResult<Bound<'py, PyDict>> {
        let game = self
            .store
            .lock()
            .add_from_input(date, game_number, winner)
            .map_err(to_py_err)?;

        record_to_dict(py, &game)
    }

    /// Returns True when a game was removed.
    fn delete_game(&self, id: i64) -> PyResult<bool> {
        self.store.lock().delete(id).map_err(to_py_err)
    }

    fn clear(&self) -> PyResult<()> {
        self.store.lock().clear().map_err(to_py_err)
    }

    fn stats<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        stats_to_dict(py, &self.store.lock().stats())
    }

    #[pyo3(signature = (limit = DEFAULT_RECENT_LIMIT))]
    fn recent_games<'py>(&self, py: Python<'py>, limit: usize) -> PyResult<Vec<Bound<'py, PyDict>>> {
        self.store
            .lock()
            .recent_games(limit)
            .iter()
            .map(|game| record_to_dict(py, game))
            .collect()
    }

    fn all_games<'py>(&self, py: Python<'py>) -> PyResult<Vec<Bound<'py, PyDict>>> {
        self.store
            .lock()
            .all_games_sorted()
            .iter()
            .map(|game| record_to_dict(py, game))
            .collect()
    }

    fn performance_series<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let series = self.store.lock().performance_series();

        let dict = PyDict::new(py);
        dict.set_item("labels", series.labels)?;
        dict.set_item("nithin", series.nithin)?;
        dict.set_item("vishvesh", series.vishvesh)?;
        Ok(dict)
    }

    /// Returns `(file_name, json)` for a download of the whole collection.
    fn export_json(&self) -> PyResult<(String, String)> {
        let doc = self.store.lock().export(Utc::now());
        let json = doc.to_json_pretty().map_err(to_py_err)?;
        Ok((doc.file_name(), json))
    }

    fn __len__(&self) -> usize {
        self.store.lock().len()
    }
}

fn record_to_dict<'py>(py: Python<'py>, game: &GameRecord) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("id", game.id)?;
    dict.set_item("date", game.date.to_string())?;
    dict.set_item("game_number", game.game_number)?;
    dict.set_item("winner", game.winner.as_str())?;
    dict.set_item("winner_name", game.winner.display_name())?;
    dict.set_item("recorded_at", game.recorded_at.to_rfc3339())?;
    Ok(dict)
}

fn stats_to_dict<'py>(py: Python<'py>, stats: &GameStats) -> PyResult<Bound<'py, PyDict>> {
    let rates = stats.win_rates();

    let dict = PyDict::new(py);
    dict.set_item("total", stats.total)?;
    dict.set_item("nithin", stats.nithin)?;
    dict.set_item("vishvesh", stats.vishvesh)?;
    dict.set_item("draws", stats.draws)?;
    dict.set_item("nithin_rate", rates.nithin)?;
    dict.set_item("vishvesh_rate", rates.vishvesh)?;
    Ok(dict)
}
