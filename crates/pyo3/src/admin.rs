use std::path::PathBuf;

use pyo3::prelude::*;
use tally_core::config::TallyConfig;
use tally_core::domain::AccessGate;

use crate::db::get_or_create_database;
use crate::to_py_err;

#[pyclass]
pub struct AdminGate {
    gate: AccessGate,
}

#[pymethods]
impl AdminGate {
    #[new]
    #[pyo3(signature = (data_dir, pin = None))]
    fn new(data_dir: String, pin: Option<String>) -> PyResult<Self> {
        let mut config = TallyConfig::from_env(Some(PathBuf::from(data_dir)));
        if let Some(pin) = pin {
            config.admin_pin = pin;
        }

        let db = get_or_create_database(&config.data_dir).map_err(to_py_err)?;

        Ok(Self {
            gate: AccessGate::from_config(db, &config),
        })
    }

    /// Raises PermissionError on a wrong PIN.
    fn unlock(&self, pin: &str) -> PyResult<()> {
        self.gate.unlock(pin).map_err(to_py_err)
    }

    fn lock(&self) -> PyResult<()> {
        self.gate.lock().map_err(to_py_err)
    }

    fn is_authenticated(&self) -> PyResult<bool> {
        self.gate.is_authenticated().map_err(to_py_err)
    }
}
