mod admin;
mod db;
mod tracker;

pub use admin::AdminGate;
use pyo3::exceptions::{PyException, PyPermissionError, PyValueError};
use pyo3::prelude::*;
use pyo3_stub_gen::define_stub_info_gatherer;
use pyo3_stub_gen::derive::gen_stub_pyfunction;
use tally_core::error::Error as CoreError;
pub use tracker::ScoreTracker;

/// Convert core errors to Python exceptions
pub(crate) fn to_py_err(err: CoreError) -> PyErr {
    match err {
        CoreError::AccessDenied | CoreError::SessionRequired => {
            PyPermissionError::new_err(err.to_string())
        }
        ref e if e.is_user_error() => PyValueError::new_err(err.to_string()),
        _ => PyException::new_err(err.to_string()),
    }
}

#[gen_stub_pyfunction]
#[pyfunction]
fn clear_db_cache() {
    db::clear_cache();
}

#[pymodule]
fn tally_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ScoreTracker>()?;
    m.add_class::<AdminGate>()?;
    m.add_function(wrap_pyfunction!(clear_db_cache, m)?)?;

    Ok(())
}

define_stub_info_gatherer!(stub_info);
