use pyo3::exceptions::{
    PyKeyError, PyOSError, PyRuntimeError, PyValueError, PyZeroDivisionError,
};
use pyo3::PyErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FigureError {
    #[error("Key not found in {table}: {key}")]
    Lookup { table: &'static str, key: String },

    #[error("Cannot scale line widths: {0}")]
    DegenerateScale(String),

    #[error("Invalid population label: {0}")]
    InvalidPopulation(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    General(String),
}

impl FigureError {
    pub(crate) fn lookup(table: &'static str, key: impl Into<String>) -> Self {
        FigureError::Lookup {
            table,
            key: key.into(),
        }
    }
}

impl From<FigureError> for PyErr {
    fn from(err: FigureError) -> PyErr {
        let msg = err.to_string();
        match err {
            FigureError::Lookup { .. } => PyKeyError::new_err(msg),
            FigureError::DegenerateScale(_) => PyZeroDivisionError::new_err(msg),
            FigureError::InvalidPopulation(_)
            | FigureError::NotConfigured(_)
            | FigureError::MissingColumn(_) => PyValueError::new_err(msg),
            FigureError::Io(_) => PyOSError::new_err(msg),
            _ => PyRuntimeError::new_err(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_message_names_table_and_key() {
        let err = FigureError::lookup("arch_types", "V4t");
        assert_eq!(err.to_string(), "Key not found in arch_types: V4t");
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn open_missing() -> Result<std::fs::File, FigureError> {
            Ok(std::fs::File::open("/nonexistent/dir/for/sure/lw.txt")?)
        }
        assert!(matches!(open_missing(), Err(FigureError::Io(_))));
    }
}
