use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use pyo3::prelude::*;

use crate::error::FigureError;

pub const ORIGINAL_DATA_PATH_ENV: &str = "MAM_ORIGINAL_DATA_PATH";
pub const CHU2014_PATH_ENV: &str = "MAM_CHU2014_PATH";
pub const INFOMAP_PATH_ENV: &str = "MAM_INFOMAP_PATH";

/// Locations of external data and tools used by the figure scripts.
///
/// Every path is optional; scripts that need one call the matching
/// `require_*` accessor.
#[pyclass]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FigureConfig {
    /// Original simulation data (see README for download instructions).
    pub original_data_path: Option<PathBuf>,
    /// Experimental spiking data of Chu et al. (2014).
    pub chu2014_path: Option<PathBuf>,
    /// Infomap installation, needed for Fig. 7.
    pub infomap_path: Option<PathBuf>,
}

impl FigureConfig {
    /// Read paths from `MAM_ORIGINAL_DATA_PATH`, `MAM_CHU2014_PATH` and
    /// `MAM_INFOMAP_PATH`. Unset and empty variables leave the path unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var_os(key))
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let path = |key: &str| {
            let value = lookup(key).filter(|v| !is_blank(v))?;
            let path = PathBuf::from(value);
            log::debug!("{key} = {}", path.display());
            Some(path)
        };
        Self {
            original_data_path: path(ORIGINAL_DATA_PATH_ENV),
            chu2014_path: path(CHU2014_PATH_ENV),
            infomap_path: path(INFOMAP_PATH_ENV),
        }
    }

    pub fn original_data(&self) -> Result<&PathBuf, FigureError> {
        Self::required(&self.original_data_path, "original_data_path")
    }

    pub fn chu2014(&self) -> Result<&PathBuf, FigureError> {
        Self::required(&self.chu2014_path, "chu2014_path")
    }

    pub fn infomap(&self) -> Result<&PathBuf, FigureError> {
        Self::required(&self.infomap_path, "infomap_path")
    }

    fn required<'a>(
        path: &'a Option<PathBuf>,
        setting: &str,
    ) -> Result<&'a PathBuf, FigureError> {
        path.as_ref()
            .ok_or_else(|| FigureError::NotConfigured(setting.to_string()))
    }
}

fn is_blank(value: &OsString) -> bool {
    value.is_empty() || value.to_str().is_some_and(|s| s.trim().is_empty())
}

#[pymethods]
impl FigureConfig {
    #[new]
    #[pyo3(signature = (original_data_path=None, chu2014_path=None, infomap_path=None))]
    pub fn new(
        original_data_path: Option<PathBuf>,
        chu2014_path: Option<PathBuf>,
        infomap_path: Option<PathBuf>,
    ) -> Self {
        Self {
            original_data_path,
            chu2014_path,
            infomap_path,
        }
    }

    #[staticmethod]
    #[pyo3(name = "from_env")]
    fn py_from_env() -> Self {
        Self::from_env()
    }

    #[getter(original_data_path)]
    fn get_original_data_path(&self) -> Option<PathBuf> {
        self.original_data_path.clone()
    }

    #[getter(chu2014_path)]
    fn get_chu2014_path(&self) -> Option<PathBuf> {
        self.chu2014_path.clone()
    }

    #[getter(infomap_path)]
    fn get_infomap_path(&self) -> Option<PathBuf> {
        self.infomap_path.clone()
    }

    fn require_original_data_path(&self) -> PyResult<PathBuf> {
        Ok(self.original_data()?.clone())
    }

    fn require_chu2014_path(&self) -> PyResult<PathBuf> {
        Ok(self.chu2014()?.clone())
    }

    fn require_infomap_path(&self) -> PyResult<PathBuf> {
        Ok(self.infomap()?.clone())
    }

    fn __repr__(&self) -> String {
        format!(
            "FigureConfig(original_data_path={:?}, chu2014_path={:?}, infomap_path={:?})",
            self.original_data_path, self.chu2014_path, self.infomap_path
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn default_config_has_nothing_configured() {
        let config = FigureConfig::default();
        assert!(matches!(
            config.original_data(),
            Err(FigureError::NotConfigured(ref s)) if s == "original_data_path"
        ));
        assert!(config.chu2014().is_err());
        assert!(config.infomap().is_err());
    }

    #[test]
    fn reads_paths_from_environment_lookup() {
        let config = FigureConfig::from_lookup(lookup_from(&[
            (ORIGINAL_DATA_PATH_ENV, "/data/schmidt2018"),
            (INFOMAP_PATH_ENV, "/opt/infomap"),
        ]));
        assert_eq!(
            config.original_data().unwrap(),
            &PathBuf::from("/data/schmidt2018")
        );
        assert_eq!(config.infomap().unwrap(), &PathBuf::from("/opt/infomap"));
        assert!(config.chu2014_path.is_none());
    }

    #[test]
    fn empty_environment_values_count_as_unset() {
        let config = FigureConfig::from_lookup(lookup_from(&[
            (ORIGINAL_DATA_PATH_ENV, ""),
            (CHU2014_PATH_ENV, "   "),
        ]));
        assert_eq!(config, FigureConfig::default());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_are_kept_verbatim() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"/data/schm\xffidt".to_vec());
        let expected = PathBuf::from(raw.clone());
        let config = FigureConfig::from_lookup(move |key: &str| {
            (key == INFOMAP_PATH_ENV).then(|| raw.clone())
        });
        assert_eq!(config.infomap().unwrap(), &expected);
    }

    #[test]
    fn python_constructor_and_require_accessors() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let config = FigureConfig::new(Some(PathBuf::from("/data/schmidt2018")), None, None);
            assert_eq!(
                config.require_original_data_path().unwrap(),
                PathBuf::from("/data/schmidt2018")
            );
            assert_eq!(config.get_chu2014_path(), None);

            let err = config.require_infomap_path().unwrap_err();
            assert!(err.is_instance_of::<pyo3::exceptions::PyValueError>(py));
            assert!(err.to_string().contains("infomap_path"));

            assert_eq!(
                config.__repr__(),
                "FigureConfig(original_data_path=Some(\"/data/schmidt2018\"), \
                 chu2014_path=None, infomap_path=None)"
            );
        });
    }
}
