use pyo3::prelude::*;
use pyo3::types::{PyDict, PyModule};

pub mod config;
pub mod error;
pub mod gradient;
pub mod line_width;
pub mod population;
pub mod schema;

pub use config::FigureConfig;
pub use error::FigureError;
pub use gradient::{gradient_frame, structural_gradient, StructuralGradient};
pub use line_width::{write_line_widths, PairCountMap, PairCounts};
pub use population::{area_population_list, Polarity, PopulationId, PopulationPair};

/// Word-form of a layer code used in TeX macro names, e.g. "23" → "twothree".
#[pyfunction]
#[pyo3(name = "tex_name")]
fn py_tex_name(area_code: &str) -> PyResult<&'static str> {
    Ok(schema::tex_name(area_code)?)
}

/// Export naming tables and constants as Python submodules
fn add_schema_exports(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Naming
    let naming = PyModule::new(m.py(), "naming")?;
    naming.add("POPULATION_LABELS", schema::naming::POPULATION_LABELS.to_vec())?;
    let tex_names = PyDict::new(m.py());
    for (code, name) in schema::naming::TEX_NAMES {
        tex_names.set_item(code, name)?;
    }
    naming.add("TEX_NAMES", tex_names)?;
    m.add_submodule(&naming)?;

    // Gradient
    let gradient = PyModule::new(m.py(), "gradient")?;
    gradient.add("SAME_AREA", schema::gradient::SAME_AREA)?;
    gradient.add("HL", schema::gradient::HIGH_TO_LOW)?;
    gradient.add("LH", schema::gradient::LOW_TO_HIGH)?;
    gradient.add("HZ", schema::gradient::HORIZONTAL)?;
    gradient.add("TARGET_AREA", schema::gradient_table::TARGET_AREA)?;
    gradient.add("SOURCE_AREA", schema::gradient_table::SOURCE_AREA)?;
    gradient.add("GRADIENT", schema::gradient_table::GRADIENT)?;
    m.add_submodule(&gradient)?;

    // Line width
    let line_width = PyModule::new(m.py(), "line_width")?;
    line_width.add("MAX_LINE_WIDTH", schema::line_width::MAX_LINE_WIDTH)?;
    line_width.add("MEAN", schema::line_width::MEAN)?;
    line_width.add("SIGMA", schema::line_width::SIGMA)?;
    line_width.add(
        "TARGET_POPULATION",
        schema::pair_counts::TARGET_POPULATION,
    )?;
    line_width.add(
        "SOURCE_POPULATION",
        schema::pair_counts::SOURCE_POPULATION,
    )?;
    line_width.add("COUNT", schema::pair_counts::COUNT)?;
    line_width.add("MEAN_COLUMN", schema::pair_counts::MEAN)?;
    line_width.add("SIGMA_COLUMN", schema::pair_counts::SIGMA)?;
    m.add_submodule(&line_width)?;

    Ok(())
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<FigureConfig>()?;
    m.add_function(wrap_pyfunction!(gradient::py_structural_gradient, m)?)?;
    m.add_function(wrap_pyfunction!(gradient::structural_gradient_frame, m)?)?;
    m.add_function(wrap_pyfunction!(line_width::write_out_lw, m)?)?;
    m.add_function(wrap_pyfunction!(line_width::py_write_line_widths, m)?)?;
    m.add_function(wrap_pyfunction!(line_width::write_line_widths_with_sigma, m)?)?;
    m.add_function(wrap_pyfunction!(line_width::write_line_widths_frame, m)?)?;
    m.add_function(wrap_pyfunction!(population::py_area_population_list, m)?)?;
    m.add_function(wrap_pyfunction!(py_tex_name, m)?)?;
    add_schema_exports(m)?;
    Ok(())
}
