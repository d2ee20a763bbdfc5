use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use polars::prelude::*;
use pyo3::prelude::*;
use pyo3_polars::PyDataFrame;

use crate::error::FigureError;
use crate::schema::{gradient, gradient_table};

/// Structural gradient of a projection between two areas.
///
/// See Schmidt, M., Bakker, R., Hilgetag, C.C. et al., Brain Structure and
/// Function (2018), 223:1409, for the definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralGradient {
    /// Source and target are the same area.
    SameArea,
    /// Target architectural type is lower than the source's.
    HighToLow,
    /// Target architectural type is higher than the source's.
    LowToHigh,
    /// Different areas of equal architectural type.
    Horizontal,
}

impl StructuralGradient {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameArea => gradient::SAME_AREA,
            Self::HighToLow => gradient::HIGH_TO_LOW,
            Self::LowToHigh => gradient::LOW_TO_HIGH,
            Self::Horizontal => gradient::HORIZONTAL,
        }
    }
}

impl fmt::Display for StructuralGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructuralGradient {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            gradient::SAME_AREA => Ok(Self::SameArea),
            gradient::HIGH_TO_LOW => Ok(Self::HighToLow),
            gradient::LOW_TO_HIGH => Ok(Self::LowToHigh),
            gradient::HORIZONTAL => Ok(Self::Horizontal),
            other => Err(FigureError::General(format!(
                "Unknown structural gradient '{other}', expected one of {:?}",
                gradient::ALL
            ))),
        }
    }
}

/// Classify the projection `source_area → target_area` by comparing
/// architectural types.
///
/// Identical areas are `SameArea` without consulting `arch_types`. Otherwise
/// both areas must be present. Ranks that do not compare (NaN) count as equal.
pub fn structural_gradient<R: PartialOrd>(
    target_area: &str,
    source_area: &str,
    arch_types: &HashMap<String, R>,
) -> Result<StructuralGradient, FigureError> {
    if target_area == source_area {
        return Ok(StructuralGradient::SameArea);
    }

    let target = arch_types
        .get(target_area)
        .ok_or_else(|| FigureError::lookup("arch_types", target_area))?;
    let source = arch_types
        .get(source_area)
        .ok_or_else(|| FigureError::lookup("arch_types", source_area))?;

    Ok(if target < source {
        StructuralGradient::HighToLow
    } else if target > source {
        StructuralGradient::LowToHigh
    } else {
        StructuralGradient::Horizontal
    })
}

/// Classify every ordered pair of `areas`.
///
/// Returns a DataFrame with columns target_area, source_area, gradient in
/// target-major order.
pub fn gradient_frame<R: PartialOrd>(
    areas: &[String],
    arch_types: &HashMap<String, R>,
) -> Result<DataFrame, FigureError> {
    let n = areas.len() * areas.len();
    let mut targets = Vec::with_capacity(n);
    let mut sources = Vec::with_capacity(n);
    let mut gradients = Vec::with_capacity(n);

    for target in areas {
        for source in areas {
            let g = structural_gradient(target, source, arch_types)?;
            targets.push(target.as_str());
            sources.push(source.as_str());
            gradients.push(g.as_str());
        }
    }

    let df = DataFrame::new(vec![
        Column::new(gradient_table::TARGET_AREA.into(), &targets),
        Column::new(gradient_table::SOURCE_AREA.into(), &sources),
        Column::new(gradient_table::GRADIENT.into(), &gradients),
    ])?;

    Ok(df)
}

// ── Python API ──────────────────────────────────────────────────────────────

/// Structural gradient between two areas: "same-area", "HL", "LH" or "HZ".
///
/// Raises KeyError if an area is missing from `arch_types`.
#[pyfunction]
#[pyo3(name = "structural_gradient")]
pub fn py_structural_gradient(
    target_area: &str,
    source_area: &str,
    arch_types: HashMap<String, f64>,
) -> PyResult<&'static str> {
    Ok(structural_gradient(target_area, source_area, &arch_types)?.as_str())
}

/// Structural gradients of all ordered area pairs as a DataFrame.
#[pyfunction]
pub fn structural_gradient_frame(
    areas: Vec<String>,
    arch_types: HashMap<String, f64>,
) -> PyResult<PyDataFrame> {
    Ok(PyDataFrame(gradient_frame(&areas, &arch_types)?))
}
