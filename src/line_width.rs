/// Line widths for arrows in the pstricks path figures.
///
/// Counts per population pair are scaled so the largest becomes
/// `MAX_LINE_WIDTH` and written as TeX statements:
///
/// ```text
/// \setboolean{DRAWtwothreeEfourI}{true}
/// \def\twothreeEfourI{0.15}
/// \def\twothreeEfourIsigma{0.02}      (statistical counts only)
/// ```
///
/// The figure sources `\input` the file and draw an arrow for every pair whose
/// DRAW flag is set.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::*;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use pyo3_polars::PyDataFrame;

use crate::error::FigureError;
use crate::population::PopulationPair;
use crate::schema::{line_width, pair_counts};

/// Counts in mapping order. Output follows this order, never sorted.
pub type PairCountMap = Vec<(PopulationPair, f64)>;

/// Counts to export, selected explicitly by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum PairCounts {
    Plain(PairCountMap),
    /// Mean counts plus their standard deviation. Both are scaled by the
    /// factor derived from `mean`.
    Statistical {
        mean: PairCountMap,
        sigma: PairCountMap,
    },
}

impl PairCounts {
    /// `MAX_LINE_WIDTH / max(values)`, using the mean values in statistical
    /// mode.
    ///
    /// Any non-finite value, including sigma values, is rejected since TeX
    /// cannot parse `NaN` or `inf`.
    pub fn scale_factor(&self) -> Result<f64, FigureError> {
        let (values, sigma) = match self {
            PairCounts::Plain(counts) => (counts, None),
            PairCounts::Statistical { mean, sigma } => (mean, Some(sigma)),
        };
        if values.is_empty() {
            return Err(FigureError::DegenerateScale("no counts given".into()));
        }

        let non_finite = values
            .iter()
            .chain(sigma.into_iter().flatten())
            .find(|(_, v)| !v.is_finite());
        if let Some((pair, v)) = non_finite {
            return Err(FigureError::DegenerateScale(format!(
                "count for {} -> {} is {v}",
                pair.source, pair.target
            )));
        }

        let max = values
            .iter()
            .map(|(_, v)| *v)
            .fold(f64::NEG_INFINITY, f64::max);
        if max == 0.0 || !max.is_finite() {
            return Err(FigureError::DegenerateScale(format!(
                "maximum count is {max}"
            )));
        }
        Ok(line_width::MAX_LINE_WIDTH / max)
    }

    /// Render all statements without touching the filesystem.
    ///
    /// In statistical mode the DRAW flag and value of every mean pair come
    /// first, then one sigma statement per sigma pair. The flag line is
    /// emitted in both modes.
    ///
    /// Values use the shortest decimal that round-trips and never exponent
    /// notation; whole numbers print without a fraction (`3`, not `3.0`).
    pub fn render_lines(&self) -> Result<Vec<String>, FigureError> {
        let scale = self.scale_factor()?;
        log::debug!("Line width scale factor: {scale}");

        let mut lines = Vec::new();
        match self {
            PairCounts::Plain(counts) => {
                for (pair, count) in counts {
                    push_pair(&mut lines, pair, count * scale)?;
                }
            }
            PairCounts::Statistical { mean, sigma } => {
                for (pair, count) in mean {
                    push_pair(&mut lines, pair, count * scale)?;
                }
                for (pair, count) in sigma {
                    lines.push(format!(
                        "\\def\\{}{}{{{}}}",
                        pair.macro_name()?,
                        line_width::SIGMA_MACRO_SUFFIX,
                        count * scale
                    ));
                }
            }
        }
        Ok(lines)
    }

    /// Render and write one statement per line to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<usize, FigureError> {
        let lines = self.render_lines()?;
        for line in &lines {
            writeln!(out, "{line}")?;
        }
        Ok(lines.len())
    }

    /// Plain counts from a frame with columns target_population,
    /// source_population and count. Row order is kept.
    pub fn plain_from_frame(df: &DataFrame) -> Result<Self, FigureError> {
        require_columns(
            df,
            &[
                pair_counts::TARGET_POPULATION,
                pair_counts::SOURCE_POPULATION,
                pair_counts::COUNT,
            ],
        )?;
        let df = normalize_frame(df, &[pair_counts::COUNT])?;
        let pairs = frame_pairs(&df)?;
        let counts = df.column(pair_counts::COUNT)?.f64()?;

        let mut out = Vec::with_capacity(pairs.len());
        for (i, pair) in pairs.into_iter().enumerate() {
            let count = counts.get(i).ok_or_else(|| {
                FigureError::General(format!("Null {} at row {i}", pair_counts::COUNT))
            })?;
            out.push((pair, count));
        }
        Ok(PairCounts::Plain(out))
    }

    /// Statistical counts from a frame with columns target_population,
    /// source_population, mean and sigma. Rows with a null sigma get no
    /// sigma statement.
    pub fn statistical_from_frame(df: &DataFrame) -> Result<Self, FigureError> {
        require_columns(
            df,
            &[
                pair_counts::TARGET_POPULATION,
                pair_counts::SOURCE_POPULATION,
                pair_counts::MEAN,
                pair_counts::SIGMA,
            ],
        )?;
        let df = normalize_frame(df, &[pair_counts::MEAN, pair_counts::SIGMA])?;
        let pairs = frame_pairs(&df)?;
        let means = df.column(pair_counts::MEAN)?.f64()?;
        let sigmas = df.column(pair_counts::SIGMA)?.f64()?;

        let mut mean = Vec::with_capacity(pairs.len());
        let mut sigma = Vec::new();
        for (i, pair) in pairs.into_iter().enumerate() {
            let m = means.get(i).ok_or_else(|| {
                FigureError::General(format!("Null {} at row {i}", pair_counts::MEAN))
            })?;
            if let Some(s) = sigmas.get(i) {
                sigma.push((pair.clone(), s));
            }
            mean.push((pair, m));
        }
        Ok(PairCounts::Statistical { mean, sigma })
    }
}

fn push_pair(
    lines: &mut Vec<String>,
    pair: &PopulationPair,
    width: f64,
) -> Result<(), FigureError> {
    let name = pair.macro_name()?;
    lines.push(format!("\\setboolean{{DRAW{name}}}{{true}}"));
    lines.push(format!("\\def\\{name}{{{width}}}"));
    Ok(())
}

/// Write line widths to `path`, creating or truncating it.
///
/// Everything is rendered before the file is opened, so lookup and scale
/// errors leave an existing file untouched.
pub fn write_line_widths(path: impl AsRef<Path>, counts: &PairCounts) -> Result<(), FigureError> {
    let path = path.as_ref();
    let lines = counts.render_lines()?;

    let mut out = BufWriter::new(File::create(path)?);
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;

    log::info!("Wrote {} line width statements to {}", lines.len(), path.display());
    Ok(())
}

// ── Frame helpers ───────────────────────────────────────────────────────────

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), FigureError> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(FigureError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

/// Trim population labels and cast value columns to Float64.
fn normalize_frame(df: &DataFrame, value_cols: &[&str]) -> Result<DataFrame, FigureError> {
    let mut exprs = vec![
        col(pair_counts::TARGET_POPULATION)
            .cast(DataType::String)
            .str()
            .strip_chars(lit(" \t\r\n")),
        col(pair_counts::SOURCE_POPULATION)
            .cast(DataType::String)
            .str()
            .strip_chars(lit(" \t\r\n")),
    ];
    exprs.extend(value_cols.iter().map(|c| col(*c).cast(DataType::Float64)));

    Ok(df.clone().lazy().select(exprs).collect()?)
}

fn frame_pairs(df: &DataFrame) -> Result<Vec<PopulationPair>, FigureError> {
    let targets = df.column(pair_counts::TARGET_POPULATION)?.str()?;
    let sources = df.column(pair_counts::SOURCE_POPULATION)?.str()?;

    (0..df.height())
        .map(|i| {
            let target = targets.get(i).ok_or_else(|| {
                FigureError::General(format!("Null {} at row {i}", pair_counts::TARGET_POPULATION))
            })?;
            let source = sources.get(i).ok_or_else(|| {
                FigureError::General(format!("Null {} at row {i}", pair_counts::SOURCE_POPULATION))
            })?;
            PopulationPair::parse(target, source)
        })
        .collect()
}

// ── Python API ──────────────────────────────────────────────────────────────

fn extract_pair_counts(dict: &Bound<'_, PyDict>) -> PyResult<PairCountMap> {
    let mut out = Vec::with_capacity(dict.len());
    for (key, value) in dict.iter() {
        let (target, source): (String, String) = key.extract()?;
        let count: f64 = value.extract()?;
        out.push((PopulationPair::parse(&target, &source)?, count));
    }
    Ok(out)
}

fn nested_counts<'py>(
    counts: &Bound<'py, PyDict>,
    key: &'static str,
) -> PyResult<Bound<'py, PyDict>> {
    let item = counts
        .get_item(key)?
        .ok_or_else(|| FigureError::lookup("line width counts", key))?;
    Ok(item.downcast_into::<PyDict>()?)
}

/// Store line widths for arrows in path figures to a text file.
///
/// With `std=False`, `counts` maps `(target, source)` population labels to
/// counts. With `std=True` it holds `"mean"` and `"1sigma"` mappings of that
/// shape.
#[pyfunction]
#[pyo3(signature = (path, counts, std=false))]
pub fn write_out_lw(path: &str, counts: &Bound<'_, PyDict>, std: bool) -> PyResult<()> {
    let counts = if std {
        PairCounts::Statistical {
            mean: extract_pair_counts(&nested_counts(counts, line_width::MEAN)?)?,
            sigma: extract_pair_counts(&nested_counts(counts, line_width::SIGMA)?)?,
        }
    } else {
        PairCounts::Plain(extract_pair_counts(counts)?)
    };
    write_line_widths(path, &counts)?;
    Ok(())
}

/// Write plain line widths from a `{(target, source): count}` mapping.
#[pyfunction]
#[pyo3(name = "write_line_widths")]
pub fn py_write_line_widths(path: &str, counts: &Bound<'_, PyDict>) -> PyResult<()> {
    write_line_widths(path, &PairCounts::Plain(extract_pair_counts(counts)?))?;
    Ok(())
}

/// Write mean line widths plus sigma statements, both scaled by the mean.
#[pyfunction]
pub fn write_line_widths_with_sigma(
    path: &str,
    mean: &Bound<'_, PyDict>,
    sigma: &Bound<'_, PyDict>,
) -> PyResult<()> {
    let counts = PairCounts::Statistical {
        mean: extract_pair_counts(mean)?,
        sigma: extract_pair_counts(sigma)?,
    };
    write_line_widths(path, &counts)?;
    Ok(())
}

/// Write line widths from a DataFrame.
///
/// Required columns: target_population, source_population and either count,
/// or mean and sigma when `statistical=True`.
#[pyfunction]
#[pyo3(signature = (path, df, statistical=false))]
pub fn write_line_widths_frame(path: &str, df: PyDataFrame, statistical: bool) -> PyResult<()> {
    let counts = if statistical {
        PairCounts::statistical_from_frame(&df.0)?
    } else {
        PairCounts::plain_from_frame(&df.0)?
    };
    write_line_widths(path, &counts)?;
    Ok(())
}
