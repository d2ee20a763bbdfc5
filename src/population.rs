use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use pyo3::prelude::*;

use crate::error::FigureError;
use crate::schema::tex_name;

/// Excitatory or inhibitory population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    E,
    I,
}

impl Polarity {
    pub fn as_char(&self) -> char {
        match self {
            Polarity::E => 'E',
            Polarity::I => 'I',
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A population label such as `23E` split into layer code and polarity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PopulationId {
    pub area_code: String,
    pub polarity: Polarity,
}

impl PopulationId {
    /// `<word-form><polarity>`, e.g. `twothreeE`.
    pub fn tex_name(&self) -> Result<String, FigureError> {
        Ok(format!("{}{}", tex_name(&self.area_code)?, self.polarity))
    }
}

impl FromStr for PopulationId {
    type Err = FigureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let polarity = match chars.next_back() {
            Some('E') => Polarity::E,
            Some('I') => Polarity::I,
            _ => return Err(FigureError::InvalidPopulation(s.to_string())),
        };
        let area_code = chars.as_str();
        if area_code.is_empty() {
            return Err(FigureError::InvalidPopulation(s.to_string()));
        }
        Ok(Self {
            area_code: area_code.to_string(),
            polarity,
        })
    }
}

impl fmt::Display for PopulationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.area_code, self.polarity)
    }
}

/// Ordered (target, source) population pair of a projection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PopulationPair {
    pub target: PopulationId,
    pub source: PopulationId,
}

impl PopulationPair {
    pub fn new(target: PopulationId, source: PopulationId) -> Self {
        Self { target, source }
    }

    /// Parse both labels at the boundary.
    pub fn parse(target: &str, source: &str) -> Result<Self, FigureError> {
        Ok(Self::new(target.parse()?, source.parse()?))
    }

    /// TeX macro name for this pair, e.g. `twothreeEfourI`.
    pub fn macro_name(&self) -> Result<String, FigureError> {
        Ok(format!(
            "{}{}",
            self.target.tex_name()?,
            self.source.tex_name()?
        ))
    }
}

/// Construct the list of all populations in an area as `<area>-<population>`,
/// in the order the structure lists them.
pub fn area_population_list(
    structure: &HashMap<String, Vec<String>>,
    area: &str,
) -> Result<Vec<String>, FigureError> {
    let pops = structure
        .get(area)
        .ok_or_else(|| FigureError::lookup("structure", area))?;

    Ok(pops.iter().map(|pop| format!("{area}-{pop}")).collect())
}

#[pyfunction]
#[pyo3(name = "area_population_list")]
pub fn py_area_population_list(
    structure: HashMap<String, Vec<String>>,
    area: &str,
) -> PyResult<Vec<String>> {
    Ok(area_population_list(&structure, area)?)
}
