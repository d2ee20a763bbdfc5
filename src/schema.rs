/// Naming tables and column-name constants for mam-figures.
/// Single source of truth - exported to Python via PyO3.
use crate::error::FigureError;

// ── Population naming ───────────────────────────────────────────────────────
pub mod naming {
    /// Canonical population labels of a model area, in layer order.
    pub const POPULATION_LABELS: [&str; 8] =
        ["2/3E", "2/3I", "4E", "4I", "5E", "5I", "6E", "6I"];

    /// Layer code → word-form used in TeX macro names (digits are not
    /// allowed in control sequence names).
    pub const TEX_NAMES: [(&str, &str); 4] = [
        ("23", "twothree"),
        ("4", "four"),
        ("5", "five"),
        ("6", "six"),
    ];
}

// ── Structural gradient tags ────────────────────────────────────────────────
pub mod gradient {
    pub const SAME_AREA: &str = "same-area";
    pub const HIGH_TO_LOW: &str = "HL";
    pub const LOW_TO_HIGH: &str = "LH";
    pub const HORIZONTAL: &str = "HZ";

    pub const ALL: [&str; 4] = [SAME_AREA, HIGH_TO_LOW, LOW_TO_HIGH, HORIZONTAL];
}

// ── Line width export ───────────────────────────────────────────────────────
pub mod line_width {
    /// Widest arrow drawn, in pstricks units. Empirically chosen.
    pub const MAX_LINE_WIDTH: f64 = 0.3;

    /// Keys of the nested mapping accepted by `write_out_lw(..., std=True)`.
    pub const MEAN: &str = "mean";
    pub const SIGMA: &str = "1sigma";

    /// Suffix appended to the macro name of sigma values.
    pub const SIGMA_MACRO_SUFFIX: &str = "sigma";
}

// ── Gradient frame columns ──────────────────────────────────────────────────
pub mod gradient_table {
    pub const TARGET_AREA: &str = "target_area";
    pub const SOURCE_AREA: &str = "source_area";
    pub const GRADIENT: &str = "gradient";
}

// ── Pair count frame columns ────────────────────────────────────────────────
pub mod pair_counts {
    pub const TARGET_POPULATION: &str = "target_population";
    pub const SOURCE_POPULATION: &str = "source_population";
    pub const COUNT: &str = "count";
    pub const MEAN: &str = "mean";
    pub const SIGMA: &str = "sigma";
}

/// Word-form of a layer code, e.g. `"23"` → `"twothree"`.
pub fn tex_name(area_code: &str) -> Result<&'static str, FigureError> {
    naming::TEX_NAMES
        .iter()
        .find(|(code, _)| *code == area_code)
        .map(|(_, name)| *name)
        .ok_or_else(|| FigureError::lookup("tex_names", area_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tex_name_translates_known_codes() {
        assert_eq!(tex_name("23").unwrap(), "twothree");
        assert_eq!(tex_name("4").unwrap(), "four");
        assert_eq!(tex_name("6").unwrap(), "six");
    }

    #[test]
    fn tex_name_rejects_unknown_code() {
        // "2/3" is the display label, not a layer code
        let err = tex_name("2/3").unwrap_err();
        assert!(matches!(
            err,
            FigureError::Lookup { table: "tex_names", ref key } if key == "2/3"
        ));
    }
}
