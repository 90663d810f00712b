//! Run modes.
//!
//! A [`RunMode`] is three switches. Planner policy, GC floor, whole-CDS
//! screening, report schema and file names are all derived from them here.
use core::fmt;

/// Named presets selectable on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ModePreset {
    /// One request per gene, no target; bsaI genes go to the sidecar.
    Flanking,
    /// One boundary-targeted request per gene; four-enzyme columns.
    FlankingEnzymes,
    /// Left and right requests anchored by excluded regions; bsaI sidecar.
    Spanning,
    /// Spanning with boundary targets; four-enzyme columns.
    SpanningEnzymes,
}

/// The switches that parameterize the pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RunMode {
    /// Ask the oracle to cover the CDS boundary with a small target window.
    pub target_bias: bool,
    /// Report bsaI/bsmbI/bspqI/btgzI columns and the product sequence.
    pub enzyme_panel: bool,
    /// Design a Left and a Right pair per gene instead of a single flank.
    pub spanning: bool,
}

impl From<ModePreset> for RunMode {
    fn from(p: ModePreset) -> Self {
        match p {
            ModePreset::Flanking => RunMode { target_bias: false, enzyme_panel: false, spanning: false },
            ModePreset::FlankingEnzymes => RunMode { target_bias: true, enzyme_panel: true, spanning: false },
            ModePreset::Spanning => RunMode { target_bias: false, enzyme_panel: false, spanning: true },
            ModePreset::SpanningEnzymes => RunMode { target_bias: true, enzyme_panel: true, spanning: true },
        }
    }
}

impl RunMode {
    /// Whole genes with a bsaI site in the CDS are skipped before design.
    pub fn screens_cds(&self) -> bool { !self.enzyme_panel }

    /// Screened modes pin the product window to the defaults.
    pub fn product_range_configurable(&self) -> bool { self.enzyme_panel }

    /// Lower GC% bound handed to the oracle.
    pub fn min_gc(&self) -> f64 { if self.enzyme_panel { 44.0 } else { 45.0 } }

    /// Stem of the CSV file name (a timestamp and `.csv` are appended).
    pub fn table_stem(&self) -> &'static str {
        match (self.spanning, self.enzyme_panel) {
            (false, false) => "LF-RF Primers",
            (false, true) => "LF-RF Enzyme Primers",
            (true, false) => "Primers",
            (true, true) => "Enzyme Primers",
        }
    }

    /// Stem of the skipped-gene sidecar, if this mode writes one.
    pub fn sidecar_stem(&self) -> Option<&'static str> {
        match (self.screens_cds(), self.spanning) {
            (false, _) => None,
            (true, false) => Some("LF-RF CDS with bsaI"),
            (true, true) => Some("CDS with bsaI"),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            if self.spanning { "spanning" } else { "flanking" },
            if self.target_bias { "+target" } else { "" },
            if self.enzyme_panel { "+enzymes" } else { "" },
        )
    }
}
