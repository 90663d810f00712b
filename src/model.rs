//! Core types for **gene records**, **candidate primer pairs** and **motif hits**.
//!
//! This module holds the data model shared by the pipeline stages. Records flow
//! through it in one direction: [`GeneRecord`] in, [`CandidatePair`] after
//! normalization, [`AnnotatedPair`] after the restriction-site scan.
use core::fmt;

/// One FASTA record. Lowercase letters are flank, uppercase letters are CDS.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneRecord {
    /// First whitespace-delimited token of the header line.
    pub id: String,
    /// Template sequence with its original case.
    pub sequence: String,
}

impl GeneRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self { id: id.into(), sequence: sequence.into() }
    }
}

/// Which side of the CDS a primer pair was designed for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Flank { Left, Right }

impl fmt::Display for Flank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flank::Left => f.write_str("Left"),
            Flank::Right => f.write_str("Right"),
        }
    }
}

/// Type IIS restriction enzymes tracked in the product scan.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Enzyme { BsaI, BsmbI, BspqI, BtgzI }

impl Enzyme {
    /// Every tracked enzyme, in report column order.
    pub const ALL: [Enzyme; 4] = [Enzyme::BsaI, Enzyme::BsmbI, Enzyme::BspqI, Enzyme::BtgzI];

    /// Name as printed in column headers (`bsaI`, `bsmbI`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Enzyme::BsaI => "bsaI",
            Enzyme::BsmbI => "bsmbI",
            Enzyme::BspqI => "bspqI",
            Enzyme::BtgzI => "btgzI",
        }
    }
}

impl fmt::Display for Enzyme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Result of scanning one sequence for one enzyme.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MotifHit {
    pub enzyme: Enzyme,
    /// 0-based start of the first match in either orientation.
    pub start: Option<usize>,
}

impl MotifHit {
    pub fn found(&self) -> bool { self.start.is_some() }

    /// `Yes` / `No` as written to the report.
    pub fn yes_no(&self) -> &'static str { if self.found() { "Yes" } else { "No" } }

    /// Start offset, or the `n/a` sentinel used in the report.
    pub fn start_label(&self) -> String {
        self.start.map_or_else(|| "n/a".to_string(), |s| s.to_string())
    }
}

/// Per-primer statistics reported by the oracle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrimerStats {
    pub penalty: f64,
    pub sequence: String,
    /// Oracle position. For the right primer this is its 5' end, i.e. the
    /// rightmost template base it covers.
    pub start: usize,
    pub length: usize,
    pub tm: f64,
    pub gc_percent: f64,
    pub self_any_th: f64,
    pub self_end_th: f64,
    pub hairpin_th: f64,
    pub end_stability: f64,
}

/// One scored primer pair after normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidatePair {
    pub gene: String,
    pub flank: Flank,
    /// 1-based, contiguous within a gene and flank.
    pub pair: usize,
    pub pair_penalty: f64,
    pub left: PrimerStats,
    pub right: PrimerStats,
    pub compl_any_th: f64,
    pub compl_end_th: f64,
    pub product_size: usize,
}

/// A candidate pair plus its product substring and restriction-site hits.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotatedPair {
    pub candidate: CandidatePair,
    /// Literal template slice from forward primer start to reverse primer end.
    pub product: String,
    /// One entry per [`Enzyme::ALL`], in that order.
    pub hits: Vec<MotifHit>,
}

impl AnnotatedPair {
    /// Hit for `enzyme`; an enzyme that was not scanned reads as absent.
    pub fn hit(&self, enzyme: Enzyme) -> MotifHit {
        self.hits.iter().copied().find(|h| h.enzyme == enzyme).unwrap_or(MotifHit { enzyme, start: None })
    }
}

#[cfg(test)]
mod model_tests {
    use super::*;

    #[test]
    fn absent_hit_serializes_sentinel() {
        let h = MotifHit { enzyme: Enzyme::BsaI, start: None };
        assert!(!h.found());
        assert_eq!(h.yes_no(), "No");
        assert_eq!(h.start_label(), "n/a");
    }

    #[test]
    fn present_hit_serializes_offset() {
        let h = MotifHit { enzyme: Enzyme::BtgzI, start: Some(0) };
        assert_eq!(h.yes_no(), "Yes");
        assert_eq!(h.start_label(), "0");
    }

    #[test]
    fn enzyme_names_follow_column_order() {
        let names: Vec<_> = Enzyme::ALL.iter().map(|e| e.to_string()).collect();
        assert_eq!(names, ["bsaI", "bsmbI", "bspqI", "btgzI"]);
    }
}
