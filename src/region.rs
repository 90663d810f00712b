//! Region planning: turn a CDS boundary into oracle requests.
//!
//! Three policies, chosen by [`RunMode`]:
//! - **unbiased flank**: whole template, no target, labelled `Left`;
//! - **biased flank**: a 3-base target centred on the CDS start, or on the CDS
//!   end when the record begins inside the CDS (then labelled `Right`);
//! - **spanning**: a `Left` request whose reverse primer must sit in the first
//!   [`SPAN_MARGIN`] CDS bases and a `Right` request whose forward primer must
//!   sit in the last [`SPAN_MARGIN`] CDS bases.
use crate::cds::CdsBoundary;
use crate::mode::RunMode;
use crate::model::{Flank, GeneRecord};

/// CDS bases kept available to the inner primer in spanning mode.
pub const SPAN_MARGIN: usize = 200;

/// Width of the target window placed over a boundary.
pub const TARGET_WIDTH: usize = 3;

/// Half-open `[start, start + len)` interval in template coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Interval {
    pub start: usize,
    pub len: usize,
}

impl Interval {
    /// `TARGET_WIDTH` bases centred on `offset`, shifted to stay inside a
    /// template of `seq_len` bases. `None` when the template is narrower than
    /// the window.
    pub fn centred_on(offset: usize, seq_len: usize) -> Option<Self> {
        if seq_len < TARGET_WIDTH {
            return None;
        }
        let start = offset.saturating_sub(TARGET_WIDTH / 2).min(seq_len - TARGET_WIDTH);
        Some(Interval { start, len: TARGET_WIDTH })
    }

    pub fn end(&self) -> usize { self.start + self.len }
}

/// Numeric design parameters shared by every request in a run.
#[derive(Clone, Debug, PartialEq)]
pub struct PrimerSettings {
    pub num_return: usize,
    pub opt_size: usize,
    pub min_size: usize,
    pub max_size: usize,
    pub opt_tm: f64,
    pub min_tm: f64,
    pub max_tm: f64,
    pub min_gc: f64,
    pub opt_gc: f64,
    pub max_gc: f64,
    pub max_end_stability: f64,
    /// Inclusive product size window.
    pub product_range: (usize, usize),
}

impl Default for PrimerSettings {
    fn default() -> Self {
        PrimerSettings {
            num_return: 5,
            opt_size: 20,
            min_size: 18,
            max_size: 30,
            opt_tm: 55.0,
            min_tm: 50.0,
            max_tm: 60.0,
            min_gc: 45.0,
            opt_gc: 50.0,
            max_gc: 80.0,
            max_end_stability: 6.0,
            product_range: (200, 500),
        }
    }
}

impl PrimerSettings {
    /// Settings for `mode`. The product window is only honoured when the mode
    /// allows it; screened modes keep the 200-500 default.
    pub fn for_mode(mode: RunMode, num_return: usize, product_range: (usize, usize)) -> Self {
        let base = PrimerSettings::default();
        PrimerSettings {
            num_return,
            min_gc: mode.min_gc(),
            product_range: if mode.product_range_configurable() { product_range } else { base.product_range },
            ..base
        }
    }
}

/// Everything the oracle needs for one flank of one gene.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionRequest {
    pub gene: String,
    pub template: String,
    pub flank: Flank,
    pub target: Option<Interval>,
    pub excluded: Vec<Interval>,
    pub settings: PrimerSettings,
}

/// Extent of the right-hand exclusion beyond the CDS start. Never negative:
/// short CDSs are excluded whole.
pub fn right_exclusion_extent(cds_len: usize) -> usize {
    if cds_len < SPAN_MARGIN { cds_len } else { cds_len - SPAN_MARGIN }
}

/// Offset just inside the CDS end, used to target the downstream boundary.
fn cds_end_anchor(cds: &CdsBoundary) -> usize { cds.end().saturating_sub(2) }

/// Build the oracle requests for one record.
pub fn plan(mode: RunMode, record: &GeneRecord, cds: &CdsBoundary, settings: &PrimerSettings) -> Vec<RegionRequest> {
    let request = |flank, target, excluded| RegionRequest {
        gene: record.id.clone(),
        template: record.sequence.clone(),
        flank,
        target,
        excluded,
        settings: settings.clone(),
    };

    let seq_len = record.sequence.len();

    if !mode.spanning {
        if !mode.target_bias {
            return vec![request(Flank::Left, None, Vec::new())];
        }
        let (flank, anchor) = if cds.starts_at_origin() {
            (Flank::Right, cds_end_anchor(cds))
        } else {
            (Flank::Left, cds.start)
        };
        return vec![request(flank, Interval::centred_on(anchor, seq_len), Vec::new())];
    }

    let left_from = cds.start + SPAN_MARGIN;
    let left_excluded = if left_from < seq_len {
        vec![Interval { start: left_from, len: seq_len - left_from }]
    } else {
        Vec::new()
    };

    let right_len = (cds.start + right_exclusion_extent(cds.len)).min(seq_len);
    let right_excluded = if right_len > 0 { vec![Interval { start: 0, len: right_len }] } else { Vec::new() };

    let (left_target, right_target) = if mode.target_bias {
        (Interval::centred_on(cds.start, seq_len), Interval::centred_on(cds_end_anchor(cds), seq_len))
    } else {
        (None, None)
    };

    vec![
        request(Flank::Left, left_target, left_excluded),
        request(Flank::Right, right_target, right_excluded),
    ]
}
