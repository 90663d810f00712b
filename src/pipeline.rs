//! The record pipeline.
//!
//! One [`Pipeline`] serves every run mode: the [`RunMode`] picks the planner
//! policy, the whole-CDS screen and the report schema. Records are processed
//! one at a time; each gene's rows reach the report as a single batch before
//! the next record is read.
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};

use crate::annotate::annotate;
use crate::cds::CdsBoundary;
use crate::enzyme::MotifScanner;
use crate::error::CdsError;
use crate::mode::RunMode;
use crate::model::{AnnotatedPair, GeneRecord};
use crate::normalize::normalize;
use crate::oracle::PrimerDesigner;
use crate::region::{plan, PrimerSettings};
use crate::report::{Report, SkipList};
use crate::seqio;

/// What happened to one record.
#[derive(Debug)]
pub enum GeneOutcome {
    /// Rows for every flank, Left before Right, ascending pair index.
    Designed(Vec<AnnotatedPair>),
    /// The CDS carries a bsaI site; no oracle call was made.
    SkippedBsaI,
    /// No usable CDS marker.
    SkippedNoCds(CdsError),
}

/// Totals for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub genes: usize,
    pub designed: usize,
    pub rows: usize,
    pub skipped_bsai: usize,
    pub skipped_no_cds: usize,
}

pub struct Pipeline<D: PrimerDesigner> {
    mode: RunMode,
    settings: PrimerSettings,
    designer: D,
    scanner: MotifScanner,
}

impl<D: PrimerDesigner> Pipeline<D> {
    pub fn new(mode: RunMode, settings: PrimerSettings, designer: D) -> Self {
        Pipeline { mode, settings, designer, scanner: MotifScanner::new() }
    }

    pub fn mode(&self) -> RunMode { self.mode }

    pub fn designer(&self) -> &D { &self.designer }

    /// Run one record through locate, plan, design, normalize and annotate.
    pub fn process(&mut self, record: &GeneRecord) -> Result<GeneOutcome> {
        if self.mode.screens_cds() && self.scanner.bsai_in_cds(&record.sequence) {
            return Ok(GeneOutcome::SkippedBsaI);
        }
        let cds = match CdsBoundary::locate(&record.sequence) {
            Ok(c) => c,
            Err(e) => return Ok(GeneOutcome::SkippedNoCds(e)),
        };

        let mut rows = Vec::new();
        for request in plan(self.mode, record, &cds, &self.settings) {
            let output = self
                .designer
                .design(&request)
                .with_context(|| format!("primer design failed for {} ({})", record.id, request.flank))?;
            let pairs = normalize(&output, &record.id, request.flank)
                .with_context(|| format!("unexpected oracle output for {} ({})", record.id, request.flank))?;
            rows.extend(pairs.into_iter().map(|p| annotate(&self.scanner, p, &record.sequence)));
        }
        Ok(GeneOutcome::Designed(rows))
    }

    fn step<W: Write>(
        &mut self,
        record: GeneRecord,
        report: &mut Report<W>,
        skips: &mut Option<&mut SkipList>,
        stats: &mut RunStats,
    ) -> Result<()> {
        stats.genes += 1;
        match self.process(&record)? {
            GeneOutcome::Designed(rows) => {
                info!("{}: {} primer pair(s)", record.id, rows.len());
                report.append_gene(&rows)?;
                stats.designed += 1;
                stats.rows += rows.len();
            }
            GeneOutcome::SkippedBsaI => {
                info!("{}: bsaI site in CDS, skipped", record.id);
                if let Some(s) = skips.as_deref_mut() {
                    s.add(&record.id)?;
                }
                stats.skipped_bsai += 1;
            }
            GeneOutcome::SkippedNoCds(e) => {
                warn!("{}: {e}, skipped", record.id);
                stats.skipped_no_cds += 1;
            }
        }
        Ok(())
    }

    /// Process records from an iterator.
    pub fn run_records<W, I>(&mut self, records: I, report: &mut Report<W>, mut skips: Option<&mut SkipList>) -> Result<RunStats>
    where
        W: Write,
        I: IntoIterator<Item = GeneRecord>,
    {
        let mut stats = RunStats::default();
        for record in records {
            self.step(record, report, &mut skips, &mut stats)?;
        }
        Ok(stats)
    }

    /// Stream a FASTA file through the pipeline.
    pub fn run<W: Write>(&mut self, input: &Path, report: &mut Report<W>, mut skips: Option<&mut SkipList>) -> Result<RunStats> {
        let mut stats = RunStats::default();
        seqio::for_each_record(input, |record| self.step(record, report, &mut skips, &mut stats))?;
        Ok(stats)
    }
}
