//! Report assembly: fixed per-mode schema, per-gene batch appends, the bsaI
//! sidecar and an end-of-run summary table.
//!
//! ### Schemas
//! Screened modes write `Gene, Primer, bsaI in Primer, Flank` then the 22 pair
//! columns. Enzyme-aware modes write `Gene, Primer, Flank`, the 22 pair columns,
//! `<enzyme> in Product` / `<enzyme> Start` for each tracked enzyme, then
//! `Product Sequence`. Header and rows are produced from the same column list,
//! so they cannot drift apart.
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use polars::prelude::*;

use crate::mode::RunMode;
use crate::model::{AnnotatedPair, Enzyme, Flank};
use crate::normalize::PairField;

/// One report column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Column {
    Gene,
    Primer,
    Flank,
    BsaIInPrimer,
    Pair(PairField),
    InProduct(Enzyme),
    Start(Enzyme),
    ProductSequence,
}

impl Column {
    pub fn label(self) -> String {
        match self {
            Column::Gene => "Gene".into(),
            Column::Primer => "Primer".into(),
            Column::Flank => "Flank".into(),
            Column::BsaIInPrimer => "bsaI in Primer".into(),
            Column::Pair(f) => f.label().into(),
            Column::InProduct(e) => format!("{e} in Product"),
            Column::Start(e) => format!("{e} Start"),
            Column::ProductSequence => "Product Sequence".into(),
        }
    }

    pub fn cell(self, row: &AnnotatedPair) -> String {
        let c = &row.candidate;
        match self {
            Column::Gene => c.gene.clone(),
            Column::Primer => c.pair.to_string(),
            Column::Flank => c.flank.to_string(),
            Column::BsaIInPrimer => row.hit(Enzyme::BsaI).yes_no().into(),
            Column::Pair(f) => f.render(c),
            Column::InProduct(e) => row.hit(e).yes_no().into(),
            Column::Start(e) => row.hit(e).start_label(),
            Column::ProductSequence => row.product.clone(),
        }
    }
}

/// Columns for `mode`, in file order.
pub fn columns(mode: RunMode) -> Vec<Column> {
    let mut cols = if mode.enzyme_panel {
        vec![Column::Gene, Column::Primer, Column::Flank]
    } else {
        vec![Column::Gene, Column::Primer, Column::BsaIInPrimer, Column::Flank]
    };
    cols.extend(PairField::ALL.iter().map(|&f| Column::Pair(f)));
    if mode.enzyme_panel {
        for e in Enzyme::ALL {
            cols.push(Column::InProduct(e));
            cols.push(Column::Start(e));
        }
        cols.push(Column::ProductSequence);
    }
    cols
}

/// `<dir>/<stem> <yy-mm-dd HH.MM.SS>.<ext>`
pub fn timestamped_path(dir: &Path, stem: &str, ext: &str, now: &DateTime<Local>) -> PathBuf {
    dir.join(format!("{stem} {}.{ext}", now.format("%y-%m-%d %H.%M.%S")))
}

/// The output table. The header is written on creation; each gene's rows are
/// appended and flushed as one batch. Only per-(gene, flank) pair counts are
/// kept in memory.
pub struct Report<W: Write> {
    columns: Vec<Column>,
    writer: csv::Writer<W>,
    counts: Vec<(String, Flank, u64)>,
    rows_written: usize,
}

impl Report<File> {
    /// Create (truncate) the CSV at `path`.
    pub fn create(path: &Path, mode: RunMode) -> Result<Self> {
        let f = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        Report::new(f, mode)
    }
}

impl<W: Write> Report<W> {
    pub fn new(inner: W, mode: RunMode) -> Result<Self> {
        let columns = columns(mode);
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(columns.iter().map(|c| c.label()))?;
        writer.flush()?;
        Ok(Report { columns, writer, counts: Vec::new(), rows_written: 0 })
    }

    /// Append all rows for one gene.
    pub fn append_gene(&mut self, batch: &[AnnotatedPair]) -> Result<()> {
        for a in batch {
            self.writer.write_record(self.columns.iter().map(|c| c.cell(a)))?;
            self.rows_written += 1;
            let (gene, flank) = (&a.candidate.gene, a.candidate.flank);
            match self.counts.last_mut() {
                Some((g, f, n)) if *g == *gene && *f == flank => *n += 1,
                _ => self.counts.push((gene.clone(), flank, 1)),
            }
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn header(&self) -> Vec<String> { self.columns.iter().map(|c| c.label()).collect() }

    pub fn rows_written(&self) -> usize { self.rows_written }

    /// Rows per gene and flank, in report order.
    pub fn summary_frame(&self) -> PolarsResult<DataFrame> {
        let genes: Vec<&str> = self.counts.iter().map(|(g, _, _)| g.as_str()).collect();
        let flanks: Vec<String> = self.counts.iter().map(|(_, f, _)| f.to_string()).collect();
        let pairs: Vec<u64> = self.counts.iter().map(|(_, _, n)| *n).collect();
        df!(
            "gene" => genes,
            "flank" => flanks,
            "pairs" => pairs,
        )
    }
}

/// Plain-text list of genes skipped by the whole-CDS bsaI screen. The file is
/// only created once the first gene is added.
pub struct SkipList {
    path: PathBuf,
    ids: Vec<String>,
}

impl SkipList {
    pub fn new(path: PathBuf) -> Self { SkipList { path, ids: Vec::new() } }

    pub fn add(&mut self, id: &str) -> Result<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("cannot open {}", self.path.display()))?;
        writeln!(f, "{id}")?;
        self.ids.push(id.to_string());
        Ok(())
    }

    pub fn ids(&self) -> &[String] { &self.ids }

    pub fn path(&self) -> &Path { &self.path }
}
