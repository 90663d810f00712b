//! FASTA input.
//!
//! ### Design
//! - Parsed with `needletail`; gzip/bzip2 input is detected from magic bytes.
//! - Sequential: records are handed to the callback one at a time, in file
//!   order, and the next record is not read until the callback returns.
//! - Case is preserved; it carries the CDS/flank annotation.
//!
//! ### Errors
//! Parse errors and callback errors stop iteration and are returned.
use std::path::Path;

use anyhow::{Context, Result};
use needletail::parse_fastx_file;

use crate::model::GeneRecord;

/// Read `path` and call `on_record` for every record. Returns the record count.
pub fn for_each_record<P, F>(path: P, mut on_record: F) -> Result<usize>
where
    P: AsRef<Path>,
    F: FnMut(GeneRecord) -> Result<()>,
{
    let p = path.as_ref();
    let mut reader = parse_fastx_file(p).with_context(|| format!("cannot read FASTA {}", p.display()))?;
    let mut n = 0usize;
    while let Some(record) = reader.next() {
        let rec = record.with_context(|| format!("malformed record in {}", p.display()))?;
        let header = String::from_utf8_lossy(rec.id());
        let id = header.split_whitespace().next().unwrap_or_default().to_string();
        let sequence = String::from_utf8_lossy(&rec.seq()).into_owned();
        on_record(GeneRecord { id, sequence })?;
        n += 1;
    }
    Ok(n)
}
