//! CDS boundary location.
//!
//! Input records mark the coding sequence in uppercase and the flanks in
//! lowercase. The boundary is the first uppercase letter; the length is the
//! number of uppercase letters. Records whose uppercase letters form more than
//! one run are rejected instead of being measured as if they were contiguous.
use crate::error::CdsError;

/// Position and extent of the uppercase CDS within a record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CdsBoundary {
    /// 0-based offset of the first uppercase letter.
    pub start: usize,
    /// Number of uppercase letters.
    pub len: usize,
}

impl CdsBoundary {
    /// Locate the CDS in `sequence`.
    ///
    /// # Examples
    /// ```
    /// use flankprime::cds::CdsBoundary;
    /// let cds = CdsBoundary::locate("acgtACGTACGTacgt").unwrap();
    /// assert_eq!((cds.start, cds.len), (4, 8));
    /// ```
    pub fn locate(sequence: &str) -> Result<Self, CdsError> {
        let bytes = sequence.as_bytes();
        let start = bytes.iter().position(u8::is_ascii_uppercase).ok_or(CdsError::NoCdsMarker)?;
        let len = bytes.iter().filter(|b| b.is_ascii_uppercase()).count();

        let islands = bytes
            .iter()
            .enumerate()
            .filter(|&(i, b)| b.is_ascii_uppercase() && (i == 0 || !bytes[i - 1].is_ascii_uppercase()))
            .count();
        if islands > 1 {
            return Err(CdsError::DiscontiguousCds { islands });
        }
        Ok(Self { start, len })
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize { self.start + self.len }

    /// True when the record begins inside the CDS, leaving only a downstream flank.
    pub fn starts_at_origin(&self) -> bool { self.start == 0 }
}
