//! Product extraction and restriction-site annotation.
//!
//! The product runs from the forward primer's first base to the reverse
//! primer's 5' base. The oracle reports the reverse primer position as that 5'
//! base (the rightmost template base it anneals to), so the product is the
//! inclusive slice `template[left.start ..= right.start]`.
use crate::enzyme::MotifScanner;
use crate::model::{AnnotatedPair, CandidatePair};

/// Half-open byte span of the product, clamped to the template.
pub fn product_span(pair: &CandidatePair, template_len: usize) -> (usize, usize) {
    let start = pair.left.start.min(template_len);
    let end = (pair.right.start + 1).min(template_len).max(start);
    (start, end)
}

/// Attach the product sequence and one hit per tracked enzyme.
///
/// The product keeps its original case in the report; scanning happens on an
/// uppercased copy so sites straddling the CDS boundary are found.
pub fn annotate(scanner: &MotifScanner, candidate: CandidatePair, template: &str) -> AnnotatedPair {
    let (start, end) = product_span(&candidate, template.len());
    let product = String::from_utf8_lossy(&template.as_bytes()[start..end]).into_owned();
    let hits = scanner.scan_all(product.to_ascii_uppercase().as_bytes());
    AnnotatedPair { candidate, product, hits }
}
