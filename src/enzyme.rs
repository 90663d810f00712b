//! Exact restriction-site scanning.
//!
//! One leftmost-first Aho–Corasick automaton per enzyme holds the forward motif
//! and its reverse complement, so a single pass reports the earliest site on
//! either strand.
//!
//! Matching is case-sensitive against the uppercase motifs. Callers that hold
//! mixed-case text decide how to normalize it: the product scan uppercases, the
//! whole-CDS screen does not (so only CDS letters can match).
//!
//! # Examples
//! ```
//! use flankprime::enzyme::MotifScanner;
//! use flankprime::model::Enzyme;
//! let scanner = MotifScanner::new();
//! let hit = scanner.scan(b"AAACGTCTCAAA", Enzyme::BsmbI);
//! assert_eq!(hit.start, Some(3));
//! ```
use aho_corasick::{AhoCorasick, AhoCorasickKind, MatchKind};

use crate::data::enzymes::SITES;
use crate::model::{Enzyme, MotifHit};

/// Prebuilt automata for every tracked enzyme.
pub struct MotifScanner {
    automata: Vec<(Enzyme, AhoCorasick)>,
}

impl Default for MotifScanner {
    fn default() -> Self { Self::new() }
}

impl MotifScanner {
    pub fn new() -> Self {
        let automata = SITES
            .iter()
            .map(|s| {
                log::debug!("{}: {} / {} ({})", s.enzyme, s.forward, s.reverse, s.reference);
                let ac = AhoCorasick::builder()
                    .kind(Some(AhoCorasickKind::DFA)) // two short motifs
                    .match_kind(MatchKind::LeftmostFirst)
                    .build([s.forward, s.reverse])
                    .expect("failed to build Aho-Corasick automaton");
                (s.enzyme, ac)
            })
            .collect();
        Self { automata }
    }

    /// First site for `enzyme` in `seq`, either orientation.
    pub fn scan(&self, seq: &[u8], enzyme: Enzyme) -> MotifHit {
        let start = self
            .automata
            .iter()
            .find(|(e, _)| *e == enzyme)
            .and_then(|(_, ac)| ac.find(seq))
            .map(|m| m.start());
        MotifHit { enzyme, start }
    }

    /// Scan `seq` for every enzyme in [`Enzyme::ALL`] order.
    pub fn scan_all(&self, seq: &[u8]) -> Vec<MotifHit> {
        Enzyme::ALL.iter().map(|&e| self.scan(seq, e)).collect()
    }

    /// Whole-gene screen: does the raw record carry a bsaI site in its
    /// uppercase (CDS) letters?
    pub fn bsai_in_cds(&self, sequence: &str) -> bool {
        self.scan(sequence.as_bytes(), Enzyme::BsaI).found()
    }
}
