//! Recognition sites for the tracked **Type IIS** enzymes.
//!
//! Each site is listed as the top-strand recognition sequence and its reverse
//! complement, both as literal uppercase constants: either strand of a template
//! can carry the site, and scanning a single strand for both strings covers both.
//!
//! Source: REBASE enzyme pages (recognition sequences only; cut offsets are not
//! needed to flag a site).

use crate::model::Enzyme;

/// A recognition site in both orientations.
#[derive(Clone, Debug)]
pub struct RecognitionSite {
    pub enzyme: Enzyme,
    /// 5'-3' recognition sequence.
    pub forward: &'static str,
    /// Reverse complement of `forward`.
    pub reverse: &'static str,
    /// REBASE page for the enzyme.
    pub reference: &'static str,
}

/// BsaI (Eco31I isoschizomer), GGTCTC(1/5).
pub const BSAI: RecognitionSite = RecognitionSite {
    enzyme: Enzyme::BsaI,
    forward: "GGTCTC",
    reverse: "GAGACC",
    reference: "http://rebase.neb.com/rebase/enz/BsaI.html",
};

/// BsmBI (Esp3I isoschizomer), CGTCTC(1/5).
pub const BSMBI: RecognitionSite = RecognitionSite {
    enzyme: Enzyme::BsmbI,
    forward: "CGTCTC",
    reverse: "GAGACG",
    reference: "http://rebase.neb.com/rebase/enz/BsmBI.html",
};

/// BspQI (SapI isoschizomer), GCTCTTC(1/4). The only 7-mer in the panel.
pub const BSPQI: RecognitionSite = RecognitionSite {
    enzyme: Enzyme::BspqI,
    forward: "GCTCTTC",
    reverse: "GAAGAGC",
    reference: "http://rebase.neb.com/rebase/enz/BspQI.html",
};

/// BtgZI, GCGATG(10/14).
pub const BTGZI: RecognitionSite = RecognitionSite {
    enzyme: Enzyme::BtgzI,
    forward: "GCGATG",
    reverse: "CATCGC",
    reference: "http://rebase.neb.com/rebase/enz/BtgZI.html",
};

/// All sites, in [`Enzyme::ALL`] order.
pub const SITES: &[RecognitionSite] = &[BSAI, BSMBI, BSPQI, BTGZI];

#[cfg(test)]
mod site_tests {
    use super::*;
    use bio::alphabets::dna::revcomp;

    #[test]
    fn reverse_motifs_are_reverse_complements() {
        for s in SITES {
            let rc = revcomp(s.forward.as_bytes());
            assert_eq!(rc, s.reverse.as_bytes(), "{} reverse motif", s.enzyme);
        }
    }

    #[test]
    fn sites_follow_enzyme_order() {
        let order: Vec<_> = SITES.iter().map(|s| s.enzyme).collect();
        assert_eq!(order, Enzyme::ALL.to_vec());
        assert_eq!(BSPQI.forward.len(), 7);
    }
}
