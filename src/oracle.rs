//! The primer-design oracle seam.
//!
//! The pipeline only needs "request in, flat key/value mapping out". The
//! shipped implementation is [`crate::primer3::Primer3Core`]; tests plug in
//! canned responses.
use anyhow::Result;

use crate::region::RegionRequest;

/// Flat oracle answer, in the order the oracle emitted it. Per-pair keys carry
/// the 0-based pair index, e.g. `PRIMER_PAIR_3_PENALTY`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OracleOutput {
    pub fields: Vec<(String, String)>,
}

impl OracleOutput {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OracleOutput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OracleOutput { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Anything that can design primer pairs for a [`RegionRequest`].
pub trait PrimerDesigner {
    fn design(&mut self, request: &RegionRequest) -> Result<OracleOutput>;
}
