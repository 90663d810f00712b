//! Oracle output normalization.
//!
//! The oracle answers with a flat mapping such as
//!
//! ```text
//! PRIMER_PAIR_0_PENALTY=0.7351
//! PRIMER_LEFT_0=112,20
//! PRIMER_RIGHT_0_TM=55.2
//! ```
//!
//! Normalization drops diagnostics, groups keys by their embedded pair index and
//! maps each index-stripped key (`PRIMER_LEFT_TM`) to a [`PairField`] through
//! an explicit dictionary. Field order in the oracle output is irrelevant.
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::error::DesignError;
use crate::model::{CandidatePair, Flank, PrimerStats};
use crate::oracle::OracleOutput;

/// Diagnostic and count keys that never reach the report.
pub const DIAGNOSTIC_KEYS: &[&str] = &[
    "PRIMER_LEFT_EXPLAIN",
    "PRIMER_RIGHT_EXPLAIN",
    "PRIMER_PAIR_EXPLAIN",
    "PRIMER_INTERNAL_EXPLAIN",
    "PRIMER_LEFT_NUM_RETURNED",
    "PRIMER_RIGHT_NUM_RETURNED",
    "PRIMER_INTERNAL_NUM_RETURNED",
    "PRIMER_PAIR_NUM_RETURNED",
];

/// The per-pair columns of every report schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PairField {
    PairPenalty,
    LeftPenalty,
    RightPenalty,
    LeftSequence,
    RightSequence,
    LeftPosition,
    RightPosition,
    LeftTm,
    RightTm,
    LeftGc,
    RightGc,
    LeftSelfAnyTh,
    RightSelfAnyTh,
    LeftSelfEndTh,
    RightSelfEndTh,
    LeftHairpinTh,
    RightHairpinTh,
    LeftEndStability,
    RightEndStability,
    PairComplAnyTh,
    PairComplEndTh,
    PairProductSize,
}

/// Index-stripped oracle key -> field. This is the whole relabelling contract.
const DICTIONARY: [(&str, PairField); 22] = [
    ("PRIMER_PAIR_PENALTY", PairField::PairPenalty),
    ("PRIMER_LEFT_PENALTY", PairField::LeftPenalty),
    ("PRIMER_RIGHT_PENALTY", PairField::RightPenalty),
    ("PRIMER_LEFT_SEQUENCE", PairField::LeftSequence),
    ("PRIMER_RIGHT_SEQUENCE", PairField::RightSequence),
    ("PRIMER_LEFT", PairField::LeftPosition),
    ("PRIMER_RIGHT", PairField::RightPosition),
    ("PRIMER_LEFT_TM", PairField::LeftTm),
    ("PRIMER_RIGHT_TM", PairField::RightTm),
    ("PRIMER_LEFT_GC_PERCENT", PairField::LeftGc),
    ("PRIMER_RIGHT_GC_PERCENT", PairField::RightGc),
    ("PRIMER_LEFT_SELF_ANY_TH", PairField::LeftSelfAnyTh),
    ("PRIMER_RIGHT_SELF_ANY_TH", PairField::RightSelfAnyTh),
    ("PRIMER_LEFT_SELF_END_TH", PairField::LeftSelfEndTh),
    ("PRIMER_RIGHT_SELF_END_TH", PairField::RightSelfEndTh),
    ("PRIMER_LEFT_HAIRPIN_TH", PairField::LeftHairpinTh),
    ("PRIMER_RIGHT_HAIRPIN_TH", PairField::RightHairpinTh),
    ("PRIMER_LEFT_END_STABILITY", PairField::LeftEndStability),
    ("PRIMER_RIGHT_END_STABILITY", PairField::RightEndStability),
    ("PRIMER_PAIR_COMPL_ANY_TH", PairField::PairComplAnyTh),
    ("PRIMER_PAIR_COMPL_END_TH", PairField::PairComplEndTh),
    ("PRIMER_PAIR_PRODUCT_SIZE", PairField::PairProductSize),
];

impl PairField {
    /// Report column order.
    pub const ALL: [PairField; 22] = [
        PairField::PairPenalty,
        PairField::LeftPenalty,
        PairField::RightPenalty,
        PairField::LeftSequence,
        PairField::RightSequence,
        PairField::LeftPosition,
        PairField::RightPosition,
        PairField::LeftTm,
        PairField::RightTm,
        PairField::LeftGc,
        PairField::RightGc,
        PairField::LeftSelfAnyTh,
        PairField::RightSelfAnyTh,
        PairField::LeftSelfEndTh,
        PairField::RightSelfEndTh,
        PairField::LeftHairpinTh,
        PairField::RightHairpinTh,
        PairField::LeftEndStability,
        PairField::RightEndStability,
        PairField::PairComplAnyTh,
        PairField::PairComplEndTh,
        PairField::PairProductSize,
    ];

    /// Field for an index-stripped oracle key.
    pub fn from_oracle(stem: &str) -> Option<PairField> {
        DICTIONARY.iter().find(|(k, _)| *k == stem).map(|(_, f)| *f)
    }

    /// Index-stripped oracle key for this field.
    pub fn oracle_stem(self) -> &'static str {
        DICTIONARY.iter().find(|(_, f)| *f == self).map(|(k, _)| *k).unwrap_or("")
    }

    /// Column header.
    pub fn label(self) -> &'static str {
        match self {
            PairField::PairPenalty => "Pair Penalty",
            PairField::LeftPenalty => "Left Penalty",
            PairField::RightPenalty => "Right Penalty",
            PairField::LeftSequence => "Primer Forward",
            PairField::RightSequence => "Primer Reverse",
            PairField::LeftPosition => "Left (Start, Length)",
            PairField::RightPosition => "Right (Start, Length)",
            PairField::LeftTm => "Left TM",
            PairField::RightTm => "Right TM",
            PairField::LeftGc => "Left GC%",
            PairField::RightGc => "Right GC%",
            PairField::LeftSelfAnyTh => "Left Self Any TH",
            PairField::RightSelfAnyTh => "Right Self Any TH",
            PairField::LeftSelfEndTh => "Left Self End TH",
            PairField::RightSelfEndTh => "Right Self End TH",
            PairField::LeftHairpinTh => "Left Hairpin TH",
            PairField::RightHairpinTh => "Right Hairpin TH",
            PairField::LeftEndStability => "Left End Stability",
            PairField::RightEndStability => "Right End Stability",
            PairField::PairComplAnyTh => "Pair Compl Any TH",
            PairField::PairComplEndTh => "Pair Compl End TH",
            PairField::PairProductSize => "Pair Product Size",
        }
    }

    /// Cell text for this field of `pair`.
    pub fn render(self, pair: &CandidatePair) -> String {
        let (l, r) = (&pair.left, &pair.right);
        match self {
            PairField::PairPenalty => pair.pair_penalty.to_string(),
            PairField::LeftPenalty => l.penalty.to_string(),
            PairField::RightPenalty => r.penalty.to_string(),
            PairField::LeftSequence => l.sequence.clone(),
            PairField::RightSequence => r.sequence.clone(),
            PairField::LeftPosition => format!("({}, {})", l.start, l.length),
            PairField::RightPosition => format!("({}, {})", r.start, r.length),
            PairField::LeftTm => l.tm.to_string(),
            PairField::RightTm => r.tm.to_string(),
            PairField::LeftGc => l.gc_percent.to_string(),
            PairField::RightGc => r.gc_percent.to_string(),
            PairField::LeftSelfAnyTh => l.self_any_th.to_string(),
            PairField::RightSelfAnyTh => r.self_any_th.to_string(),
            PairField::LeftSelfEndTh => l.self_end_th.to_string(),
            PairField::RightSelfEndTh => r.self_end_th.to_string(),
            PairField::LeftHairpinTh => l.hairpin_th.to_string(),
            PairField::RightHairpinTh => r.hairpin_th.to_string(),
            PairField::LeftEndStability => l.end_stability.to_string(),
            PairField::RightEndStability => r.end_stability.to_string(),
            PairField::PairComplAnyTh => pair.compl_any_th.to_string(),
            PairField::PairComplEndTh => pair.compl_end_th.to_string(),
            PairField::PairProductSize => pair.product_size.to_string(),
        }
    }
}

/// Split `PRIMER_LEFT_3_TM` into `(3, "PRIMER_LEFT_TM")`. The index is the
/// first all-digit `_`-separated token.
pub fn split_index(key: &str) -> Option<(usize, String)> {
    let tokens: Vec<&str> = key.split('_').collect();
    let pos = tokens.iter().position(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))?;
    let index = tokens[pos].parse().ok()?;
    let stem: Vec<&str> = tokens.iter().enumerate().filter(|&(i, _)| i != pos).map(|(_, t)| *t).collect();
    Some((index, stem.join("_")))
}

type Group<'a> = HashMap<PairField, &'a str>;

fn take<T: FromStr>(group: &Group, index: usize, field: PairField) -> Result<T, DesignError> {
    let raw = group.get(&field).ok_or(DesignError::MissingField { index, field: field.label() })?;
    raw.trim().parse().map_err(|_| DesignError::BadValue {
        key: format!("{} (pair {index})", field.oracle_stem()),
        value: raw.to_string(),
    })
}

fn take_position(group: &Group, index: usize, field: PairField) -> Result<(usize, usize), DesignError> {
    let raw = group.get(&field).ok_or(DesignError::MissingField { index, field: field.label() })?;
    let bad = || DesignError::BadValue { key: format!("{} (pair {index})", field.oracle_stem()), value: raw.to_string() };
    let (start, len) = raw.split_once(',').ok_or_else(bad)?;
    Ok((start.trim().parse().map_err(|_| bad())?, len.trim().parse().map_err(|_| bad())?))
}

fn primer_stats(group: &Group, index: usize, left: bool) -> Result<PrimerStats, DesignError> {
    use PairField::*;
    let pick = |l: PairField, r: PairField| if left { l } else { r };
    let (start, length) = take_position(group, index, pick(LeftPosition, RightPosition))?;
    Ok(PrimerStats {
        penalty: take(group, index, pick(LeftPenalty, RightPenalty))?,
        sequence: take(group, index, pick(LeftSequence, RightSequence))?,
        start,
        length,
        tm: take(group, index, pick(LeftTm, RightTm))?,
        gc_percent: take(group, index, pick(LeftGc, RightGc))?,
        self_any_th: take(group, index, pick(LeftSelfAnyTh, RightSelfAnyTh))?,
        self_end_th: take(group, index, pick(LeftSelfEndTh, RightSelfEndTh))?,
        hairpin_th: take(group, index, pick(LeftHairpinTh, RightHairpinTh))?,
        end_stability: take(group, index, pick(LeftEndStability, RightEndStability))?,
    })
}

/// Turn one oracle answer into candidate pairs, ascending by pair index.
///
/// Keys without an index are logged and skipped. Per-pair keys outside the
/// dictionary are ignored. A pair lacking a report field is an error.
pub fn normalize(output: &OracleOutput, gene: &str, flank: Flank) -> Result<Vec<CandidatePair>, DesignError> {
    let mut groups: BTreeMap<usize, Group> = BTreeMap::new();
    for (key, value) in &output.fields {
        if DIAGNOSTIC_KEYS.contains(&key.as_str()) {
            continue;
        }
        let Some((index, stem)) = split_index(key) else {
            log::warn!("Invalid oracle key for {gene} ({flank}): {key}={value}");
            continue;
        };
        match PairField::from_oracle(&stem) {
            Some(field) => {
                groups.entry(index).or_default().insert(field, value.as_str());
            }
            None => log::debug!("ignoring oracle field {key} for {gene}"),
        }
    }

    groups
        .iter()
        .map(|(&index, group)| -> Result<CandidatePair, DesignError> {
            Ok(CandidatePair {
                gene: gene.to_string(),
                flank,
                pair: index + 1,
                pair_penalty: take(group, index, PairField::PairPenalty)?,
                left: primer_stats(group, index, true)?,
                right: primer_stats(group, index, false)?,
                compl_any_th: take(group, index, PairField::PairComplAnyTh)?,
                compl_end_th: take(group, index, PairField::PairComplEndTh)?,
                product_size: take(group, index, PairField::PairProductSize)?,
            })
        })
        .collect()
}

/// Canned oracle answers for tests across the crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use crate::oracle::OracleOutput;

    /// Every per-pair field for pair `i`, with the given primer positions.
    pub fn pair_fields(i: usize, left: (usize, usize), right: (usize, usize)) -> Vec<(String, String)> {
        let v: Vec<(String, String)> = vec![
            (format!("PRIMER_PAIR_{i}_PENALTY"), "0.7351".into()),
            (format!("PRIMER_LEFT_{i}_PENALTY"), "0.3123".into()),
            (format!("PRIMER_RIGHT_{i}_PENALTY"), "0.4228".into()),
            (format!("PRIMER_LEFT_{i}_SEQUENCE"), "GCTAGCTAGGCTAGCATCGA".into()),
            (format!("PRIMER_RIGHT_{i}_SEQUENCE"), "CGATCGGATCGATCGTAGCT".into()),
            (format!("PRIMER_LEFT_{i}"), format!("{},{}", left.0, left.1)),
            (format!("PRIMER_RIGHT_{i}"), format!("{},{}", right.0, right.1)),
            (format!("PRIMER_LEFT_{i}_TM"), "55.312".into()),
            (format!("PRIMER_RIGHT_{i}_TM"), "54.577".into()),
            (format!("PRIMER_LEFT_{i}_GC_PERCENT"), "50".into()),
            (format!("PRIMER_RIGHT_{i}_GC_PERCENT"), "55".into()),
            (format!("PRIMER_LEFT_{i}_SELF_ANY_TH"), "12.5".into()),
            (format!("PRIMER_RIGHT_{i}_SELF_ANY_TH"), "0".into()),
            (format!("PRIMER_LEFT_{i}_SELF_END_TH"), "3.1".into()),
            (format!("PRIMER_RIGHT_{i}_SELF_END_TH"), "0".into()),
            (format!("PRIMER_LEFT_{i}_HAIRPIN_TH"), "35.75".into()),
            (format!("PRIMER_RIGHT_{i}_HAIRPIN_TH"), "0".into()),
            (format!("PRIMER_LEFT_{i}_END_STABILITY"), "3.9".into()),
            (format!("PRIMER_RIGHT_{i}_END_STABILITY"), "4.25".into()),
            (format!("PRIMER_PAIR_{i}_COMPL_ANY_TH"), "8.6".into()),
            (format!("PRIMER_PAIR_{i}_COMPL_END_TH"), "1.2".into()),
            (format!("PRIMER_PAIR_{i}_PRODUCT_SIZE"), (right.0 + 1 - left.0).to_string()),
        ];
        v
    }

    /// Diagnostics primer3 emits alongside (or instead of) results.
    pub fn diagnostics(n: usize) -> Vec<(String, String)> {
        vec![
            ("PRIMER_LEFT_EXPLAIN".into(), "considered 120, ok 12".into()),
            ("PRIMER_RIGHT_EXPLAIN".into(), "considered 118, ok 9".into()),
            ("PRIMER_PAIR_EXPLAIN".into(), format!("considered 30, ok {n}")),
            ("PRIMER_LEFT_NUM_RETURNED".into(), n.to_string()),
            ("PRIMER_RIGHT_NUM_RETURNED".into(), n.to_string()),
            ("PRIMER_INTERNAL_NUM_RETURNED".into(), "0".into()),
            ("PRIMER_PAIR_NUM_RETURNED".into(), n.to_string()),
        ]
    }

    pub fn answer(pairs: &[((usize, usize), (usize, usize))]) -> OracleOutput {
        let mut fields = diagnostics(pairs.len());
        for (i, (l, r)) in pairs.iter().enumerate() {
            fields.extend(pair_fields(i, *l, *r));
        }
        OracleOutput { fields }
    }
}

#[cfg(test)]
mod normalize_tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn split_index_finds_first_numeric_token() {
        assert_eq!(split_index("PRIMER_LEFT_3_TM"), Some((3, "PRIMER_LEFT_TM".to_string())));
        assert_eq!(split_index("PRIMER_RIGHT_12"), Some((12, "PRIMER_RIGHT".to_string())));
        assert_eq!(split_index("PRIMER_PAIR_NUM_RETURNED"), None);
    }

    #[test]
    fn dictionary_covers_every_column_once() {
        for f in PairField::ALL {
            assert_eq!(PairField::from_oracle(f.oracle_stem()), Some(f), "{}", f.label());
        }
        let mut labels: Vec<_> = PairField::ALL.iter().map(|f| f.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 22);
    }

    #[test]
    fn zero_candidates_is_empty_not_error() {
        let out = OracleOutput { fields: diagnostics(0) };
        assert!(normalize(&out, "geneA", Flank::Left).unwrap().is_empty());
    }

    #[test]
    fn pairs_are_grouped_indexed_and_typed() {
        let out = answer(&[((10, 20), (259, 20)), ((12, 20), (301, 22))]);
        let pairs = normalize(&out, "geneA", Flank::Right).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].pair, 1);
        assert_eq!(pairs[1].pair, 2);
        assert_eq!(pairs[1].gene, "geneA");
        assert_eq!(pairs[1].flank, Flank::Right);
        assert_eq!((pairs[1].left.start, pairs[1].left.length), (12, 20));
        assert_eq!((pairs[1].right.start, pairs[1].right.length), (301, 22));
        assert_eq!(pairs[0].product_size, 250);
        assert_eq!(pairs[0].left.tm, 55.312);
    }

    #[test]
    fn every_schema_field_renders_non_empty() {
        let pairs = normalize(&answer(&[((0, 20), (249, 20))]), "g", Flank::Left).unwrap();
        for f in PairField::ALL {
            assert!(!f.render(&pairs[0]).is_empty(), "{}", f.label());
        }
        assert_eq!(PairField::LeftPosition.render(&pairs[0]), "(0, 20)");
        assert_eq!(PairField::PairPenalty.render(&pairs[0]), "0.7351");
    }

    #[test]
    fn field_order_does_not_matter() {
        let mut out = answer(&[((5, 20), (254, 20))]);
        out.fields.reverse();
        let reversed = normalize(&out, "g", Flank::Left).unwrap();
        let forward = normalize(&answer(&[((5, 20), (254, 20))]), "g", Flank::Left).unwrap();
        assert_eq!(reversed, forward);
    }

    #[test]
    fn unindexed_and_unknown_keys_are_skipped() {
        let mut out = answer(&[((5, 20), (254, 20))]);
        out.fields.push(("PRIMER_SURPRISE".into(), "1".into()));
        out.fields.push(("PRIMER_PAIR_0_PRODUCT_TM".into(), "81.2".into()));
        let pairs = normalize(&out, "g", Flank::Left).unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn missing_field_is_reported() {
        let mut out = answer(&[((5, 20), (254, 20))]);
        out.fields.retain(|(k, _)| k != "PRIMER_RIGHT_0_HAIRPIN_TH");
        let err = normalize(&out, "g", Flank::Left).unwrap_err();
        assert!(matches!(err, DesignError::MissingField { index: 0, field: "Right Hairpin TH" }));
    }

    #[test]
    fn malformed_position_is_reported() {
        let mut out = answer(&[((5, 20), (254, 20))]);
        for (k, v) in out.fields.iter_mut() {
            if k == "PRIMER_LEFT_0" {
                *v = "five".into();
            }
        }
        assert!(matches!(normalize(&out, "g", Flank::Left), Err(DesignError::BadValue { .. })));
    }
}
