//! `primer3_core` adapter over Boulder-IO.
//!
//! ### Protocol
//! One request is one Boulder-IO record: `TAG=VALUE` lines terminated by a line
//! holding a single `=`. `primer3_core` echoes the input tags and then appends
//! its results to the same record; the echo is stripped here so the normalizer
//! only sees result keys.
//!
//! ### Errors
//! Spawn failures, a non-zero exit status and `PRIMER_ERROR` are returned as
//! errors and end the run. `PRIMER_WARNING` is logged.
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::error::DesignError;
use crate::oracle::{OracleOutput, PrimerDesigner};
use crate::region::RegionRequest;

/// Drives a local `primer3_core` executable, one process per request.
#[derive(Clone, Debug)]
pub struct Primer3Core {
    pub executable: PathBuf,
    /// Directory of thermodynamic parameter files, for builds that do not
    /// carry a compiled-in default.
    pub thermo_params: Option<PathBuf>,
}

impl Default for Primer3Core {
    fn default() -> Self { Primer3Core { executable: PathBuf::from("primer3_core"), thermo_params: None } }
}

/// Boulder-IO tags for `request`, in the order they are written.
pub fn boulder_tags(request: &RegionRequest, thermo_params: Option<&PathBuf>) -> Vec<(String, String)> {
    let s = &request.settings;
    let mut tags: Vec<(String, String)> = vec![
        ("SEQUENCE_ID".into(), request.gene.clone()),
        ("SEQUENCE_TEMPLATE".into(), request.template.clone()),
    ];
    if let Some(t) = request.target {
        tags.push(("SEQUENCE_TARGET".into(), format!("{},{}", t.start, t.len)));
    }
    if !request.excluded.is_empty() {
        let regions: Vec<String> = request.excluded.iter().map(|x| format!("{},{}", x.start, x.len)).collect();
        tags.push(("SEQUENCE_EXCLUDED_REGION".into(), regions.join(" ")));
    }
    let params: [(&str, String); 16] = [
        ("PRIMER_TASK", "generic".into()),
        ("PRIMER_PICK_LEFT_PRIMER", "1".into()),
        ("PRIMER_PICK_RIGHT_PRIMER", "1".into()),
        ("PRIMER_NUM_RETURN", s.num_return.to_string()),
        ("PRIMER_OPT_SIZE", s.opt_size.to_string()),
        ("PRIMER_MIN_SIZE", s.min_size.to_string()),
        ("PRIMER_MAX_SIZE", s.max_size.to_string()),
        ("PRIMER_PRODUCT_SIZE_RANGE", format!("{}-{}", s.product_range.0, s.product_range.1)),
        ("PRIMER_OPT_TM", s.opt_tm.to_string()),
        ("PRIMER_MIN_TM", s.min_tm.to_string()),
        ("PRIMER_MAX_TM", s.max_tm.to_string()),
        ("PRIMER_EXPLAIN_FLAG", "1".into()),
        ("PRIMER_MAX_END_STABILITY", s.max_end_stability.to_string()),
        ("PRIMER_MIN_GC", s.min_gc.to_string()),
        ("PRIMER_OPT_GC_PERCENT", s.opt_gc.to_string()),
        ("PRIMER_MAX_GC", s.max_gc.to_string()),
    ];
    tags.extend(params.into_iter().map(|(k, v)| (k.to_string(), v)));
    if let Some(p) = thermo_params {
        tags.push(("PRIMER_THERMODYNAMIC_PARAMETERS_PATH".into(), p.display().to_string()));
    }
    tags
}

/// Serialize tags as one Boulder-IO record.
pub fn render_record(tags: &[(String, String)]) -> String {
    let mut out = String::new();
    for (k, v) in tags {
        out.push_str(k);
        out.push('=');
        out.push_str(v);
        out.push('\n');
    }
    out.push_str("=\n");
    out
}

/// Parse the first Boulder-IO record in `text`, dropping any tag in `sent`.
pub fn parse_record(text: &str, sent: &HashSet<&str>) -> OracleOutput {
    text.lines()
        .take_while(|l| *l != "=")
        .filter_map(|l| l.split_once('='))
        .filter(|(k, _)| !sent.contains(k))
        .collect()
}

impl PrimerDesigner for Primer3Core {
    fn design(&mut self, request: &RegionRequest) -> Result<OracleOutput> {
        let tags = boulder_tags(request, self.thermo_params.as_ref());
        let input = render_record(&tags);
        log::debug!("primer3 request for {} ({}):\n{}", request.gene, request.flank, input.trim_end());

        let mut child = Command::new(&self.executable)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start {}", self.executable.display()))?;
        {
            let mut stdin = child.stdin.take().context("primer3 stdin unavailable")?;
            stdin.write_all(input.as_bytes()).context("failed to send request to primer3")?;
        }
        let out = child.wait_with_output().context("failed to read primer3 output")?;
        if !out.status.success() {
            anyhow::bail!(
                "{} exited with {} for {}: {}",
                self.executable.display(),
                out.status,
                request.gene,
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&out.stdout);
        let sent: HashSet<&str> = tags.iter().map(|(k, _)| k.as_str()).collect();
        let output = parse_record(&stdout, &sent);

        if let Some(msg) = output.get("PRIMER_ERROR") {
            return Err(DesignError::Oracle { gene: request.gene.clone(), message: msg.to_string() }.into());
        }
        if let Some(msg) = output.get("PRIMER_WARNING") {
            log::warn!("primer3 warning for {} ({}): {}", request.gene, request.flank, msg);
        }
        Ok(OracleOutput {
            fields: output.fields.into_iter().filter(|(k, _)| k != "PRIMER_WARNING").collect(),
        })
    }
}

#[cfg(test)]
mod boulder_tests {
    use super::*;
    use crate::model::Flank;
    use crate::region::{Interval, PrimerSettings};

    fn request() -> RegionRequest {
        RegionRequest {
            gene: "geneA".into(),
            template: "acgtACGT".into(),
            flank: Flank::Left,
            target: Some(Interval { start: 3, len: 3 }),
            excluded: vec![Interval { start: 0, len: 2 }, Interval { start: 6, len: 2 }],
            settings: PrimerSettings::default(),
        }
    }

    #[test]
    fn record_carries_regions_and_settings() {
        let text = render_record(&boulder_tags(&request(), None));
        assert!(text.starts_with("SEQUENCE_ID=geneA\nSEQUENCE_TEMPLATE=acgtACGT\n"));
        assert!(text.contains("SEQUENCE_TARGET=3,3\n"));
        assert!(text.contains("SEQUENCE_EXCLUDED_REGION=0,2 6,2\n"));
        assert!(text.contains("PRIMER_PRODUCT_SIZE_RANGE=200-500\n"));
        assert!(text.contains("PRIMER_MIN_GC=45\n"));
        assert!(text.contains("PRIMER_MAX_END_STABILITY=6\n"));
        assert!(!text.contains("PRIMER_THERMODYNAMIC_PARAMETERS_PATH"));
        assert!(text.ends_with("\n=\n"));
    }

    #[test]
    fn unconstrained_request_omits_region_tags() {
        let mut r = request();
        r.target = None;
        r.excluded.clear();
        let text = render_record(&boulder_tags(&r, Some(&PathBuf::from("/opt/primer3_config/"))));
        assert!(!text.contains("SEQUENCE_TARGET"));
        assert!(!text.contains("SEQUENCE_EXCLUDED_REGION"));
        assert!(text.contains("PRIMER_THERMODYNAMIC_PARAMETERS_PATH=/opt/primer3_config/\n"));
    }

    /// A stand-in `primer3_core`: a shell script running `body`.
    #[cfg(unix)]
    fn scripted(dir: &std::path::Path, body: &str) -> Primer3Core {
        use std::os::unix::fs::PermissionsExt;
        let exe = dir.join("primer3_core");
        std::fs::write(&exe, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
        Primer3Core { executable: exe, thermo_params: None }
    }

    #[cfg(unix)]
    #[test]
    fn echo_and_warning_are_stripped_from_answer() {
        let dir = tempfile::tempdir().unwrap();
        // echo the request without its terminator, then answer like primer3 does
        let mut p3 = scripted(
            dir.path(),
            "grep -v '^=$'\necho 'PRIMER_WARNING=low template quality'\necho PRIMER_PAIR_NUM_RETURNED=0\necho =",
        );
        let out = p3.design(&request()).unwrap();
        assert_eq!(out.fields, vec![("PRIMER_PAIR_NUM_RETURNED".to_string(), "0".to_string())]);
    }

    #[cfg(unix)]
    #[test]
    fn primer_error_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut p3 = scripted(dir.path(), "cat > /dev/null\necho 'PRIMER_ERROR=SEQUENCE_TARGET beyond end of sequence'\necho =");
        let err = p3.design(&request()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("geneA"), "{msg}");
        assert!(msg.contains("SEQUENCE_TARGET beyond end of sequence"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut p3 = scripted(dir.path(), "cat > /dev/null\necho 'thermodynamic parameters not found' >&2\nexit 3");
        let err = p3.design(&request()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("exited with"), "{msg}");
        assert!(msg.contains("thermodynamic parameters not found"), "{msg}");
    }

    #[test]
    fn missing_executable_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut p3 = Primer3Core { executable: dir.path().join("no_such_primer3"), thermo_params: None };
        let err = p3.design(&request()).unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn parse_strips_echo_and_stops_at_terminator() {
        let stdout = "SEQUENCE_ID=geneA\nPRIMER_TASK=generic\nPRIMER_LEFT_EXPLAIN=considered 10, ok 0\n\
                      PRIMER_PAIR_NUM_RETURNED=0\n=\nSEQUENCE_ID=next\n";
        let sent: HashSet<&str> = ["SEQUENCE_ID", "PRIMER_TASK"].into_iter().collect();
        let out = parse_record(stdout, &sent);
        let keys: Vec<_> = out.fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["PRIMER_LEFT_EXPLAIN", "PRIMER_PAIR_NUM_RETURNED"]);
        assert_eq!(out.get("PRIMER_LEFT_EXPLAIN"), Some("considered 10, ok 0"));
    }
}
