//! Command-line arguments and their validation.
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::mode::{ModePreset, RunMode};
use crate::region::PrimerSettings;

/// Argument validation failures.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ArgError {
    #[error("input file not found: {0}")]
    MissingInput(PathBuf),
    #[error("output directory not found: {0}")]
    MissingOutdir(PathBuf),
    #[error("number of primer pairs must be at least 1")]
    ZeroPairs,
    #[error("invalid product size range {min}-{max}")]
    ProductRange { min: usize, max: usize },
}

#[derive(Debug, Parser)]
#[command(name = "flankprime")]
#[command(version)]
#[command(about = "Design primer pairs flanking or spanning CDS boundaries", long_about = None)]
pub struct Args {
    #[arg(
        short = 'i',
        long = "input",
        required = true,
        value_name = "FASTA",
        help = "FASTA file with lowercase flanks and uppercase CDS"
    )]
    pub input: PathBuf,

    #[arg(
        short = 'n',
        long = "number",
        value_name = "N",
        default_value_t = 5,
        help = "Number of primer pairs to return per flank"
    )]
    pub number: usize,

    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        default_value_t = ModePreset::Flanking,
        help = "Design mode"
    )]
    pub mode: ModePreset,

    #[arg(
        long = "min-product",
        value_name = "BP",
        default_value_t = 200,
        help = "Minimum product size (enzyme modes only)"
    )]
    pub min_product: usize,

    #[arg(
        long = "max-product",
        value_name = "BP",
        default_value_t = 500,
        help = "Maximum product size (enzyme modes only)"
    )]
    pub max_product: usize,

    #[arg(
        short = 'o',
        long = "outdir",
        value_name = "DIR",
        default_value = ".",
        help = "Directory for the CSV report and sidecar"
    )]
    pub outdir: PathBuf,

    #[arg(
        long = "primer3",
        value_name = "PATH",
        default_value = "primer3_core",
        help = "primer3_core executable"
    )]
    pub primer3: PathBuf,

    #[arg(
        long = "thermo-params",
        value_name = "DIR",
        help = "primer3 thermodynamic parameter directory"
    )]
    pub thermo_params: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        help = "Log oracle requests and ignored fields",
        action = ArgAction::SetTrue
    )]
    pub verbose: bool,
}

impl Args {
    pub fn check(&self) -> Result<(), ArgError> {
        if !self.input.is_file() {
            return Err(ArgError::MissingInput(self.input.clone()));
        }
        if !self.outdir.is_dir() {
            return Err(ArgError::MissingOutdir(self.outdir.clone()));
        }
        if self.number == 0 {
            return Err(ArgError::ZeroPairs);
        }
        if self.min_product == 0 || self.min_product > self.max_product {
            return Err(ArgError::ProductRange { min: self.min_product, max: self.max_product });
        }
        if !self.run_mode().product_range_configurable() && (self.min_product, self.max_product) != (200, 500) {
            log::warn!("--min-product/--max-product are ignored in {:?} mode", self.mode);
        }
        Ok(())
    }

    pub fn run_mode(&self) -> RunMode { self.mode.into() }

    pub fn settings(&self) -> PrimerSettings {
        PrimerSettings::for_mode(self.run_mode(), self.number, (self.min_product, self.max_product))
    }
}

#[cfg(test)]
mod args_tests {
    use super::*;

    fn parse(extra: &[&str], input: &std::path::Path) -> Args {
        let mut argv = vec!["flankprime", "-i"];
        let input = input.to_str().unwrap();
        argv.push(input);
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_match_legacy_flanking_run() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let args = parse(&[], f.path());
        assert_eq!(args.check(), Ok(()));
        assert_eq!(args.number, 5);
        assert_eq!(args.mode, ModePreset::Flanking);
        assert_eq!(args.settings().product_range, (200, 500));
    }

    #[test]
    fn enzyme_mode_takes_product_window() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let args = parse(&["-m", "spanning-enzymes", "--min-product", "150", "--max-product", "700", "-n", "3"], f.path());
        assert_eq!(args.check(), Ok(()));
        let s = args.settings();
        assert_eq!((s.product_range, s.num_return, s.min_gc), ((150, 700), 3, 44.0));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let f = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(parse(&["-n", "0"], f.path()).check(), Err(ArgError::ZeroPairs));
        assert_eq!(
            parse(&["--min-product", "600"], f.path()).check(),
            Err(ArgError::ProductRange { min: 600, max: 500 })
        );
        let missing = std::path::Path::new("/definitely/not/here.fasta");
        assert!(matches!(parse(&[], missing).check(), Err(ArgError::MissingInput(_))));
    }
}
