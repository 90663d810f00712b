#![forbid(unsafe_code)]
//! # flankprime
//!
//! Design PCR primer pairs at the boundary between a gene's **flank** (lowercase)
//! and its **CDS** (uppercase), flag or screen candidates for **Type IIS**
//! restriction sites (bsaI, bsmbI, bspqI, btgzI) and write one CSV per run.
//!
//! ## Pipeline
//! For each FASTA record, in file order:
//! 1. [`cds::CdsBoundary::locate`] finds the CDS start and length;
//! 2. [`region::plan`] turns it into one or two oracle requests;
//! 3. an [`oracle::PrimerDesigner`] (normally [`primer3::Primer3Core`]) designs pairs;
//! 4. [`normalize::normalize`] maps the flat oracle answer onto [`model::CandidatePair`]s;
//! 5. [`annotate::annotate`] extracts the product and scans it for sites;
//! 6. [`report::Report`] appends the gene's rows.
//!
//! The [`mode::RunMode`] switches (target biasing, enzyme panel, spanning)
//! select the planner policy and report schema.
//!
//! ## Examples
//! ```rust
//! use flankprime::cds::CdsBoundary;
//! use flankprime::enzyme::MotifScanner;
//! use flankprime::model::Enzyme;
//!
//! let cds = CdsBoundary::locate("acgtACGTACGTacgt").unwrap();
//! assert_eq!((cds.start, cds.len), (4, 8));
//! let hit = MotifScanner::new().scan(b"aaaCGTCTCaaa", Enzyme::BsmbI);
//! assert_eq!(hit.start, Some(3));
//! ```

pub mod annotate;
pub mod cds;
pub mod cli;
pub mod enzyme;
pub mod error;
pub mod mode;
pub mod model;
pub mod normalize;
pub mod oracle;
pub mod pipeline;
pub mod primer3;
pub mod region;
pub mod report;
pub mod seqio;
pub mod data { pub mod enzymes; }

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
