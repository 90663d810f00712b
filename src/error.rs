//! Typed errors for the record pipeline.
//!
//! Leaf modules return these; orchestration (`pipeline`, the binary) lifts them
//! into `anyhow::Result` with context.

/// Failure to derive a CDS boundary from a mixed-case record.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CdsError {
    /// The sequence has no uppercase character at all.
    #[error("no uppercase CDS marker found")]
    NoCdsMarker,
    /// Uppercase characters form more than one run, so the CDS length would be a
    /// character count rather than a span.
    #[error("uppercase CDS is split into {islands} separate runs")]
    DiscontiguousCds { islands: usize },
}

/// The oracle answered with something the normalizer cannot turn into a row.
#[derive(thiserror::Error, Debug)]
pub enum DesignError {
    /// A candidate group lacks one of the fields every output row needs.
    #[error("oracle output for pair {index} is missing {field}")]
    MissingField { index: usize, field: &'static str },
    /// A value could not be parsed into its typed field.
    #[error("oracle value for {key} is not valid: {value:?}")]
    BadValue { key: String, value: String },
    /// The oracle reported a hard error for the request.
    #[error("primer3 reported an error for {gene}: {message}")]
    Oracle { gene: String, message: String },
}
