use thiserror::Error;

/// Errors raised by configuration, placement, and invariant validation.
///
/// Placement *failure* (an item doesn't fit anywhere) is not an error: it is
/// represented by `None`/absence in the packer APIs. This enum covers the
/// other two classes: misuse that should fail fast at construction time, and
/// invariant violations surfaced by `validate_packing`.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("invalid dimensions: width, height and depth must all be greater than zero (got {width:?}x{height:?}x{depth:?})")]
    InvalidDimensions {
        width: String,
        height: String,
        depth: String,
    },

    #[error("invalid combination of mode {mode:?} and bin algorithm {bin_algo:?}")]
    InvalidModeBinAlgo { mode: String, bin_algo: String },

    #[error("bin index {index} out of range (0..{len})")]
    BinIndexOutOfRange { index: i64, len: usize },

    #[error("packing invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PackError>;
