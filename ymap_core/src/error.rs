use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors surfaced by a conversion call.
///
/// Geometry itself never fails; only caller policy can turn an outcome into
/// an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("no placements converted ({skipped} record(s) skipped)")]
    NoPlacements { skipped: usize },
}
