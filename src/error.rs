use core::fmt;

/// Result alias for `accord`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering and validation primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Samples in a dataset have inconsistent dimensionality.
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// A sample had no cluster assignment where one was required.
    UnassignedSample {
        /// Index of the offending sample.
        index: usize,
    },

    /// A sample carried a cluster id outside `[0, k)`.
    AssignmentOutOfRange {
        /// Index of the offending sample.
        index: usize,
        /// The out-of-range cluster id.
        cluster: usize,
        /// Number of clusters in the current configuration.
        k: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::UnassignedSample { index } => {
                write!(f, "sample {index} has no cluster assignment")
            }
            Error::AssignmentOutOfRange { index, cluster, k } => {
                write!(f, "sample {index} assigned to cluster {cluster}, but k = {k}")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

impl std::error::Error for Error {}
