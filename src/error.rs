#[cfg(not(feature = "std"))]
use core as std;

use std::fmt;

/// All possible errors that this crate can produce.
///
/// Every error is local to a single call. None of them can leave the clock sequence of a
/// [`V1Generator`](crate::V1Generator) in a modified state, because arguments are validated before
/// the generator state is touched.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A fixed-size byte argument has the wrong length.
    InvalidArgumentLength {
        /// Name of the offending argument (e.g., `"node"`).
        argument: &'static str,
        /// Required number of bytes.
        expected: usize,
        /// Number of bytes actually given.
        found: usize,
    },

    /// The text does not match any recognized UUID grammar.
    MalformedText,

    /// The value is a structurally valid UUID of a version or variant other than the one
    /// requested.
    VersionMismatch {
        /// Version of the requested identifier family.
        expected: u8,
        /// Version found in the value, or `None` if the variant is not `10`.
        found: Option<u8>,
    },

    /// The format specifier is not one of `N`, `D`, `B`, `P`, or `U`.
    UnknownFormat,
}

impl Error {
    pub(crate) const fn length(argument: &'static str, expected: usize, found: usize) -> Self {
        Self::InvalidArgumentLength {
            argument,
            expected,
            found,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::InvalidArgumentLength {
                argument,
                expected,
                found,
            } => write!(
                f,
                "invalid length of {}: expected {} bytes, found {}",
                argument, expected, found
            ),
            Self::MalformedText => write!(f, "invalid string representation"),
            Self::VersionMismatch {
                expected,
                found: Some(found),
            } => write!(f, "expected UUID version {}, found {}", expected, found),
            Self::VersionMismatch {
                expected,
                found: None,
            } => write!(
                f,
                "expected UUID version {}, found non-RFC variant",
                expected
            ),
            Self::UnknownFormat => write!(f, "unknown format specifier"),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}
