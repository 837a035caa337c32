//! Crate-wide error taxonomy.
//!
//! Hand-rolled enum plus manual `Display` and `std::error::Error` impls,
//! no `thiserror`/`anyhow`.

use std::fmt;

/// Errors raised during initialization of dispersion models, mixtures, and
/// graded-profile discretization. The characteristic-matrix engine itself
/// is total over well-formed inputs and never returns this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A requested index lies outside a material's supported range by more
    /// than `sqrt(f64::EPSILON)`.
    OutOfRange {
        /// The value that was requested.
        requested: f64,
        /// Lower bound of the supported range.
        min: f64,
        /// Upper bound of the supported range.
        max: f64,
    },
    /// A mixture's `n(X, lambda)` is not strictly monotone in `X`, so no
    /// monotone PCHIP can be built over the mixing coordinate.
    NotMonotone {
        /// Wavelength (nm) at which monotonicity failed.
        wavelength_nm: f64,
    },
    /// A graded profile cannot be discretized onto the given ladder while
    /// respecting the minimum sublayer thickness.
    Unrealizable {
        /// Human-readable explanation of which repair step ran out of room.
        reason: &'static str,
    },
    /// An observer/illuminant/material file is malformed. Raised by the
    /// (external) loader and surfaced unchanged by the core's consumers.
    Parse {
        /// Description of the parse failure.
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { requested, min, max } => write!(
                f,
                "value {requested} is out of range [{min}, {max}] beyond tolerance"
            ),
            Self::NotMonotone { wavelength_nm } => {
                write!(f, "mixture is not monotone at {wavelength_nm} nm")
            }
            Self::Unrealizable { reason } => write!(f, "cannot discretize: {reason}"),
            Self::Parse { message } => write!(f, "parse error: {message}"),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;
