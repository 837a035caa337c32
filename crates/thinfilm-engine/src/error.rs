//! Engine-level error taxonomy: thin wrapper over [`thinfilm_core::Error`]
//! for the one failure mode that is genuinely the engine's own
//! (discretization giving up). One hand-rolled enum per crate, no
//! `thiserror`.

use std::fmt;

use thinfilm_core::Error as CoreError;

/// Errors raised by the engine crate: discretization and backside
/// combination surface [`thinfilm_core::Error`] directly through
/// [`From`]; this only adds the engine-specific "empty stack" case.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Propagated from [`thinfilm_core`] or [`thinfilm_materials`]
    /// (both share the same `Error` type).
    Core(CoreError),
    /// A [`crate::stack::Filter`] had a non-positive substrate thickness
    /// while backside combination was requested.
    MissingSubstrateThickness,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(e) => write!(f, "{e}"),
            Self::MissingSubstrateThickness => {
                write!(f, "backside combination requires a positive substrate thickness")
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        Self::Core(e)
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
