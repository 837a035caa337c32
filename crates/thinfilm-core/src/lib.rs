//! # thinfilm-core
//!
//! Numerical foundation for the thin-film optical engine: complex
//! arithmetic, 2x2 characteristic matrices (with their wavelength
//! derivatives), wavelength grids, monotone cubic Hermite interpolation
//! (PCHIP), and the crate-wide error taxonomy.
//!
//! This crate has no required third-party dependencies, keeping the
//! numerical foundation portable and its floating-point behavior
//! deterministic. `serde` is available behind a feature for callers that
//! need to persist grids or catalogs.
//!
//! ## Architecture
//!
//! - [`complex`]: the [`complex::Complex`] type and its branch-selected
//!   `sqrt`, used for admittances and phase factors.
//! - [`matrix`]: 2x2 complex matrices ([`matrix::Matrix2`]) paired with
//!   their wavelength derivative ([`matrix::DMatrix2`]).
//! - [`grid`]: [`grid::WavelengthGrid`], an identity-keyed ordered
//!   wavelength sequence.
//! - [`pchip`]: [`pchip::Pchip`], the monotone cubic Hermite interpolator.
//! - [`error`]: the shared [`error::Error`] taxonomy.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod complex;
pub mod error;
pub mod grid;
pub mod math;
pub mod matrix;
pub mod pchip;

pub use complex::Complex;
pub use error::{Error, Result};
pub use grid::WavelengthGrid;
pub use matrix::{DMatrix2, Matrix2};
pub use pchip::Pchip;
