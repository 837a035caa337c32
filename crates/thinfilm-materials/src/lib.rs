//! # thinfilm-materials
//!
//! Dispersion models, mixtures, step ladders, and the read-only material
//! catalog consumed by the characteristic-matrix engine.
//!
//! ## Architecture
//!
//! - [`dispersion`]: [`dispersion::Dispersion`] (Constant/Table/Cauchy/
//!   Sellmeier) and the [`dispersion::Index`] capability trait.
//! - [`mixture`]: [`mixture::Mixture`], mixing-coordinate PCHIP with the
//!   two-slot center/other-wavelength cache.
//! - [`ladder`]: [`ladder::StepLadder`], the discrete deposition-index
//!   ladder consumed by the graded-index discretizer.
//! - [`catalog`]: [`catalog::Material`] and [`catalog::MaterialCatalog`].

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod catalog;
pub mod dispersion;
pub mod ladder;
pub mod mixture;

pub use catalog::{Material, MaterialCatalog, MaterialId, MaterialKind};
pub use dispersion::{CauchyParams, Dispersion, Index, SellmeierParams, TableDispersion};
pub use ladder::StepLadder;
pub use mixture::Mixture;
