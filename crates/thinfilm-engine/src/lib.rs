//! # thinfilm-engine
//!
//! The characteristic-matrix propagation engine: amplitude and power
//! observables for a coated [`stack::Filter`], the incoherent backside
//! (substrate) combiner, and the graded-index discretizer that turns a
//! continuous index profile into sublayers the matrix engine can consume
//! directly.
//!
//! ## Architecture
//!
//! - [`stack`]: the [`stack::Filter`]/[`stack::Layer`] data model.
//! - [`sin2theta`]: the Snell invariant shared by every sublayer.
//! - [`matrix_engine`]: per-sublayer and stack characteristic matrices,
//!   with optional wavelength-derivative propagation.
//! - [`amplitude`]: ties the catalog, stack, and matrix engine together
//!   into `r_s, r_p, t_s, t_p` for the coherent front stack.
//! - [`backside`]: power observables, ellipsometric Ψ/Δ, and the
//!   incoherent substrate combiner.
//! - [`discretize`]: the graded-index-profile-to-ladder-sublayers
//!   algorithm and its inverse.
//! - [`phase`]: group delay and group-delay dispersion from `r`, `dr/dλ`.
//! - [`error`]: the engine's error taxonomy.

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod amplitude;
pub mod backside;
pub mod discretize;
pub mod error;
pub mod matrix_engine;
pub mod phase;
pub mod sin2theta;
pub mod stack;

pub use amplitude::{compute_front_coherent, AmplitudeResult};
pub use backside::{compute_coherent, compute_with_backside, Observables};
pub use discretize::{discretize as discretize_profile, steps_to_profile, DiscreteStep, ProfilePoint};
pub use error::{EngineError, Result};
pub use matrix_engine::{compute_amplitude, Amplitude, SublayerSpec};
pub use phase::{gdd_fs2, group_delay_fs};
pub use sin2theta::Sin2Theta;
pub use stack::{Filter, Layer, Polarization, Side, Sublayer};
