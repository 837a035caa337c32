//! Filter (stack) data model: layers, sublayers, substrate and media.

use thinfilm_core::WavelengthGrid;
use thinfilm_materials::MaterialId;

/// Which side of the substrate a layer sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Front (incidence) side.
    Front,
    /// Back (exit) side.
    Back,
}

/// Polarization state requested for an amplitude computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarization {
    /// s-polarization (TE).
    S,
    /// p-polarization (TM).
    P,
    /// Both, evaluated independently.
    Mixed,
}

/// One homogeneous sublayer: a precomputed complex index array and a
/// physical thickness. This is the unit the characteristic-matrix engine
/// consumes directly, whether it came from a plain homogeneous [`Layer`]
/// or from discretizing a [`GradedProfile`].
#[derive(Debug, Clone)]
pub struct Sublayer {
    /// Complex refractive index at each wavelength of the filter's grid.
    pub index: Vec<thinfilm_core::Complex>,
    /// Physical thickness, nm.
    pub thickness_nm: f64,
}

/// A layer in the front or back sequence: either a single homogeneous
/// material slab, or a sequence of sublayers built by the graded-index
/// discretizer from a continuous profile.
#[derive(Debug, Clone)]
pub enum Layer {
    /// A single homogeneous material of given thickness.
    Homogeneous {
        /// Material id in the owning [`thinfilm_materials::MaterialCatalog`].
        material_id: MaterialId,
        /// Mixing-coordinate value, if the material is a mixture.
        mix_value: Option<f64>,
        /// Thickness, nm. Zero is valid (identity sublayer).
        thickness_nm: f64,
    },
    /// A graded layer, already discretized into homogeneous sublayers.
    Graded(Vec<Sublayer>),
}

impl Layer {
    /// Total physical thickness of this layer.
    pub fn thickness_nm(&self) -> f64 {
        match self {
            Layer::Homogeneous { thickness_nm, .. } => *thickness_nm,
            Layer::Graded(subs) => subs.iter().map(|s| s.thickness_nm).sum(),
        }
    }
}

/// An ordered front-side and back-side layer sequence around a substrate,
/// plus front/back ambient media and the evaluation grid.
#[derive(Debug, Clone)]
pub struct Filter {
    /// Front-side layers, index 0 closest to the substrate.
    pub front: Vec<Layer>,
    /// Back-side layers, index 0 closest to the substrate.
    pub back: Vec<Layer>,
    /// Substrate material id.
    pub substrate_id: MaterialId,
    /// Substrate physical thickness, nm. Must be `> 0` for backside mode.
    pub substrate_thickness_nm: f64,
    /// Front (incidence) ambient medium material id.
    pub front_medium_id: MaterialId,
    /// Back (exit) ambient medium material id.
    pub back_medium_id: MaterialId,
    /// Center (design) wavelength, nm.
    pub center_wavelength_nm: f64,
    /// The wavelength grid every spectral array is evaluated on.
    pub grid: WavelengthGrid,
}

impl Filter {
    /// Build a bare-substrate filter (no coatings) — used both directly
    /// and as the canonical "identity stack" test fixture.
    pub fn bare(
        substrate_id: impl Into<MaterialId>,
        substrate_thickness_nm: f64,
        front_medium_id: impl Into<MaterialId>,
        back_medium_id: impl Into<MaterialId>,
        center_wavelength_nm: f64,
        grid: WavelengthGrid,
    ) -> Self {
        Self {
            front: Vec::new(),
            back: Vec::new(),
            substrate_id: substrate_id.into(),
            substrate_thickness_nm,
            front_medium_id: front_medium_id.into(),
            back_medium_id: back_medium_id.into(),
            center_wavelength_nm,
            grid,
        }
    }

    /// Append a homogeneous layer to the front stack (outermost last).
    pub fn with_front_layer(mut self, layer: Layer) -> Self {
        self.front.push(layer);
        self
    }

    /// Append a homogeneous layer to the back stack.
    pub fn with_back_layer(mut self, layer: Layer) -> Self {
        self.back.push(layer);
        self
    }
}
