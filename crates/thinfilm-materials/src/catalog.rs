//! Material catalog: materials are loaded once and shared read-only across
//! all filters.

use std::collections::HashMap;
use std::sync::Arc;

use thinfilm_core::{Complex, Error, Result};

use crate::dispersion::{Dispersion, Index};
use crate::ladder::StepLadder;
use crate::mixture::Mixture;

/// A material's identity within a [`MaterialCatalog`].
pub type MaterialId = String;

/// Either a fixed dispersion or a mixture, evaluated through the same
/// [`Index`]-shaped capability set an engine call site needs, plus the
/// mixture-only operations (`evaluate(x, lambda)`, `inverse_at_center`).
#[derive(Debug, Clone)]
pub enum MaterialKind {
    /// A single dispersion model, with no mixing coordinate.
    Fixed(Dispersion),
    /// A mixture parameterized by a mixing coordinate `x`.
    Mixture(Mixture),
}

/// One entry in the catalog: a dispersion/mixture plus its deposition step
/// ladder.
#[derive(Debug, Clone)]
pub struct Material {
    /// Human-readable name.
    pub name: String,
    /// The dispersion or mixture model.
    pub kind: MaterialKind,
    /// Intrinsic deposition steps, if the process realizes only discrete
    /// index values; otherwise `None` and the caller builds a uniform
    /// ladder via [`StepLadder::uniform`].
    pub deposition_steps: Option<Vec<f64>>,
}

impl Material {
    /// Build a fixed-dispersion material.
    pub fn fixed(name: impl Into<String>, dispersion: Dispersion) -> Self {
        Self { name: name.into(), kind: MaterialKind::Fixed(dispersion), deposition_steps: None }
    }

    /// Build a mixture material.
    pub fn mixture(name: impl Into<String>, mixture: Mixture) -> Self {
        Self { name: name.into(), kind: MaterialKind::Mixture(mixture), deposition_steps: None }
    }

    /// Attach intrinsic deposition steps.
    pub fn with_deposition_steps(mut self, steps: Vec<f64>) -> Self {
        self.deposition_steps = Some(steps);
        self
    }

    /// Whether this material is a mixture.
    pub fn is_mixture(&self) -> bool {
        matches!(self.kind, MaterialKind::Mixture(_))
    }

    /// Evaluate `N(lambda)` for a fixed material, or `N(x, lambda)` for a
    /// mixture at the given `x` (ignored for fixed materials).
    pub fn index_at(&mut self, x: Option<f64>, lambda_nm: f64) -> Complex {
        match &mut self.kind {
            MaterialKind::Fixed(d) => d.index_at(lambda_nm),
            MaterialKind::Mixture(m) => m.evaluate(x.unwrap_or(0.0), lambda_nm),
        }
    }

    /// `dN/dlambda`, mixture-`x`-aware like [`Material::index_at`].
    pub fn dindex_dlambda_at(&mut self, x: Option<f64>, lambda_nm: f64) -> Complex {
        match &mut self.kind {
            MaterialKind::Fixed(d) => d.dindex_dlambda_at(lambda_nm),
            MaterialKind::Mixture(m) => m.dindex_dlambda(x.unwrap_or(0.0), lambda_nm),
        }
    }

    /// The material's step ladder at `lambda_c_nm`: intrinsic deposition
    /// steps if present, otherwise a uniform grid of spacing `delta_n`
    /// clamped to the real-index range realized across the mixture's `X`
    /// samples at that wavelength.
    pub fn step_ladder(&mut self, delta_n: f64, lambda_c_nm: f64) -> StepLadder {
        if let Some(steps) = &self.deposition_steps {
            return StepLadder::from_steps(steps.clone());
        }
        let (n_min, n_max) = match &mut self.kind {
            MaterialKind::Fixed(d) => d.index_range(),
            MaterialKind::Mixture(m) => {
                let xs = m.x_values().to_vec();
                let mut lo = f64::INFINITY;
                let mut hi = f64::NEG_INFINITY;
                for x in xs {
                    let n = m.evaluate(x, lambda_c_nm).re;
                    lo = lo.min(n);
                    hi = hi.max(n);
                }
                (lo.min(hi), lo.max(hi))
            }
        };
        StepLadder::uniform(n_min, n_max, delta_n)
    }
}

/// A read-only catalog of materials, shared across filters. Cheap to
/// clone (`Arc`-backed).
#[derive(Debug, Clone)]
pub struct MaterialCatalog {
    materials: Arc<HashMap<MaterialId, Material>>,
}

impl MaterialCatalog {
    /// Build a catalog from a finished set of materials.
    pub fn new(materials: HashMap<MaterialId, Material>) -> Self {
        Self { materials: Arc::new(materials) }
    }

    /// Look up a material by id.
    pub fn get(&self, id: &str) -> Result<&Material> {
        self.materials.get(id).ok_or_else(|| Error::Parse {
            message: format!("unknown material id: {id}"),
        })
    }

    /// Number of materials in the catalog.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the catalog has no materials.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_round_trips() {
        let mut map = HashMap::new();
        map.insert(
            "BK7".to_string(),
            Material::fixed("BK7", Dispersion::Constant(Complex::real(1.52))),
        );
        let catalog = MaterialCatalog::new(map);
        let mut m = catalog.get("BK7").unwrap().clone();
        assert!((m.index_at(None, 550.0).re - 1.52).abs() < 1e-12);
    }

    #[test]
    fn unknown_id_is_parse_error() {
        let catalog = MaterialCatalog::new(HashMap::new());
        assert!(catalog.get("nope").is_err());
    }
}
