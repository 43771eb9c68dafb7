use serde::{Deserialize, Serialize};

use crate::config::LATTICE_TOLERANCE;
use crate::errors::InvalidLattice;
use crate::interfaces::Axis;

/// The six scalar cell parameters: lengths a, b, c and angles α, β, γ in degrees.
///
/// α is the angle between b and c, β between a and c, γ between a and b.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeParameters {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl LatticeParameters {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// Cubic cell with edge length `a`
    pub fn cubic(a: f64) -> Self {
        Self::new(a, a, a, 90.0, 90.0, 90.0)
    }

    /// Tetragonal cell (a = b ≠ c, all angles 90°)
    pub fn tetragonal(a: f64, c: f64) -> Self {
        Self::new(a, a, c, 90.0, 90.0, 90.0)
    }

    /// Hexagonal cell (a = b, γ = 120°)
    pub fn hexagonal(a: f64, c: f64) -> Self {
        Self::new(a, a, c, 90.0, 90.0, 120.0)
    }

    pub fn lengths(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Angles in degrees, ordered (α, β, γ)
    pub fn angles(&self) -> [f64; 3] {
        [self.alpha, self.beta, self.gamma]
    }

    /// `1 - cos²α - cos²β - cos²γ + 2 cosα cosβ cosγ`, i.e. (V / abc)².
    ///
    /// Positive exactly when the normalised Gram matrix is positive definite.
    pub fn gram_determinant(&self) -> f64 {
        let [ca, cb, cg] = self.angles().map(|angle| angle.to_radians().cos());
        1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg
    }

    /// Check every physical constraint, reporting the first one that fails.
    pub fn validate(&self) -> Result<(), InvalidLattice> {
        let fields = [
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(InvalidLattice::NonFinite {
                field: name.to_string(),
            });
        }

        for (axis, value) in [(Axis::A, self.a), (Axis::B, self.b), (Axis::C, self.c)] {
            if value <= 0.0 {
                return Err(InvalidLattice::NonPositiveLength { axis, value });
            }
        }

        for (axis, value) in [
            (Axis::A, self.alpha),
            (Axis::B, self.beta),
            (Axis::C, self.gamma),
        ] {
            if value <= 0.0 || value >= 180.0 {
                return Err(InvalidLattice::AngleOutOfRange { axis, value });
            }
        }

        let gram_determinant = self.gram_determinant();
        if gram_determinant <= LATTICE_TOLERANCE {
            return Err(InvalidLattice::NotPositiveDefinite { gram_determinant });
        }

        Ok(())
    }

    /// Unit cell volume `V = abc·sqrt(gram_determinant)`, `None` for invalid cells.
    pub fn volume(&self) -> Option<f64> {
        self.validate().ok()?;
        Some(self.a * self.b * self.c * self.gram_determinant().sqrt())
    }
}

impl Default for LatticeParameters {
    fn default() -> Self {
        Self::cubic(1.0)
    }
}
