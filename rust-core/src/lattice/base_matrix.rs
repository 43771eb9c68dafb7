use std::f64::consts::PI;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::LATTICE_TOLERANCE;
use crate::errors::InvalidLattice;
use crate::interfaces::Space;
use crate::lattice::lattice_parameters::LatticeParameters;
use crate::lattice::miller::MillerIndex;

/// Direct and reciprocal basis of a 3D lattice (basis vectors are the matrix columns).
///
/// Built once per set of [`LatticeParameters`] and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeBasis {
    direct: Matrix3<f64>,
    reciprocal: Matrix3<f64>,
}

impl LatticeBasis {
    /// Build the basis in the standard crystallographic setting:
    /// `a` along x, `b` in the xy-plane at angle γ from `a`, `c` closing the cell.
    pub fn from_parameters(params: &LatticeParameters) -> Result<Self, InvalidLattice> {
        params.validate()?;

        let LatticeParameters {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        } = *params;
        let (ca, cb) = (alpha.to_radians().cos(), beta.to_radians().cos());
        let (sg, cg) = gamma.to_radians().sin_cos();
        let gram_determinant = params.gram_determinant();

        let base_1 = Vector3::new(a, 0.0, 0.0);
        let base_2 = Vector3::new(b * cg, b * sg, 0.0);
        let base_3 = Vector3::new(
            c * cb,
            c * (ca - cb * cg) / sg,
            c * gram_determinant.sqrt() / sg,
        );

        Self::from_base_vectors(base_1, base_2, base_3)
    }

    /// Build from explicit direct-space basis vectors.
    pub fn from_base_vectors(
        base_1: Vector3<f64>,
        base_2: Vector3<f64>,
        base_3: Vector3<f64>,
    ) -> Result<Self, InvalidLattice> {
        let direct = Matrix3::from_columns(&[base_1, base_2, base_3]);

        // Linearly non-dependent, relative to the cell size
        let scale = base_1.norm() * base_2.norm() * base_3.norm();
        let determinant = direct.determinant();
        if !(scale > 0.0) || determinant.abs() <= LATTICE_TOLERANCE * scale {
            return Err(InvalidLattice::NotPositiveDefinite {
                gram_determinant: if scale > 0.0 {
                    (determinant / scale).powi(2)
                } else {
                    0.0
                },
            });
        }

        // 2π convention
        let inverse = direct
            .try_inverse()
            .ok_or(InvalidLattice::NotPositiveDefinite {
                gram_determinant: 0.0,
            })?;
        let reciprocal = (2.0 * PI) * inverse.transpose();

        Ok(LatticeBasis { direct, reciprocal })
    }

    pub fn direct(&self) -> &Matrix3<f64> {
        &self.direct
    }

    pub fn reciprocal(&self) -> &Matrix3<f64> {
        &self.reciprocal
    }

    pub fn matrix(&self, space: Space) -> &Matrix3<f64> {
        match space {
            Space::Real => &self.direct,
            Space::Reciprocal => &self.reciprocal,
        }
    }

    pub fn base_vectors(&self, space: Space) -> [Vector3<f64>; 3] {
        let matrix = self.matrix(space);
        [
            matrix.column(0).into(),
            matrix.column(1).into(),
            matrix.column(2).into(),
        ]
    }

    /// Metric tensor G = Aᵀ·A of the direct basis
    pub fn metric(&self) -> Matrix3<f64> {
        self.direct.transpose() * self.direct
    }

    /// Unit cell volume |det A|
    pub fn volume(&self) -> f64 {
        self.direct.determinant().abs()
    }

    /// Recover (a, b, c, α, β, γ) from the metric tensor, angles in degrees.
    pub fn parameters(&self) -> LatticeParameters {
        let metric = self.metric();
        let a = metric[(0, 0)].sqrt();
        let b = metric[(1, 1)].sqrt();
        let c = metric[(2, 2)].sqrt();

        let angle = |cosine: f64| cosine.clamp(-1.0, 1.0).acos().to_degrees();
        LatticeParameters {
            a,
            b,
            c,
            alpha: angle(metric[(1, 2)] / (b * c)),
            beta: angle(metric[(0, 2)] / (a * c)),
            gamma: angle(metric[(0, 1)] / (a * b)),
        }
    }

    /// Reciprocal lattice vector G = h·b₁ + k·b₂ + l·b₃ (Cartesian, not normalised)
    pub fn miller_vector(&self, index: &MillerIndex) -> Vector3<f64> {
        self.reciprocal * index.as_vector()
    }

    /// Outward unit normal of the (hkl) plane, `None` for (0 0 0)
    pub fn miller_normal(&self, index: &MillerIndex) -> Option<Vector3<f64>> {
        if index.is_zero() {
            return None;
        }
        self.miller_vector(index).try_normalize(LATTICE_TOLERANCE)
    }

    /// Interplanar spacing d = 2π / |G|, `None` for (0 0 0)
    pub fn d_spacing(&self, index: &MillerIndex) -> Option<f64> {
        if index.is_zero() {
            return None;
        }
        Some(2.0 * PI / self.miller_vector(index).norm())
    }
}
