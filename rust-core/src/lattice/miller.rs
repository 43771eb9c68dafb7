use std::fmt;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Integer triple (h, k, l) naming a family of lattice planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MillerIndex {
    pub h: i32,
    pub k: i32,
    pub l: i32,
}

impl MillerIndex {
    pub fn new(h: i32, k: i32, l: i32) -> Self {
        Self { h, k, l }
    }

    /// (0 0 0) names no plane
    pub fn is_zero(&self) -> bool {
        self.h == 0 && self.k == 0 && self.l == 0
    }

    /// The opposite plane (−h −k −l)
    pub fn negated(&self) -> Self {
        Self::new(-self.h, -self.k, -self.l)
    }

    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(self.h as f64, self.k as f64, self.l as f64)
    }
}

impl From<[i32; 3]> for MillerIndex {
    fn from([h, k, l]: [i32; 3]) -> Self {
        Self::new(h, k, l)
    }
}

impl From<MillerIndex> for [i32; 3] {
    fn from(index: MillerIndex) -> Self {
        [index.h, index.k, index.l]
    }
}

impl fmt::Display for MillerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.h, self.k, self.l)
    }
}
