// Definitions that are used throughout all modules

use serde::{Deserialize, Serialize};

// Enumeration to track the space type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    Real,
    Reciprocal,
}

// Lattice axis, used to name the offending parameter in validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    A,
    B,
    C,
}

impl Axis {
    /// Length symbol (a, b, c)
    pub fn length_symbol(&self) -> &'static str {
        match self {
            Axis::A => "a",
            Axis::B => "b",
            Axis::C => "c",
        }
    }

    /// Symbol of the angle opposite to this axis (alpha is between b and c, ...)
    pub fn angle_symbol(&self) -> &'static str {
        match self {
            Axis::A => "alpha",
            Axis::B => "beta",
            Axis::C => "gamma",
        }
    }
}
