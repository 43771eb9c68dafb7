// Constants

// Tolerances
pub const LATTICE_TOLERANCE: f64 = 1e-10; // Gram determinant and basis invertibility
pub const PARALLEL_TOLERANCE: f64 = 1e-8; // 1 - cos(angle) below which two facet normals coincide
pub const ON_PLANE_TOLERANCE: f64 = 1e-8; // Relative to shape extent, vertex-on-facet test
pub const VERTEX_MERGE_TOLERANCE: f64 = 1e-8; // Relative to shape extent, vertex deduplication
pub const HULL_TOLERANCE: f64 = 1e-10; // Relative to dual point cloud extent
pub const ANGLE_TIE_TOLERANCE: f64 = 1e-9; // Radians, polygon ordering tie-break

// Display
pub const LOOKUP_ENERGY_DECIMALS: i32 = 3; // Surface energies shown in a rebuilt facet table
