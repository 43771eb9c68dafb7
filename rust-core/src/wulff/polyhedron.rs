use std::collections::BTreeSet;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Absolute slack of the containment test
const EPS: f64 = 1.0e-10;

/// Indexed mesh form of a convex polyhedron, ready for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyhedron {
    /// Vertices of the polyhedron (Cartesian)
    pub vertices: Vec<Vector3<f64>>,
    /// Edges as pairs of vertex indices, smaller index first
    pub edges: Vec<(usize, usize)>,
    /// Faces as loops of vertex indices, counter-clockwise seen from outside
    pub faces: Vec<Vec<usize>>,
    /// Enclosed volume
    pub measure: f64,
}

impl Polyhedron {
    /// Create a new empty polyhedron
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            measure: 0.0,
        }
    }

    /// Assemble from vertices and face loops; edges are derived from the faces.
    pub fn from_faces(vertices: Vec<Vector3<f64>>, faces: Vec<Vec<usize>>, measure: f64) -> Self {
        let edges = extract_edges_from_faces(&faces);
        Self {
            vertices,
            edges,
            faces,
            measure,
        }
    }

    /// `true` if `point` lies inside the convex polyhedron or on its boundary.
    /// Face winding does not matter.
    pub fn contains(&self, point: Vector3<f64>) -> bool {
        if self.faces.is_empty() || self.vertices.is_empty() {
            return false;
        }

        // Mean of the vertices is interior for a convex polyhedron
        let centroid = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v)
            / self.vertices.len() as f64;

        for face in &self.faces {
            if face.len() < 3 {
                continue;
            }

            let v0 = self.vertices[face[0]];
            let v1 = self.vertices[face[1]];
            let v2 = self.vertices[face[2]];

            let Some(mut normal) = (v1 - v0).cross(&(v2 - v0)).try_normalize(f64::MIN_POSITIVE)
            else {
                continue;
            };

            // Outward
            if normal.dot(&(centroid - v0)) > 0.0 {
                normal = -normal;
            }

            if normal.dot(&(point - v0)) > EPS {
                return false;
            }
        }
        true
    }

    /// Euler characteristic V − E + F (2 for a closed convex polyhedron)
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edges.len() as i64 + self.faces.len() as i64
    }

    /// Get the enclosed volume
    pub fn measure(&self) -> f64 {
        self.measure
    }

    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }
}

impl Default for Polyhedron {
    fn default() -> Self {
        Self::new()
    }
}

// Extract unique edges from face definitions
fn extract_edges_from_faces(faces: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let mut unique_edges: BTreeSet<(usize, usize)> = BTreeSet::new();

    for face in faces {
        for window in face.windows(2) {
            unique_edges.insert(normalized_edge(window[0], window[1]));
        }
        // Close the face by connecting last to first
        if let (Some(&first), Some(&last)) = (face.first(), face.last()) {
            if first != last {
                unique_edges.insert(normalized_edge(last, first));
            }
        }
    }

    unique_edges.into_iter().collect()
}

// Edge with normalized ordering (smaller index first)
fn normalized_edge(i: usize, j: usize) -> (usize, usize) {
    if i < j {
        (i, j)
    } else {
        (j, i)
    }
}
