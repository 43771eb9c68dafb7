//! # QuickHull
//!
//! 3D convex hull of the dual point set.
//!
//! 1. Pick an initial tetrahedron from the axis-extreme points
//! 2. Assign every other point to the first face it lies in front of
//! 3. Repeatedly take the farthest outside point of some face, delete all faces
//!    it can see and fan new faces from the horizon to it
//! 4. Stop when no face has outside points
//!
//! Face indices refer to the caller's point slice, so hull vertices map back to
//! the constraints that produced them. Points lying on an existing face (within
//! tolerance) are treated as inside.

use std::collections::HashMap;

use nalgebra::Vector3;
use thiserror::Error;

use crate::config::HULL_TOLERANCE;

#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum HullError {
    #[error("convex hull requires at least 4 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("point {index} is not finite")]
    NonFinite { index: usize },

    #[error("all points are collinear")]
    Collinear,

    #[error("all points are coplanar")]
    Coplanar,

    #[error("zero-area face created while expanding the hull")]
    DegenerateFace,

    #[error("hull expansion did not terminate after {iterations} iterations")]
    DidNotConverge { iterations: usize },
}

/// Triangular hull face, counter-clockwise when viewed from outside.
#[derive(Debug, Clone)]
pub(crate) struct HullFace {
    pub vertices: [usize; 3],
    /// Outward unit normal
    pub normal: Vector3<f64>,
    /// Plane offset, `normal · x = offset` on the face
    pub offset: f64,
    outside_points: Vec<usize>,
}

impl HullFace {
    fn new(vertices: [usize; 3], points: &[Vector3<f64>]) -> Option<Self> {
        let [v0, v1, v2] = vertices;
        let normal = (points[v1] - points[v0])
            .cross(&(points[v2] - points[v0]))
            .try_normalize(f64::MIN_POSITIVE)?;
        Some(Self {
            vertices,
            normal,
            offset: normal.dot(&points[v0]),
            outside_points: Vec::new(),
        })
    }

    /// Face whose normal points away from `interior`
    fn outward(
        vertices: [usize; 3],
        interior: &Vector3<f64>,
        points: &[Vector3<f64>],
    ) -> Option<Self> {
        let face = Self::new(vertices, points)?;
        if face.signed_distance(interior) > 0.0 {
            let [v0, v1, v2] = vertices;
            Self::new([v0, v2, v1], points)
        } else {
            Some(face)
        }
    }

    pub fn signed_distance(&self, point: &Vector3<f64>) -> f64 {
        self.normal.dot(point) - self.offset
    }

    fn farthest_outside_point(&self, points: &[Vector3<f64>]) -> Option<usize> {
        self.outside_points.iter().copied().max_by(|&a, &b| {
            self.signed_distance(&points[a])
                .total_cmp(&self.signed_distance(&points[b]))
        })
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [v0, v1, v2] = self.vertices;
        [(v0, v1), (v1, v2), (v2, v0)]
    }
}

/// Triangulated convex hull.
#[derive(Debug, Clone)]
pub(crate) struct ConvexHull {
    pub faces: Vec<HullFace>,
    /// Absolute tolerance the hull was built with
    pub epsilon: f64,
}

impl ConvexHull {
    /// True when the origin is inside the hull and at least `epsilon` away from every face
    pub fn contains_origin_strictly(&self) -> bool {
        self.faces.iter().all(|face| face.offset > self.epsilon)
    }
}

/// Compute the convex hull of `points`.
pub(crate) fn convex_hull(points: &[Vector3<f64>]) -> Result<ConvexHull, HullError> {
    if points.len() < 4 {
        return Err(HullError::TooFewPoints {
            count: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.iter().all(|x| x.is_finite())) {
        return Err(HullError::NonFinite { index });
    }

    let extent = points.iter().map(|p| p.norm()).fold(0.0_f64, f64::max);
    let epsilon = HULL_TOLERANCE * extent.max(f64::MIN_POSITIVE);

    let simplex = initial_simplex(points, epsilon)?;
    let interior = simplex.iter().map(|&i| points[i]).sum::<Vector3<f64>>() / 4.0;

    let [p0, p1, p2, p3] = simplex;
    let mut faces = Vec::with_capacity(2 * points.len());
    for vertices in [[p0, p1, p2], [p0, p2, p3], [p0, p3, p1], [p1, p3, p2]] {
        faces.push(HullFace::outward(vertices, &interior, points).ok_or(HullError::Coplanar)?);
    }

    let remaining: Vec<usize> = (0..points.len())
        .filter(|i| !simplex.contains(i))
        .collect();
    assign_outside_points(&mut faces, &remaining, points, epsilon);

    expand(&mut faces, &interior, points, epsilon)?;

    Ok(ConvexHull { faces, epsilon })
}

fn initial_simplex(points: &[Vector3<f64>], epsilon: f64) -> Result<[usize; 4], HullError> {
    // Extreme points on each axis
    let mut extremes = [0usize; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[2 * axis]][axis] {
                extremes[2 * axis] = i;
            }
            if p[axis] > points[extremes[2 * axis + 1]][axis] {
                extremes[2 * axis + 1] = i;
            }
        }
    }

    // Two extremes with maximum separation
    let mut best = (extremes[0], extremes[1]);
    let mut max_distance = 0.0;
    for (i, &a) in extremes.iter().enumerate() {
        for &b in extremes.iter().skip(i + 1) {
            let distance = (points[a] - points[b]).norm();
            if distance > max_distance {
                max_distance = distance;
                best = (a, b);
            }
        }
    }
    if max_distance <= epsilon {
        return Err(HullError::Collinear);
    }
    let (p0, p1) = best;

    // Farthest from the line p0-p1
    let direction = (points[p1] - points[p0]) / max_distance;
    let (p2, line_distance) = farthest(points, |p| {
        let v = p - points[p0];
        (v - direction * v.dot(&direction)).norm()
    });
    if line_distance <= epsilon {
        return Err(HullError::Collinear);
    }

    // Farthest from the plane p0-p1-p2
    let normal = (points[p1] - points[p0])
        .cross(&(points[p2] - points[p0]))
        .try_normalize(f64::MIN_POSITIVE)
        .ok_or(HullError::Collinear)?;
    let (p3, plane_distance) = farthest(points, |p| normal.dot(&(p - points[p0])).abs());
    if plane_distance <= epsilon {
        return Err(HullError::Coplanar);
    }

    Ok([p0, p1, p2, p3])
}

fn farthest<F>(points: &[Vector3<f64>], distance: F) -> (usize, f64)
where
    F: Fn(&Vector3<f64>) -> f64,
{
    points
        .iter()
        .enumerate()
        .map(|(i, p)| (i, distance(p)))
        .fold((0, f64::NEG_INFINITY), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
}

fn assign_outside_points(
    faces: &mut [HullFace],
    candidates: &[usize],
    points: &[Vector3<f64>],
    epsilon: f64,
) {
    for &index in candidates {
        if let Some(face) = faces
            .iter_mut()
            .find(|face| face.signed_distance(&points[index]) > epsilon)
        {
            face.outside_points.push(index);
        }
    }
}

fn expand(
    faces: &mut Vec<HullFace>,
    interior: &Vector3<f64>,
    points: &[Vector3<f64>],
    epsilon: f64,
) -> Result<(), HullError> {
    // Every iteration consumes one apex point
    let max_iterations = points.len();

    for _ in 0..=max_iterations {
        let Some(apex) = faces
            .iter()
            .find(|face| !face.outside_points.is_empty())
            .and_then(|face| face.farthest_outside_point(points))
        else {
            return Ok(());
        };

        let visible: Vec<bool> = faces
            .iter()
            .map(|face| face.signed_distance(&points[apex]) > epsilon)
            .collect();

        let horizon = horizon_edges(faces, &visible);

        let mut orphans = Vec::new();
        let mut kept = Vec::with_capacity(faces.len());
        for (face, is_visible) in faces.drain(..).zip(visible) {
            if is_visible {
                orphans.extend(face.outside_points.into_iter().filter(|&p| p != apex));
            } else {
                kept.push(face);
            }
        }
        *faces = kept;

        let first_new = faces.len();
        for (a, b) in horizon {
            let face = HullFace::outward([a, b, apex], interior, points)
                .ok_or(HullError::DegenerateFace)?;
            faces.push(face);
        }

        assign_outside_points(&mut faces[first_new..], &orphans, points, epsilon);
    }

    Err(HullError::DidNotConverge {
        iterations: max_iterations,
    })
}

/// Directed edges of visible faces whose twin belongs to a hidden face
fn horizon_edges(faces: &[HullFace], visible: &[bool]) -> Vec<(usize, usize)> {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
    for (face, _) in faces.iter().zip(visible).filter(|(_, v)| **v) {
        for (a, b) in face.edges() {
            *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }
    }

    faces
        .iter()
        .zip(visible)
        .filter(|(_, v)| **v)
        .flat_map(|(face, _)| face.edges())
        .filter(|&(a, b)| edge_count[&(a.min(b), a.max(b))] == 1)
        .collect()
}
