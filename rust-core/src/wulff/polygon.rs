// Planar polygon helpers for facet boundaries: local frames, angular ordering and area

use std::cmp::Ordering;

use nalgebra::{Vector2, Vector3};

use crate::config::ANGLE_TIE_TOLERANCE;

/// Orthonormal in-plane axes (u, w) with u × w = normal.
pub fn plane_frame(normal: &Vector3<f64>) -> (Vector3<f64>, Vector3<f64>) {
    let helper = if normal.x.abs() < 0.9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        Vector3::new(0.0, 1.0, 0.0)
    };
    let u = (helper - normal * normal.dot(&helper)).normalize();
    let w = normal.cross(&u);
    (u, w)
}

/// Arithmetic mean of the points
pub fn centroid(points: &[Vector3<f64>]) -> Vector3<f64> {
    if points.is_empty() {
        return Vector3::zeros();
    }
    points.iter().sum::<Vector3<f64>>() / points.len() as f64
}

/// Project points into the plane frame, relative to `origin`.
pub fn project_to_plane(
    points: &[Vector3<f64>],
    origin: &Vector3<f64>,
    normal: &Vector3<f64>,
) -> Vec<Vector2<f64>> {
    let (u, w) = plane_frame(normal);
    points
        .iter()
        .map(|p| {
            let d = p - origin;
            Vector2::new(d.dot(&u), d.dot(&w))
        })
        .collect()
}

/// Order coplanar points counter-clockwise around their centroid, as seen from
/// the side `normal` points to.
///
/// Returns a permutation of `0..points.len()`. Angles closer than
/// `ANGLE_TIE_TOLERANCE` fall back to lexicographic coordinate order.
pub fn counter_clockwise_order(points: &[Vector3<f64>], normal: &Vector3<f64>) -> Vec<usize> {
    let center = centroid(points);
    let projected = project_to_plane(points, &center, normal);

    let mut keyed: Vec<(i64, usize)> = projected
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let angle = q.y.atan2(q.x);
            ((angle / ANGLE_TIE_TOLERANCE).round() as i64, i)
        })
        .collect();

    keyed.sort_by(|&(bucket_a, a), &(bucket_b, b)| {
        bucket_a
            .cmp(&bucket_b)
            .then_with(|| lexicographic(&points[a], &points[b]))
    });

    keyed.into_iter().map(|(_, i)| i).collect()
}

fn lexicographic(a: &Vector3<f64>, b: &Vector3<f64>) -> Ordering {
    a.x.total_cmp(&b.x)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.z.total_cmp(&b.z))
}

/// Area of an ordered planar polygon in 3D.
pub fn polygon_area(ordered: &[Vector3<f64>], normal: &Vector3<f64>) -> f64 {
    if ordered.len() < 3 {
        return 0.0;
    }
    let projected = project_to_plane(ordered, &centroid(ordered), normal);
    signed_polygon_area(&projected).abs()
}

// Calculate polygon area using the shoelace formula (positive when counter-clockwise)
pub fn signed_polygon_area(vertices: &[Vector2<f64>]) -> f64 {
    let vertex_count = vertices.len();
    let mut area = 0.0;

    for i in 0..vertex_count {
        let (x_i, y_i) = (vertices[i].x, vertices[i].y);
        let (x_j, y_j) = (
            vertices[(i + 1) % vertex_count].x,
            vertices[(i + 1) % vertex_count].y,
        );
        area += x_i * y_j - x_j * y_i;
    }

    0.5 * area
}

/// Largest distance of any point from the plane through `origin` with unit `normal`
pub fn max_plane_deviation(
    points: &[Vector3<f64>],
    origin: &Vector3<f64>,
    normal: &Vector3<f64>,
) -> f64 {
    points
        .iter()
        .map(|p| normal.dot(&(p - origin)).abs())
        .fold(0.0, f64::max)
}
