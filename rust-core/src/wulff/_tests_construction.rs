#[cfg(test)]
mod _tests_construction {
    use super::super::construction::{construct, plane_constraints};
    use super::super::facet::FacetSet;
    use super::super::polytope::WulffPolytope;
    use crate::errors::Degenerate;
    use crate::lattice::{LatticeBasis, LatticeParameters, MillerIndex};
    use nalgebra::Vector3;

    const TOL: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    fn cubic(a: f64) -> LatticeBasis {
        LatticeBasis::from_parameters(&LatticeParameters::cubic(a)).unwrap()
    }

    fn hexagonal(a: f64, c: f64) -> LatticeBasis {
        LatticeBasis::from_parameters(&LatticeParameters::hexagonal(a, c)).unwrap()
    }

    fn family_100(energy: f64) -> Vec<([i32; 3], f64)> {
        vec![
            ([1, 0, 0], energy),
            ([0, 1, 0], energy),
            ([0, 0, 1], energy),
            ([-1, 0, 0], energy),
            ([0, -1, 0], energy),
            ([0, 0, -1], energy),
        ]
    }

    fn family_111(energy: f64) -> Vec<([i32; 3], f64)> {
        let mut rows = Vec::new();
        for h in [1, -1] {
            for k in [1, -1] {
                for l in [1, -1] {
                    rows.push(([h, k, l], energy));
                }
            }
        }
        rows
    }

    fn facet_set(rows: &[([i32; 3], f64)]) -> FacetSet {
        rows.iter()
            .fold(FacetSet::new(), |set, &(miller, energy)| set.with(miller, energy))
    }

    // Geometric invariants every Wulff shape must satisfy
    fn assert_well_formed(shape: &WulffPolytope) {
        let scale = shape
            .vertices()
            .iter()
            .map(|v| v.norm())
            .fold(0.0_f64, f64::max);

        for facet in &shape.facets {
            assert!(facet.vertices.len() >= 3);
            assert!(facet.area > 0.0);
            assert!(
                facet.planarity_error() <= 1e-8 * scale,
                "facet {} is not planar",
                facet.miller
            );
            // Counter-clockwise seen from outside
            let n = facet.vertices.len();
            for i in 0..n {
                let a = facet.vertices[i];
                let b = facet.vertices[(i + 1) % n];
                let c = facet.vertices[(i + 2) % n];
                assert!((b - a).cross(&(c - b)).dot(&facet.normal) > 0.0);
            }
        }

        // Every vertex satisfies all constraints and is a corner of at least 3 planes
        for vertex in shape.vertices() {
            let mut touching = 0;
            for facet in &shape.facets {
                let distance = facet.normal.dot(vertex) - facet.surface_energy;
                assert!(distance <= 1e-8 * scale);
                if distance.abs() <= 1e-8 * scale {
                    touching += 1;
                }
            }
            assert!(touching >= 3, "vertex {:?} lies on {} planes", vertex, touching);
        }

        let summed: f64 = shape.facets.iter().map(|f| f.area).sum();
        assert!(approx_eq(summed, shape.total_area, TOL * shape.total_area));
        let fractions: f64 = shape.area_fractions().iter().map(|(_, f)| f).sum();
        assert!(approx_eq(fractions, 1.0, TOL));
        assert_eq!(shape.polyhedron.euler_characteristic(), 2);
    }

    #[test]
    fn test_cube() {
        let shape = construct(&cubic(1.0), &facet_set(&family_100(1.0))).unwrap();
        assert_well_formed(&shape);

        assert_eq!(shape.facets.len(), 6);
        assert_eq!(shape.vertices().len(), 8);
        assert_eq!(shape.polyhedron.edges.len(), 12);
        for facet in &shape.facets {
            assert_eq!(facet.vertices.len(), 4);
            assert!(approx_eq(facet.area, 4.0, TOL));
        }
        assert!(approx_eq(shape.total_area, 24.0, TOL));
        assert!(approx_eq(shape.volume, 8.0, TOL));
        for (_, fraction) in shape.area_fractions() {
            assert!(approx_eq(fraction, 1.0 / 6.0, TOL));
        }
        for vertex in shape.vertices() {
            for coordinate in vertex.iter() {
                assert!(approx_eq(coordinate.abs(), 1.0, TOL));
            }
        }
    }

    #[test]
    fn test_cube_independent_of_lattice_constant() {
        let small = construct(&cubic(1.0), &facet_set(&family_100(1.0))).unwrap();
        let large = construct(&cubic(3.5), &facet_set(&family_100(1.0))).unwrap();
        assert!(approx_eq(small.volume, large.volume, TOL));
        assert!(approx_eq(small.total_area, large.total_area, TOL));
    }

    #[test]
    fn test_facets_keep_row_order() {
        let rows = family_100(1.0);
        let shape = construct(&cubic(1.0), &facet_set(&rows)).unwrap();
        let rows_out: Vec<usize> = shape.facets.iter().map(|f| f.row).collect();
        assert_eq!(rows_out, vec![0, 1, 2, 3, 4, 5]);
        for (facet, (miller, _)) in shape.facets.iter().zip(&rows) {
            assert_eq!(facet.miller, MillerIndex::from(*miller));
        }
        assert_eq!(shape.entries.len(), 6);
    }

    #[test]
    fn test_rectangular_box() {
        let rows = vec![
            ([1, 0, 0], 1.0),
            ([-1, 0, 0], 1.0),
            ([0, 1, 0], 2.0),
            ([0, -1, 0], 2.0),
            ([0, 0, 1], 2.0),
            ([0, 0, -1], 2.0),
        ];
        let shape = construct(&cubic(1.0), &facet_set(&rows)).unwrap();
        assert_well_formed(&shape);
        assert!(approx_eq(shape.volume, 32.0, TOL));
        assert!(approx_eq(shape.total_area, 64.0, TOL));
        assert!(approx_eq(
            shape.area_fraction(&MillerIndex::new(1, 0, 0)),
            0.25,
            TOL
        ));
        assert!(approx_eq(
            shape.area_fraction(&MillerIndex::new(0, 0, -1)),
            0.125,
            TOL
        ));
    }

    #[test]
    fn test_octahedron() {
        let shape = construct(&cubic(1.0), &facet_set(&family_111(1.0))).unwrap();
        assert_well_formed(&shape);

        let sqrt3 = 3.0_f64.sqrt();
        assert_eq!(shape.facets.len(), 8);
        assert_eq!(shape.vertices().len(), 6);
        for facet in &shape.facets {
            assert_eq!(facet.vertices.len(), 3);
            assert!(approx_eq(facet.area, 1.5 * sqrt3, TOL));
        }
        assert!(approx_eq(shape.volume, 4.0 * sqrt3, TOL));
        for vertex in shape.vertices() {
            assert!(approx_eq(vertex.norm(), sqrt3, TOL));
        }
    }

    #[test]
    fn test_truncated_cube() {
        // Corner cuts 0.5 deep along each cube edge
        let energy_111 = 2.5 / 3.0_f64.sqrt();
        let mut rows = family_100(1.0);
        rows.extend(family_111(energy_111));
        let shape = construct(&cubic(1.0), &facet_set(&rows)).unwrap();
        assert_well_formed(&shape);

        assert_eq!(shape.facets.len(), 14);
        assert_eq!(shape.vertices().len(), 24);
        assert_eq!(shape.polyhedron.edges.len(), 36);

        let octagon = shape.facet_for(&MillerIndex::new(0, 1, 0)).unwrap();
        assert_eq!(octagon.vertices.len(), 8);
        assert!(approx_eq(octagon.area, 3.5, TOL));

        let triangle = shape.facet_for(&MillerIndex::new(-1, 1, -1)).unwrap();
        assert_eq!(triangle.vertices.len(), 3);
        assert!(approx_eq(triangle.area, 3.0_f64.sqrt() / 8.0, TOL));

        assert!(approx_eq(shape.total_area, 21.0 + 3.0_f64.sqrt(), TOL));
        assert!(approx_eq(shape.volume, 8.0 - 1.0 / 6.0, TOL));
    }

    #[test]
    fn test_hexagonal_prism() {
        let rows = vec![
            ([1, 0, 0], 1.0),
            ([0, 1, 0], 1.0),
            ([-1, 1, 0], 1.0),
            ([-1, 0, 0], 1.0),
            ([0, -1, 0], 1.0),
            ([1, -1, 0], 1.0),
            ([0, 0, 1], 1.0),
            ([0, 0, -1], 1.0),
        ];
        let shape = construct(&hexagonal(1.0, 1.6), &facet_set(&rows)).unwrap();
        assert_well_formed(&shape);

        let sqrt3 = 3.0_f64.sqrt();
        assert_eq!(shape.facets.len(), 8);
        assert_eq!(shape.vertices().len(), 12);

        let basal = shape.facet_for(&MillerIndex::new(0, 0, 1)).unwrap();
        assert_eq!(basal.vertices.len(), 6);
        assert!(approx_eq(basal.area, 2.0 * sqrt3, TOL));
        assert!((basal.normal - Vector3::new(0.0, 0.0, 1.0)).norm() < TOL);

        let prism = shape.facet_for(&MillerIndex::new(-1, 1, 0)).unwrap();
        assert_eq!(prism.vertices.len(), 4);
        assert!(approx_eq(prism.area, 4.0 / sqrt3, TOL));

        assert!(approx_eq(shape.volume, 4.0 * sqrt3, TOL));
        assert!(approx_eq(shape.total_area, 12.0 * sqrt3, TOL));
    }

    #[test]
    fn test_facet_off_the_shape() {
        let mut rows = family_100(1.0);
        rows.push(([1, 1, 1], 10.0));
        let shape = construct(&cubic(1.0), &facet_set(&rows)).unwrap();
        assert_well_formed(&shape);

        let absent = MillerIndex::new(1, 1, 1);
        assert_eq!(shape.facets.len(), 6);
        assert!(shape.facet_for(&absent).is_none());
        assert!(!shape.on_shape().contains(&absent));
        assert_eq!(shape.area_fraction(&absent), 0.0);
        assert!(shape
            .miller_area()
            .iter()
            .any(|(miller, area)| *miller == absent && *area == 0.0));
        assert!(approx_eq(shape.volume, 8.0, TOL));
    }

    #[test]
    fn test_facet_touching_a_corner_only() {
        let mut rows = family_100(1.0);
        rows.push(([1, 1, 1], 3.0_f64.sqrt()));
        let shape = construct(&cubic(1.0), &facet_set(&rows)).unwrap();
        assert_eq!(shape.facets.len(), 6);
        assert!(shape.facet_for(&MillerIndex::new(1, 1, 1)).is_none());
        assert!(approx_eq(shape.volume, 8.0, 1e-8));
    }

    #[test]
    fn test_volume_matches_contains() {
        let energy_111 = 2.5 / 3.0_f64.sqrt();
        let mut rows = family_100(1.0);
        rows.extend(family_111(energy_111));
        let shape = construct(&cubic(1.0), &facet_set(&rows)).unwrap();

        assert!(shape.contains(Vector3::zeros()));
        assert!(shape.contains(Vector3::new(0.9, 0.9, 0.0)));
        // Cut-off corner
        assert!(!shape.contains(Vector3::new(0.95, 0.95, 0.95)));
        assert!(!shape.contains(Vector3::new(1.1, 0.0, 0.0)));
    }

    #[test]
    fn test_too_few_facets() {
        let set = FacetSet::new().with([1, 0, 0], 1.0).with([-1, 0, 0], 1.0);
        assert_eq!(
            construct(&cubic(1.0), &set).unwrap_err(),
            Degenerate::TooFewFacets { count: 2 }
        );
        assert_eq!(
            construct(&cubic(1.0), &FacetSet::new()).unwrap_err(),
            Degenerate::TooFewFacets { count: 0 }
        );
    }

    #[test]
    fn test_single_default_facet_is_degenerate() {
        let set = FacetSet::new().with([1, 0, 0], 1.0);
        assert!(matches!(
            construct(&cubic(1.0), &set),
            Err(Degenerate::TooFewFacets { count: 1 })
        ));
    }

    #[test]
    fn test_three_facets_are_unbounded() {
        let set = FacetSet::new()
            .with([1, 0, 0], 1.0)
            .with([0, 1, 0], 1.0)
            .with([0, 0, 1], 1.0);
        assert_eq!(
            construct(&cubic(1.0), &set).unwrap_err(),
            Degenerate::Unbounded
        );
    }

    #[test]
    fn test_coplanar_normals_are_unbounded() {
        // No facet closes the z direction
        let set = FacetSet::new()
            .with([1, 0, 0], 1.0)
            .with([0, 1, 0], 1.0)
            .with([-1, 0, 0], 1.0)
            .with([0, -1, 0], 1.0)
            .with([1, 1, 0], 1.0);
        assert_eq!(
            construct(&cubic(1.0), &set).unwrap_err(),
            Degenerate::Unbounded
        );
    }

    #[test]
    fn test_one_sided_normals_are_unbounded() {
        let set = FacetSet::new()
            .with([1, 0, 0], 1.0)
            .with([0, 1, 0], 1.0)
            .with([0, 0, 1], 1.0)
            .with([1, 1, 0], 1.0);
        assert_eq!(
            construct(&cubic(1.0), &set).unwrap_err(),
            Degenerate::Unbounded
        );
    }

    #[test]
    fn test_open_half_space_is_unbounded() {
        // Five faces of a cube, the -z side is open
        let set = FacetSet::new()
            .with([1, 0, 0], 1.0)
            .with([-1, 0, 0], 1.0)
            .with([0, 1, 0], 1.0)
            .with([0, -1, 0], 1.0)
            .with([0, 0, 1], 1.0);
        assert_eq!(
            construct(&cubic(1.0), &set).unwrap_err(),
            Degenerate::Unbounded
        );
    }

    #[test]
    fn test_non_positive_energy() {
        let mut rows = family_100(1.0);
        rows[2].1 = 0.0;
        assert_eq!(
            construct(&cubic(1.0), &facet_set(&rows)).unwrap_err(),
            Degenerate::NonPositiveEnergy {
                row: 2,
                energy: 0.0
            }
        );

        rows[2].1 = -0.5;
        assert_eq!(
            construct(&cubic(1.0), &facet_set(&rows)).unwrap_err(),
            Degenerate::NonPositiveEnergy {
                row: 2,
                energy: -0.5
            }
        );

        rows[2].1 = f64::INFINITY;
        assert!(matches!(
            construct(&cubic(1.0), &facet_set(&rows)),
            Err(Degenerate::NonPositiveEnergy { row: 2, .. })
        ));
    }

    #[test]
    fn test_zero_miller_index() {
        let mut rows = family_100(1.0);
        rows.insert(1, ([0, 0, 0], 1.0));
        assert_eq!(
            construct(&cubic(1.0), &facet_set(&rows)).unwrap_err(),
            Degenerate::ZeroMillerIndex { row: 1 }
        );
    }

    #[test]
    fn test_duplicate_plane() {
        let mut rows = family_100(1.0);
        rows.push(([2, 0, 0], 0.5));
        assert_eq!(
            construct(&cubic(1.0), &facet_set(&rows)).unwrap_err(),
            Degenerate::DuplicatePlane {
                first: 0,
                second: 6
            }
        );

        // Same index listed twice with different energies
        let mut rows = family_100(1.0);
        rows.push(([0, 0, 1], 2.0));
        assert_eq!(
            construct(&cubic(1.0), &facet_set(&rows)).unwrap_err(),
            Degenerate::DuplicatePlane {
                first: 2,
                second: 6
            }
        );
    }

    #[test]
    fn test_opposite_normals_are_not_duplicates() {
        let constraints = plane_constraints(&cubic(1.0), &facet_set(&family_100(1.0))).unwrap();
        assert_eq!(constraints.len(), 6);
        for (row, constraint) in constraints.iter().enumerate() {
            assert_eq!(constraint.row, row);
            assert!(approx_eq(constraint.normal.norm(), 1.0, TOL));
            assert!((constraint.dual_point() - constraint.normal).norm() < TOL);
        }
    }

    #[test]
    fn test_plane_constraints_in_oblique_cell() {
        let params = LatticeParameters::new(1.0, 1.3, 0.8, 80.0, 95.0, 105.0);
        let basis = LatticeBasis::from_parameters(&params).unwrap();
        let set = facet_set(&family_100(1.0));
        let constraints = plane_constraints(&basis, &set).unwrap();

        // Each (hkl) normal is perpendicular to the direct vectors lying in its plane
        let [a1, a2, a3] = basis.base_vectors(crate::interfaces::Space::Real);
        assert!(constraints[0].normal.dot(&a2).abs() < TOL);
        assert!(constraints[0].normal.dot(&a3).abs() < TOL);
        assert!(constraints[2].normal.dot(&a1).abs() < TOL);
        assert!(constraints[2].normal.dot(&a2).abs() < TOL);

        // A parallelepiped shape still closes
        let shape = construct(&basis, &set).unwrap();
        assert_well_formed(&shape);
        assert_eq!(shape.facets.len(), 6);
        assert_eq!(shape.vertices().len(), 8);
    }
}
