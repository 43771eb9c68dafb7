#[cfg(test)]
mod _tests_provider {
    use super::super::provider::*;
    use super::super::state::FacetRow;
    use crate::errors::LookupFailure;
    use crate::lattice::LatticeParameters;

    const DATABASE: &str = r#"{
        "mp-30": {
            "lattice": {"a": 3.6, "b": 3.6, "c": 3.6, "alpha": 90.0, "beta": 90.0, "gamma": 90.0},
            "surfaces": [
                {"miller_index": [1, 0, 0], "surface_energy": 0.091234},
                {"miller_index": [1, 1, 1], "surface_energy": 0.08267}
            ]
        },
        "mp-empty": {
            "lattice": {"a": 1.0, "b": 1.0, "c": 1.0, "alpha": 90.0, "beta": 90.0, "gamma": 90.0},
            "surfaces": []
        }
    }"#;

    #[test]
    fn test_from_json_str() {
        let provider = InMemoryProvider::from_json_str(DATABASE).unwrap();
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.keys().collect::<Vec<_>>(), vec!["mp-30", "mp-empty"]);

        let data = provider.fetch("mp-30").unwrap();
        assert_eq!(data.lattice, LatticeParameters::cubic(3.6));
        assert_eq!(data.surfaces.len(), 2);
        assert_eq!(data.surfaces[1].miller_index, [1, 1, 1]);
    }

    #[test]
    fn test_fetch_trims_key() {
        let provider = InMemoryProvider::from_json_str(DATABASE).unwrap();
        assert!(provider.fetch("  mp-30\n").is_ok());
    }

    #[test]
    fn test_fetch_failures() {
        let provider = InMemoryProvider::from_json_str(DATABASE).unwrap();
        assert_eq!(provider.fetch("   "), Err(LookupFailure::EmptyKey));
        assert_eq!(
            provider.fetch("mp-404"),
            Err(LookupFailure::UnknownMaterial {
                key: "mp-404".into()
            })
        );
        assert!(matches!(
            provider.fetch("mp-empty"),
            Err(LookupFailure::Malformed { .. })
        ));
    }

    #[test]
    fn test_invalid_database() {
        assert!(matches!(
            InMemoryProvider::from_json_str("{not json"),
            Err(LookupFailure::Unavailable { .. })
        ));
        assert!(matches!(
            InMemoryProvider::from_json_file("/nonexistent/materials.json"),
            Err(LookupFailure::Unavailable { .. })
        ));
    }

    #[test]
    fn test_facet_set_keeps_exact_energies() {
        let provider = InMemoryProvider::from_json_str(DATABASE).unwrap();
        let data = provider.fetch("mp-30").unwrap();

        let set = data.facet_set();
        assert_eq!(set.len(), 2);
        assert_eq!(set.entries()[0].surface_energy, 0.091234);

        let rows = data.table_rows();
        assert_eq!(rows[0], FacetRow::new([1, 0, 0], 0.091));
        assert_eq!(rows[1], FacetRow::new([1, 1, 1], 0.083));
    }

    #[test]
    fn test_insert_replaces() {
        let mut provider = InMemoryProvider::new();
        assert!(provider.is_empty());
        let data = MaterialSurfaceData {
            lattice: LatticeParameters::cubic(2.0),
            surfaces: vec![SurfaceEntry {
                miller_index: [1, 0, 0],
                surface_energy: 1.0,
            }],
        };
        provider.insert("x", data.clone());
        provider.insert(
            "x",
            MaterialSurfaceData {
                lattice: LatticeParameters::cubic(4.0),
                ..data
            },
        );
        assert_eq!(provider.len(), 1);
        assert_eq!(provider.fetch("x").unwrap().lattice.a, 4.0);
    }

    #[test]
    fn test_offline_provider() {
        assert_eq!(OfflineProvider.fetch(""), Err(LookupFailure::EmptyKey));
        assert!(matches!(
            OfflineProvider.fetch("mp-30"),
            Err(LookupFailure::Unavailable { .. })
        ));
    }
}
