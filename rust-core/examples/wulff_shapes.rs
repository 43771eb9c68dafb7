/// Example walking through the Wulff shape API
///
/// Builds a few classic shapes directly with the engine, then drives the
/// coordinator through the cycles a form would produce: startup, manual edits,
/// a degenerate edit, a row addition and a material lookup.
use wulff_shape::coordinator::{
    Coordinator, FacetRow, InMemoryProvider, InputEvent, MaterialSurfaceData, SurfaceEntry,
};
use wulff_shape::lattice::{LatticeBasis, LatticeParameters, MillerIndex};
use wulff_shape::wulff::{construct, FacetSet};

fn cube_facets(energy_100: f64) -> FacetSet {
    [[1, 0, 0], [0, 1, 0], [0, 0, 1], [-1, 0, 0], [0, -1, 0], [0, 0, -1]]
        .into_iter()
        .fold(FacetSet::new(), |set, miller| set.with(miller, energy_100))
}

fn with_111(set: FacetSet, energy_111: f64) -> FacetSet {
    let mut set = set;
    for h in [1, -1] {
        for k in [1, -1] {
            for l in [1, -1] {
                set = set.with([h, k, l], energy_111);
            }
        }
    }
    set
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Wulff shapes from the engine ===\n");

    let cubic = LatticeBasis::from_parameters(&LatticeParameters::cubic(4.05))?;

    // Example 1: {100} only gives a cube
    println!("1. {{100}} at 1.0:");
    let cube = construct(&cubic, &cube_facets(1.0))?;
    println!("   Facets: {}", cube.facets.len());
    println!("   Volume: {:.3}", cube.volume);
    println!("   Shape factor: {:.3}\n", cube.shape_factor());

    // Example 2: {100} + {111}, the (111) corners cut the cube
    println!("2. {{100}} at 1.0 + {{111}} at 1.5:");
    let truncated = construct(&cubic, &with_111(cube_facets(1.0), 1.5))?;
    for (miller, fraction) in truncated.area_fractions().into_iter().take(7) {
        println!("   {}: {:.3}", miller, fraction);
    }
    println!("   Anisotropy: {:.4}", truncated.anisotropy());
    println!(
        "   Effective radius: {:.3}\n",
        truncated.effective_radius()
    );

    // Example 3: a facet that never reaches the shape
    println!("3. Adding (1 1 1) at 5.0 to a cube:");
    let clipped = construct(&cubic, &cube_facets(1.0).with([1, 1, 1], 5.0))?;
    println!(
        "   (1 1 1) on shape: {}\n",
        clipped.facet_for(&MillerIndex::new(1, 1, 1)).is_some()
    );

    // Example 4: two facets cannot enclose anything
    println!("4. Degenerate input:");
    let two = FacetSet::new().with([1, 0, 0], 1.0).with([-1, 0, 0], 1.0);
    match construct(&cubic, &two) {
        Ok(_) => println!("   unexpected shape"),
        Err(e) => println!("   {}\n", e),
    }

    println!("=== Coordinator cycles ===\n");

    let mut provider = InMemoryProvider::new();
    provider.insert(
        "mp-30",
        MaterialSurfaceData {
            lattice: LatticeParameters::cubic(3.62),
            surfaces: vec![
                SurfaceEntry { miller_index: [1, 0, 0], surface_energy: 0.0916 },
                SurfaceEntry { miller_index: [-1, 0, 0], surface_energy: 0.0916 },
                SurfaceEntry { miller_index: [0, 1, 0], surface_energy: 0.0916 },
                SurfaceEntry { miller_index: [0, -1, 0], surface_energy: 0.0916 },
                SurfaceEntry { miller_index: [0, 0, 1], surface_energy: 0.0916 },
                SurfaceEntry { miller_index: [0, 0, -1], surface_energy: 0.0916 },
                SurfaceEntry { miller_index: [1, 1, 1], surface_energy: 0.0826 },
                SurfaceEntry { miller_index: [-1, -1, -1], surface_energy: 0.0826 },
            ],
        },
    );
    let mut coordinator = Coordinator::new(provider);

    let output = coordinator.startup();
    println!("startup: {:?}", output.outcome);

    let rows: Vec<FacetRow> = cube_facets(1.0).iter().map(FacetRow::from_entry).collect();
    let output = coordinator.handle(&[InputEvent::manual(LatticeParameters::cubic(1.0), rows)]);
    println!("manual cube: {:?}", output.outcome);

    let output = coordinator.handle(&[InputEvent::manual(
        LatticeParameters::cubic(1.0),
        vec![FacetRow::new([1, 0, 0], 1.0)],
    )]);
    println!(
        "single facet: {:?}, still showing a shape: {}",
        output.outcome,
        output.polytope.is_some()
    );

    let output = coordinator.handle(&[InputEvent::RowAdd]);
    println!("row added: {} rows", output.table.len());

    let output = coordinator.handle(&[InputEvent::lookup("mp-30")]);
    println!(
        "lookup mp-30: {:?}, {} rows, a = {:.2}",
        output.outcome,
        output.table.len(),
        output.lattice.a
    );

    Ok(())
}
