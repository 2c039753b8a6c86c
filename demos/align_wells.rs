//! Example: Batch alignment of several wells
//!
//! Each well's microscope image is given as a labelled segmentation mask,
//! reduced to cell centroids, and aligned against that well's biosensor peaks.
//! The estimator is chosen from a JSON configuration.

use cellalign::{
    align_sources, centroids_from_labels, AlignmentSettings, InMemoryPointSource,
};
use nalgebra::DMatrix;
use rand::prelude::*;

const CONFIG: &str = r#"{
    "method": "maximum_clique",
    "clique": { "epsilon": 1.5 }
}"#;

/// Paint `n` square cells of side 3 into a `size x size` mask.
fn synthetic_mask(rng: &mut StdRng, size: usize, n: usize) -> DMatrix<u32> {
    let mut mask = DMatrix::<u32>::zeros(size, size);
    let mut label = 0;
    while label < n as u32 {
        let (r, c) = (rng.gen_range(0..size - 3), rng.gen_range(0..size - 3));
        if mask.view((r, c), (3, 3)).iter().any(|&v| v != 0) {
            continue;
        }
        label += 1;
        mask.view_mut((r, c), (3, 3)).fill(label);
    }
    mask
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Well Batch Alignment Example ===\n");

    let settings: AlignmentSettings = serde_json::from_str(CONFIG)?;
    println!("Method: {}\n", settings.method);

    let mut rng = StdRng::seed_from_u64(7);
    let mut source = InMemoryPointSource::new();
    let wells = [("A1", (4.0, 9.0)), ("A2", (-6.0, 3.5)), ("B1", (12.0, -2.0))];

    for (well, shift) in wells {
        let mask = synthetic_mask(&mut rng, 200, 40);
        let centroids = centroids_from_labels(&mask)?;

        let mut peaks = centroids.clone();
        for mut row in peaks.row_iter_mut() {
            row[0] += shift.0 + rng.gen_range(-0.2..0.2);
            row[1] += shift.1 + rng.gen_range(-0.2..0.2);
        }
        let detected: Vec<usize> = (0..peaks.nrows()).filter(|_| rng.gen_bool(0.85)).collect();
        let peaks = peaks.select_rows(detected.iter());

        source = source
            .with_microscope(well, centroids)
            .with_biosensor(well, peaks);
    }

    let results = align_sources(&source, &settings)?;
    for (well, shift) in wells {
        match &results[well] {
            Ok(estimate) => println!(
                "{well}: true ({:6.2}, {:6.2})  estimated ({:6.2}, {:6.2})  support {}",
                shift.0, shift.1, estimate.translation.x, estimate.translation.y, estimate.support
            ),
            Err(err) => println!("{well}: failed: {err}"),
        }
    }
    Ok(())
}
