//! Example: Aligning a noisy biosensor readout onto microscope centroids
//!
//! The biosensor misses some cells, reports a few false peaks and jitters every
//! position. Both estimators are run on the same data and compared.

use cellalign::{
    find_translation_clique, find_translation_stochastic, StochasticSettings,
};
use nalgebra::DMatrix;
use rand::prelude::*;

fn to_matrix(points: &[(f64, f64)]) -> DMatrix<f64> {
    DMatrix::from_fn(points.len(), 2, |r, c| if c == 0 { points[r].0 } else { points[r].1 })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== Noisy Alignment Example ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let true_shift = (23.0, -11.5);
    let n_cells = 60;
    let noise = 0.3;

    let cells: Vec<(f64, f64)> = (0..n_cells)
        .map(|_| (rng.gen_range(0.0..400.0), rng.gen_range(0.0..400.0)))
        .collect();

    // 80% of the cells are detected, with noise, plus 8 false peaks.
    let mut peaks: Vec<(f64, f64)> = Vec::with_capacity(cells.len() + 8);
    for &(x, y) in &cells {
        if rng.gen_bool(0.8) {
            peaks.push((
                x + true_shift.0 + rng.gen_range(-noise..noise),
                y + true_shift.1 + rng.gen_range(-noise..noise),
            ));
        }
    }
    for _ in 0..8 {
        peaks.push((rng.gen_range(0.0..400.0), rng.gen_range(0.0..400.0)));
    }
    peaks.shuffle(&mut rng);

    println!("True shift: ({:.2}, {:.2})", true_shift.0, true_shift.1);
    println!("{} microscope cells, {} biosensor peaks\n", cells.len(), peaks.len());

    let source = to_matrix(&cells);
    let target = to_matrix(&peaks);

    let clique = find_translation_clique(&source, &target, 1.0)?;
    println!(
        "Maximum clique:   ({:.3}, {:.3})  support {}  graph edges {:?}  components {:?}  branches {}",
        clique.translation.x,
        clique.translation.y,
        clique.support,
        clique.graph_edges,
        clique.graph_components,
        clique.branches
    );

    let settings = StochasticSettings::default().with_ratio(0.3);
    let voted = find_translation_stochastic(&source, &target, Some(settings))?;
    println!(
        "Stochastic vote:  ({:.3}, {:.3})  score {:.4}  pair {:?}",
        voted.translation.x,
        voted.translation.y,
        voted.score.unwrap_or(f64::NAN),
        voted.candidate_pair
    );

    let back = clique.reversed();
    println!(
        "\nBiosensor -> microscope: ({:.3}, {:.3})",
        back.translation.x, back.translation.y
    );
    Ok(())
}
