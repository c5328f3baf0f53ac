use std::time::Instant;

use mazegraph::{
    generators::{Algorithm, generate},
    graph::build_grid_graph,
    random::RngSource,
};

/// Side length of the profiled grid
const SIZE: usize = 255;

fn main() {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10)
        .max(1);

    let mut rng = RngSource::new(None);
    for algorithm in Algorithm::ALL {
        let started = Instant::now();
        for _ in 0..num_iters {
            let graph = generate(build_grid_graph(SIZE, SIZE), algorithm, None, &mut rng);
            debug_assert!(graph.is_spanning_tree());
        }
        let average = started.elapsed() / num_iters as u32;
        println!(
            "{:<40} {:>10.2?} per {}x{} maze ({} runs)",
            algorithm.to_string(),
            average,
            SIZE,
            SIZE,
            num_iters
        );
    }
}
