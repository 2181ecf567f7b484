use rand::Rng;
use std::iter::repeat_with;

const N: usize = 1_000_000;

fn main() {
    let mut rng = rand::thread_rng();
    let coords: Vec<f64> = repeat_with(|| rng.gen::<f64>()).take(2 * N).collect();

    let now = std::time::Instant::now();
    let result = delaunay2d::Delaunay::new(coords);
    let elapsed = now.elapsed();

    println!(
        "Triangulated {} points in {}.{}s.\nGenerated {} triangles. Convex hull size: {}",
        N,
        elapsed.as_secs(),
        elapsed.subsec_millis(),
        result.len(),
        result.hull.len()
    );
}
