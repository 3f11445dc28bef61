use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use cellgrid::{
    generators,
    maze_grid::MazeGrid,
    units::{Height, Width},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(32);
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter_batched(|| MazeGrid::new(Width(32), Height(32)).unwrap(),
                       |mut m| generators::recursive_backtracker_with_rng(&mut m, &mut rng),
                       BatchSize::SmallInput)
    });
}

fn bench_recursive_backtracker_maze_256(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(256);
    c.bench_function("recursive_backtracker_maze_256", move |b| {
        b.iter_batched(|| MazeGrid::new(Width(256), Height(256)).unwrap(),
                       |mut m| generators::recursive_backtracker_with_rng(&mut m, &mut rng),
                       BatchSize::LargeInput)
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_256
);
criterion_main!(benches);
