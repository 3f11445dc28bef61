use criterion::{criterion_group, criterion_main, Criterion};
use cellgrid::coordinates::{Coord, Rect};
use cellgrid::grid::Grid;
use cellgrid::maze_grid::MazeGrid;
use cellgrid::units::{Height, Width};

fn bench_maze_grid_new_128(c: &mut Criterion) {
    c.bench_function("maze_grid_new_128", |b| {
        b.iter(|| MazeGrid::new(Width(128), Height(128)).unwrap())
    });
}

fn bench_blit_256(c: &mut Criterion) {
    let mut src = Grid::new(Width(256), Height(256)).unwrap();
    src.fill(7);
    let mut dst = Grid::new(Width(512), Height(512)).unwrap();
    c.bench_function("blit_256", move |b| {
        b.iter(|| dst.blit(&src, Coord::new(100, 100)))
    });
}

fn bench_scale_blit_x4(c: &mut Criterion) {
    let src = MazeGrid::new(Width(64), Height(64)).unwrap().render_grid().clone();
    let mut dst = Grid::new(Width(129 * 4), Height(129 * 4)).unwrap();
    c.bench_function("scale_blit_x4", move |b| {
        b.iter(|| dst.scale_blit(&src, Coord::new(0, 0), 4))
    });
}

fn bench_scale_blit_rect_x8(c: &mut Criterion) {
    let src = MazeGrid::new(Width(64), Height(64)).unwrap().render_grid().clone();
    let mut dst = Grid::new(Width(400), Height(300)).unwrap();
    let view = Rect::from_coord_wh(Coord::new(10, 10), 50, 40);
    c.bench_function("scale_blit_rect_x8", move |b| {
        b.iter(|| dst.scale_blit_rect(&src, &view, Coord::new(0, 0), 8))
    });
}

criterion_group!(
    benches,
    bench_maze_grid_new_128,
    bench_blit_256,
    bench_scale_blit_x4,
    bench_scale_blit_rect_x8
);
criterion_main!(benches);
