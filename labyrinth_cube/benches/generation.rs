// benches/generation.rs - Maze carving, path search and level construction
//
// Run with: cargo bench -p labyrinth_cube

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use labyrinth_cube::{scad, CubeAssembly, LevelOptions};
use maze_graph::Graph;

const SIZES: [usize; 3] = [4, 8, 12];

fn carved(size: usize) -> Graph {
    let mut graph = Graph::new(size).expect("non-empty lattice");
    graph.set_random_tree(42);
    graph
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_random_tree");
    for size in SIZES {
        group.throughput(Throughput::Elements((size * size * size) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut graph = Graph::new(size).expect("non-empty lattice");
            b.iter(|| graph.set_random_tree(black_box(42)));
        });
    }
    group.finish();
}

fn bench_find_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_path");
    for size in SIZES {
        let graph = carved(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| graph.find_path(graph.top_corner(), graph.bottom_corner()));
        });
    }
    group.finish();
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("cube_solid");
    for size in SIZES {
        let graph = carved(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| {
                let cube = CubeAssembly::from_graph(graph, 2.0, 14.0, 17.0).expect("cube");
                let solid = cube.solid(LevelOptions { windows: true });
                black_box(scad::to_scad(&solid))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generation, bench_find_path, bench_geometry);
criterion_main!(benches);
