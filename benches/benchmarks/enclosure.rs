use std::f64::consts::TAU;

use criterion::{BatchSize, Criterion, criterion_group};
use enclosure::{Graph, cartesian::Point};
use rand::Rng;

const SIDES: usize = 256;
const RADIUS: f64 = 5000.;

/// Returns the vertices of a star-shaped polygon whose vertices are at a random distance from
/// the origin.
fn random_ring() -> Vec<Point> {
    let mut rng = rand::rng();

    (0..SIDES)
        .map(|index| {
            let (sin, cos) = (TAU * index as f64 / SIDES as f64).sin_cos();
            let radius = rng.random_range(0.8 * RADIUS..RADIUS);
            Point {
                x: radius * cos,
                y: radius * sin,
            }
        })
        .collect()
}

fn enclosed(ring: &[Point]) -> Graph {
    let mut graph = Graph::default();
    ring.iter()
        .zip(ring.iter().cycle().skip(1))
        .for_each(|(start, end)| {
            let _ = graph.restore_fence(start, end, Default::default());
        });

    graph
}

pub fn large_enclosures(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("large enclosures");

    group.bench_function("restore", |b| {
        b.iter_batched(
            random_ring,
            |ring| enclosed(&ring),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("enclosed area", |b| {
        b.iter_batched(
            || enclosed(&random_ring()),
            |graph| graph.enclosed_area(),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("point in enclosure", |b| {
        b.iter_batched(
            || {
                let mut rng = rand::rng();
                let point = Point {
                    x: rng.random_range(-RADIUS..RADIUS),
                    y: rng.random_range(-RADIUS..RADIUS),
                };

                (enclosed(&random_ring()), point)
            },
            |(graph, point)| graph.is_point_in_enclosure(&point),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("validate fence", |b| {
        b.iter_batched(
            || {
                let mut rng = rand::rng();
                let mut random_point = || Point {
                    x: rng.random_range(-RADIUS..RADIUS),
                    y: rng.random_range(-RADIUS..RADIUS),
                };

                let candidate = [random_point(), random_point()];
                (enclosed(&random_ring()), candidate)
            },
            |(graph, [start, end])| graph.validate_fence_placement(&start, &end),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, large_enclosures);
