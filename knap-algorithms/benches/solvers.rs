use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use knap_algorithms::{Algorithm, Solver};
use knap_challenges::knapsack::{Challenge, Track};

fn solver(num_items: usize, capacity: u32) -> Solver {
    let track = Track::new(num_items, 100, 1000, capacity);
    Solver::from_challenge(Challenge::generate_instance(&[42; 32], &track).unwrap())
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("knapsack");
    for &(num_items, capacity) in &[(50, 500), (100, 1000), (1000, 10_000)] {
        let solver = solver(num_items, capacity);
        for algorithm in Algorithm::ALL {
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), num_items),
                &solver,
                |b, solver| b.iter(|| solver.solve(black_box(algorithm)).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
