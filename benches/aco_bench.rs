//! Criterion benchmarks for the ACO engine.
//!
//! Uses the chain-plus-shortcut graph from the analysis harness and a dense
//! random-weight graph to measure engine overhead as size and colony grow.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_antcolony::aco::{create_rng, AcoConfig, AcoRunner, WeightedGraph};
use u_antcolony::analysis::{run_shortcut_analysis, shortcut_chain, AnalysisParams};

// ===========================================================================
// Graphs
// ===========================================================================

fn dense_graph(n: usize) -> WeightedGraph {
    let mut rng = create_rng(7);
    let mut g = WeightedGraph::new(n);
    for u in 0..n {
        for v in u + 1..n {
            g.add_edge(u, v, rng.random_range(1.0..10.0))
                .expect("nodes are in range and weights positive");
        }
    }
    g
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_shortcut_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_shortcut_chain");
    group.sample_size(10);

    for &n in &[4usize, 10, 20] {
        let config = AcoConfig::default()
            .with_num_ants(10)
            .with_max_steps(n)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, cfg| {
            b.iter(|| {
                let mut g = shortcut_chain(n).expect("n >= 2");
                let colony = AcoRunner::run(&mut g, black_box(cfg), 0, n - 1, 20);
                black_box(colony)
            })
        });
    }
    group.finish();
}

fn bench_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_dense");
    group.sample_size(10);

    for (n, ants) in [(20usize, 10usize), (50, 20), (100, 20)] {
        let graph = dense_graph(n);
        let config = AcoConfig::default().with_num_ants(ants).with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_a{}", n, ants), n),
            &(graph, config),
            |b, (g, cfg)| {
                b.iter(|| {
                    let mut g = g.clone();
                    let colony = AcoRunner::run(&mut g, black_box(cfg), 0, n - 1, 10);
                    black_box(colony)
                })
            },
        );
    }
    group.finish();
}

/// Parameter sensitivity and scalability sweep of the analysis harness.
fn bench_analysis_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("aco_analysis_sweep");
    group.sample_size(10);

    let sweep = [
        (4usize, 0.1, 1.0, 2.0, 10usize, 10usize),
        (4, 0.3, 1.0, 2.0, 10, 10),
        (4, 0.1, 2.0, 1.0, 10, 10),
        (10, 0.1, 1.0, 2.0, 20, 10),
        (20, 0.1, 1.0, 2.0, 20, 5),
        (20, 0.1, 1.0, 2.0, 20, 50),
    ];
    for (nodes, evap, alpha, beta, iterations, ants) in sweep {
        let params = AnalysisParams {
            num_nodes: nodes,
            num_ants: ants,
            iterations,
            evaporation_rate: evap,
            pheromone_exponent: alpha,
            heuristic_exponent: beta,
            seed: Some(42),
        };
        let id = format!("n{nodes}_a{ants}_e{evap}_p{alpha}_d{beta}");
        group.bench_with_input(BenchmarkId::from_parameter(id), &params, |b, p| {
            b.iter(|| black_box(run_shortcut_analysis(black_box(p))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shortcut_chain, bench_dense, bench_analysis_sweep);
criterion_main!(benches);
