use ljmd::{ForceOptions, LennardJones, ParameterTable, Particle, ParticleSet, SimulationCell, Vector3D};
use ljmd::forces::accumulate_forces;

use criterion::{Criterion, BenchmarkId, criterion_group, criterion_main};

/// Simple cubic lattice with `n^3` particles, slightly displaced from their
/// ideal positions
fn lattice(n: usize, spacing: f64) -> ParticleSet {
    let mut particles = ParticleSet::new();
    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                let index = (i * n * n + j * n + k) as f64;
                let displacement = 0.05 * Vector3D::new(f64::sin(index), f64::cos(index), f64::sin(2.0 * index));
                let position = spacing * Vector3D::new(i as f64 + 0.5, j as f64 + 0.5, k as f64 + 0.5);
                particles.add_particle(Particle::new(0, position + displacement, Vector3D::zero()))
                    .expect("invalid particle");
            }
        }
    }
    return particles;
}

fn pairwise_forces(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise forces");
    group.noise_threshold(0.05);

    let table = ParameterTable::global(LennardJones::new(1.0, 1.0).expect("invalid parameters"));
    let spacing = 1.1;

    for &n in &[4, 6, 8] {
        let mut particles = lattice(n, spacing);
        let length = spacing * n as f64;

        let open = SimulationCell::new(Vector3D::new(length, length, length), false).expect("invalid cell");
        let periodic = SimulationCell::cubic(length).expect("invalid cell");
        let cases = [
            ("serial", open, false),
            ("parallel", open, true),
            ("serial periodic", periodic, false),
            ("parallel periodic", periodic, true),
        ];

        for (name, cell, parallel) in cases {
            let options = ForceOptions { use_cutoff: true, parallel: parallel, min_distance: None };
            group.bench_function(BenchmarkId::new(name, n * n * n), |b| b.iter(|| {
                particles.zero_accelerations();
                accumulate_forces(&mut particles, &table, &cell, options).expect("failed to compute forces")
            }));
        }
    }
}

criterion_group!(benches, pairwise_forces);
criterion_main!(benches);
