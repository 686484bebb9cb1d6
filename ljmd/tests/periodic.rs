//! Interactions across the boundaries of periodic cells.

use approx::assert_relative_eq;

use ljmd::{ForceOptions, LennardJones, ParameterTable, Particle, ParticleSet, SimulationCell, Vector3D};
use ljmd::forces::accumulate_forces;

fn pair(first: Vector3D, second: Vector3D) -> ParticleSet {
    ParticleSet::from_particles([
        Particle::new(0, first, Vector3D::zero()),
        Particle::new(0, second, Vector3D::zero()),
    ]).unwrap()
}

fn table() -> ParameterTable {
    ParameterTable::global(LennardJones::new(1.0, 1.0).unwrap())
}

#[test]
fn pair_across_boundary() {
    let periodic = SimulationCell::cubic(10.0).unwrap();
    let open = SimulationCell::new(Vector3D::new(10.0, 10.0, 10.0), false).unwrap();

    for &use_cutoff in &[true, false] {
        let options = ForceOptions { use_cutoff: use_cutoff, ..Default::default() };

        let mut across = pair(Vector3D::new(0.1, 5.0, 5.0), Vector3D::new(9.9, 5.0, 5.0));
        let summary_across = accumulate_forces(&mut across, &table(), &periodic, options).unwrap();

        let mut direct = pair(Vector3D::new(0.1, 5.0, 5.0), Vector3D::new(-0.1, 5.0, 5.0));
        let summary_direct = accumulate_forces(&mut direct, &table(), &open, options).unwrap();

        // the force is repulsive, pushing the first particle towards +x
        assert!(across.accelerations()[0][0] > 1e10);

        assert_relative_eq!(summary_across.potential_energy, summary_direct.potential_energy, max_relative = 1e-12);
        assert_relative_eq!(across.accelerations()[0], direct.accelerations()[0], epsilon = 1e-6, max_relative = 1e-12);
        assert_relative_eq!(across.accelerations()[1], direct.accelerations()[1], epsilon = 1e-6, max_relative = 1e-12);

        if use_cutoff {
            assert_eq!(summary_across.pairs, 1);
        } else {
            assert_eq!(summary_across.pairs, 27);
        }
    }
}

#[test]
fn far_images_are_included() {
    // the image on the left is inside the cutoff even if the direct
    // interaction is not
    let cell = SimulationCell::new(Vector3D::new(6.0, 10.0, 10.0), true).unwrap();
    let mut particles = pair(Vector3D::new(0.5, 5.0, 5.0), Vector3D::new(4.0, 5.0, 5.0));

    let options = ForceOptions { use_cutoff: true, ..Default::default() };
    let summary = accumulate_forces(&mut particles, &table(), &cell, options).unwrap();
    assert_eq!(summary.pairs, 1);

    let expected = LennardJones::new(1.0, 1.0).unwrap().compute(2.5);
    assert_relative_eq!(summary.potential_energy, expected.potential, max_relative = 1e-12);
    // the image is on the left, and attracts the first particle towards -x
    assert!(particles.accelerations()[0][0] < 0.0);
    assert_relative_eq!(particles.accelerations()[0][0], 2.5 * expected.force, max_relative = 1e-12);
}

#[test]
fn trajectory_stays_in_cell() {
    let simulation = ljmd::Simulation::from_json(r#"{
        "timestep": 0.005,
        "integrator": "Verlet",
        "cell": {"extent": [4.0, 4.0, 4.0], "periodic": true},
        "cutoff": true,
        "lennard_jones": {"Global": {"epsilon": 1.0, "sigma": 1.0}},
        "parallel": true
    }"#).unwrap();

    let mut particles = ParticleSet::from_particles([
        Particle::new(0, Vector3D::new(0.2, 2.0, 2.0), Vector3D::new(-3.0, 0.5, 0.0)),
        Particle::new(0, Vector3D::new(2.0, 3.9, 0.1), Vector3D::new(0.0, 2.0, -1.0)),
        Particle::new(0, Vector3D::new(3.0, 1.0, 3.0), Vector3D::new(1.0, -1.0, 1.5)),
    ]).unwrap();
    simulation.prepare(&mut particles).unwrap();

    for _ in 0..400 {
        simulation.advance(&mut particles).unwrap();
        for position in particles.positions() {
            assert!(simulation.cell().contains(*position), "{:?} is outside of the cell", position);
        }
        assert!(particles.total_acceleration().norm() < 1e-8);
    }
}
