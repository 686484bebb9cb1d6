use ljmd::{Particle, ParticleSet, Simulation, Vector3D};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let n_steps = match std::env::args().nth(1) {
        Some(value) => value.parse()?,
        None => 100,
    };

    // enable collection of profiling data
    time_graph::enable_data_collection(true);
    // clear any existing collected data
    time_graph::clear_collected_data();

    // run the simulation
    let energy = run_simulation(n_steps)?;
    println!("final total energy: {}", energy);

    // get the call graph and display it
    let graph = time_graph::get_full_graph();
    // (this requires the "table" feature for the time_graph crate)
    println!("{}", graph.as_short_table());

    // also available for saving profiling data to the disk & future analysis
    // (this requires the "json" feature for the time_graph crate)
    println!("{}", graph.as_json());

    Ok(())
}

/// Simulate a periodic Lennard-Jones fluid for `n_steps` and return the
/// final total energy
fn run_simulation(n_steps: usize) -> Result<f64, Box<dyn std::error::Error>> {
    let parameters = r#"{
        "timestep": 0.002,
        "integrator": "Verlet",
        "cell": {
            "extent": [8.8, 8.8, 8.8],
            "periodic": true
        },
        "cutoff": true,
        "lennard_jones": {
            "Global": {"epsilon": 1.0, "sigma": 1.0}
        },
        "parallel": true
    }"#;

    let simulation = Simulation::from_json(parameters)?;

    let mut particles = ParticleSet::new();
    for i in 0..8 {
        for j in 0..8 {
            for k in 0..8 {
                let n = (64 * i + 8 * j + k) as f64;
                let position = Vector3D::new(0.55 + 1.1 * i as f64, 0.55 + 1.1 * j as f64, 0.55 + 1.1 * k as f64);
                let velocity = 0.5 * Vector3D::new(f64::sin(n), f64::cos(3.0 * n), f64::sin(7.0 * n + 2.0));
                particles.add_particle(Particle::new(0, position, velocity))?;
            }
        }
    }

    let mut energy = time_graph::spanned!("Simulation::prepare", {
        simulation.prepare(&mut particles)?.potential_energy
    });

    for _ in 0..n_steps {
        energy = simulation.advance(&mut particles)?.total_energy();
    }

    Ok(energy)
}
