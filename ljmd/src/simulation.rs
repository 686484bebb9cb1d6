use log::{info, warn};

use crate::Error;
use crate::forces::{accumulate_forces, ForceOptions, ForceSummary};
use crate::integrators::Integrator;
use crate::parameters::SimulationParameters;
use crate::potentials::ParameterTable;
use crate::systems::{ParticleSet, SimulationCell};

/// Energies and statistics of a single time step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// Potential energy of the positions at the start of the step
    pub potential_energy: f64,
    /// Kinetic energy computed from the velocities stored after the step. For
    /// the Verlet integrator, these are the velocities at the start of the
    /// step.
    pub kinetic_energy: f64,
    /// Number of pair interactions included in the forces
    pub pairs: usize,
}

impl StepReport {
    /// Sum of the kinetic and potential energies
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
}

/// Advance `particles` by one time step `dt`.
///
/// This resets all accelerations, accumulates the forces for the current
/// positions, integrates the equations of motion with the given `integrator`,
/// and finally wraps the particles back inside the `cell` if it is periodic.
/// Integration only starts once all forces have been computed.
///
/// If this function returns an error, the state of the particles is
/// unspecified.
pub fn advance(
    particles: &mut ParticleSet,
    dt: f64,
    table: &ParameterTable,
    cell: &SimulationCell,
    integrator: Integrator,
    options: ForceOptions,
) -> Result<StepReport, Error> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "expected positive timestep, got {}", dt
        )));
    }

    particles.zero_accelerations();
    let summary = accumulate_forces(particles, table, cell, options)?;

    integrator.integrate(particles, dt, options.parallel);

    wrap_particles(particles, cell)?;

    return Ok(StepReport {
        potential_energy: summary.potential_energy,
        kinetic_energy: particles.kinetic_energy(),
        pairs: summary.pairs,
    });
}

/// Wrap the positions of all particles inside a periodic `cell`, translating
/// the previous positions by the same amount
fn wrap_particles(particles: &mut ParticleSet, cell: &SimulationCell) -> Result<(), Error> {
    if !cell.is_periodic() {
        return Ok(());
    }

    let kinematics = particles.kinematics_mut();
    for (position, previous) in kinematics.positions.iter_mut().zip(kinematics.previous_positions.iter_mut()) {
        cell.wrap_particle(position, previous)?;
    }

    Ok(())
}

/// A `Simulation` contains all the settings needed to advance a set of
/// particles interacting with Lennard-Jones potentials in time.
///
/// ```
/// # use ljmd::{Simulation, ParticleSet, Particle, Vector3D};
/// let simulation = Simulation::from_json(r#"{
///     "timestep": 0.001,
///     "integrator": "Verlet",
///     "cell": {"extent": [10.0, 10.0, 10.0]},
///     "lennard_jones": {"Global": {"epsilon": 1.0, "sigma": 1.0}}
/// }"#).unwrap();
///
/// let mut particles = ParticleSet::from_particles([
///     Particle::new(0, Vector3D::new(1.0, 1.0, 1.0), Vector3D::zero()),
///     Particle::new(0, Vector3D::new(2.5, 1.0, 1.0), Vector3D::zero()),
/// ]).unwrap();
///
/// simulation.prepare(&mut particles).unwrap();
/// for _ in 0..10 {
///     let report = simulation.advance(&mut particles).unwrap();
///     assert_eq!(report.pairs, 1);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    parameters: SimulationParameters,
    cell: SimulationCell,
    table: ParameterTable,
}

impl Simulation {
    /// Create a new simulation with the given parameters
    pub fn new(parameters: SimulationParameters) -> Result<Simulation, Error> {
        parameters.validate()?;

        let cell = parameters.simulation_cell()?;
        let table = parameters.lennard_jones.parameter_table()?;

        if cell.is_periodic() && parameters.cutoff && table.max_cutoff() > cell.smallest_side() {
            warn!(
                "the cutoff ({}) is larger than the smallest side of the cell ({}), \
                interactions beyond the first periodic images will be ignored",
                table.max_cutoff(), cell.smallest_side()
            );
        }

        info!(
            "created simulation with {:?} integrator, dt = {}, cell = {:?} ({}), cutoff {}, {} force accumulation",
            parameters.integrator,
            parameters.timestep,
            parameters.cell.extent,
            if cell.is_periodic() { "periodic" } else { "not periodic" },
            if parameters.cutoff { "enabled" } else { "disabled" },
            if parameters.parallel { "parallel" } else { "serial" },
        );

        return Ok(Simulation {
            parameters: parameters,
            cell: cell,
            table: table,
        });
    }

    /// Create a new simulation from parameters in JSON format, see
    /// [`SimulationParameters`] for the corresponding schema.
    pub fn from_json(parameters: &str) -> Result<Simulation, Error> {
        let parameters = serde_json::from_str::<SimulationParameters>(parameters)?;
        return Simulation::new(parameters);
    }

    /// Get the parameters used to create this simulation
    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    /// Get the parameters used to create this simulation in JSON format
    pub fn parameters_json(&self) -> String {
        serde_json::to_string(&self.parameters).expect("failed to serialize to JSON")
    }

    pub fn timestep(&self) -> f64 {
        self.parameters.timestep
    }

    pub fn integrator(&self) -> Integrator {
        self.parameters.integrator
    }

    pub fn cell(&self) -> &SimulationCell {
        &self.cell
    }

    pub fn parameter_table(&self) -> &ParameterTable {
        &self.table
    }

    fn force_options(&self) -> ForceOptions {
        ForceOptions {
            use_cutoff: self.parameters.cutoff,
            min_distance: self.parameters.min_distance,
            parallel: self.parameters.parallel,
        }
    }

    /// Replace the accelerations of `particles` with the ones for their
    /// current positions.
    pub fn compute_forces(&self, particles: &mut ParticleSet) -> Result<ForceSummary, Error> {
        particles.zero_accelerations();
        return accumulate_forces(particles, &self.table, &self.cell, self.force_options());
    }

    /// Prepare `particles` before the first step: compute the accelerations,
    /// and set the previous positions from the current positions and
    /// velocities with `x(t - dt) = x(t) - v dt + 1/2 a dt^2`.
    ///
    /// This is required to start a simulation with the Verlet integrator from
    /// initial velocities.
    pub fn prepare(&self, particles: &mut ParticleSet) -> Result<ForceSummary, Error> {
        let summary = self.compute_forces(particles)?;

        let dt = self.parameters.timestep;
        let kinematics = particles.kinematics_mut();
        let iter = kinematics.previous_positions.iter_mut()
            .zip(kinematics.positions.iter())
            .zip(kinematics.velocities.iter())
            .zip(kinematics.accelerations);

        for (((previous, position), velocity), acceleration) in iter {
            *previous = position - velocity * dt + 0.5 * acceleration * (dt * dt);
        }

        return Ok(summary);
    }

    /// Advance `particles` by one time step, see [`advance`].
    #[time_graph::instrument(name = "Simulation::advance")]
    pub fn advance(&self, particles: &mut ParticleSet) -> Result<StepReport, Error> {
        return advance(
            particles,
            self.parameters.timestep,
            &self.table,
            &self.cell,
            self.parameters.integrator,
            self.force_options(),
        );
    }
}
