//! Accumulation of the Lennard-Jones forces acting between all pairs of
//! particles.
//!
//! All unique pairs `i < j` are visited, and the force acting on `i` is added
//! to its acceleration while the opposite force is added to the acceleration
//! of `j`. With periodic cells, the contributions of the 27 periodic images of
//! `j` are summed before being applied.
//!
//! Two implementations are available: [`accumulate_forces_serial`], and
//! [`accumulate_forces_parallel`] which distributes the `i` index over the
//! rayon thread pool. Since each pair writes to both particles, the parallel
//! version gives each worker thread its own acceleration buffer, and sums all
//! these buffers in the output once all pairs have been evaluated.
use std::cell::RefCell;

use log::warn;
use rayon::prelude::*;
use thread_local::ThreadLocal;

use crate::{Error, Vector3D};
use crate::geometry::distance;
use crate::potentials::{LennardJones, ParameterTable};
use crate::systems::{ParticleSet, SimulationCell};

/// Particles with a squared distance below this are reported as being very
/// close to each other
const CLOSE_CONTACT_DISTANCE2: f64 = 1e-3;

/// Options controlling the force accumulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceOptions {
    /// Skip pairs further apart than the cutoff of their parameters
    pub use_cutoff: bool,
    /// If set, fail with [`Error::Interpenetration`] when two particles are
    /// closer than this distance
    pub min_distance: Option<f64>,
    /// Use [`accumulate_forces_parallel`] instead of
    /// [`accumulate_forces_serial`]
    pub parallel: bool,
}

/// Global results of a force accumulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceSummary {
    /// Total potential energy of the particles, summed over the same pairs and
    /// periodic images as the forces
    pub potential_energy: f64,
    /// Number of interactions between particles (or a particle and a periodic
    /// image of another one) that survived the cutoff
    pub pairs: usize,
}

impl ForceSummary {
    fn add(&mut self, contribution: &PairContribution) {
        self.potential_energy += contribution.potential;
        self.pairs += contribution.interactions;
    }
}

/// Total contribution from the interaction of a single pair of particles,
/// including all the periodic images.
#[derive(Debug, Clone, Copy, Default)]
struct PairContribution {
    /// force acting on the first particle of the pair
    force: Vector3D,
    potential: f64,
    interactions: usize,
}

/// Everything needed to evaluate the interaction of a pair, shared between
/// all threads
struct PairEvaluator<'a> {
    positions: &'a [Vector3D],
    type_indexes: Vec<usize>,
    table: &'a ParameterTable,
    cell: &'a SimulationCell,
    options: ForceOptions,
}

impl<'a> PairEvaluator<'a> {
    fn new(
        types: &[i32],
        positions: &'a [Vector3D],
        table: &'a ParameterTable,
        cell: &'a SimulationCell,
        options: ForceOptions,
    ) -> Result<PairEvaluator<'a>, Error> {
        if let Some(min_distance) = options.min_distance {
            if !(min_distance.is_finite() && min_distance > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "minimal distance between particles must be positive, got {}", min_distance
                )));
            }
        }

        Ok(PairEvaluator {
            positions: positions,
            type_indexes: table.type_indexes(types)?,
            table: table,
            cell: cell,
            options: options,
        })
    }

    /// Evaluate the interaction between particles `i` and `j`. This returns
    /// `None` if all interactions are beyond the cutoff.
    fn evaluate(&self, i: usize, j: usize) -> Result<Option<PairContribution>, Error> {
        let parameters = self.table.by_index(self.type_indexes[i], self.type_indexes[j]);
        let first = self.positions[i];
        let second = self.positions[j];

        if !self.cell.is_periodic() {
            return self.interaction(i, j, first, second, parameters);
        }

        let mut total: Option<PairContribution> = None;
        for translation in self.cell.images() {
            let image = second + translation;
            if let Some(contribution) = self.interaction(i, j, first, image, parameters)? {
                let total = total.get_or_insert_with(PairContribution::default);
                total.force += contribution.force;
                total.potential += contribution.potential;
                total.interactions += 1;
            }
        }

        return Ok(total);
    }

    /// Interaction between particle `i` at `first` and particle `j` (or one
    /// of its images) at `second`
    #[inline]
    fn interaction(
        &self,
        i: usize,
        j: usize,
        first: Vector3D,
        second: Vector3D,
        parameters: &LennardJones,
    ) -> Result<Option<PairContribution>, Error> {
        let r = distance(first, second);
        if self.options.use_cutoff && r > parameters.cutoff() {
            return Ok(None);
        }

        if let Some(min_distance) = self.options.min_distance {
            if r < min_distance {
                return Err(Error::Interpenetration { first: i, second: j, distance: r });
            }
        }

        if r * r < CLOSE_CONTACT_DISTANCE2 {
            warn!("particles {} and {} are very close to each other (distance = {})", i, j, r);
        }

        let interaction = parameters.compute(r);
        return Ok(Some(PairContribution {
            force: (first - second) * interaction.force,
            potential: interaction.potential,
            interactions: 1,
        }));
    }
}

/// Add the forces acting on all `particles` to their accelerations, using the
/// serial or parallel implementation depending on `options.parallel`.
///
/// The accelerations are not reset by this function, call
/// [`ParticleSet::zero_accelerations`] before it to get the forces for the
/// current positions only.
pub fn accumulate_forces(
    particles: &mut ParticleSet,
    table: &ParameterTable,
    cell: &SimulationCell,
    options: ForceOptions,
) -> Result<ForceSummary, Error> {
    if options.parallel {
        accumulate_forces_parallel(particles, table, cell, options)
    } else {
        accumulate_forces_serial(particles, table, cell, options)
    }
}

/// Serial version of [`accumulate_forces`], visiting all pairs in order.
///
/// If this returns an error, the accelerations of some particles might
/// already contain some of the forces.
#[time_graph::instrument(name = "accumulate_forces_serial")]
pub fn accumulate_forces_serial(
    particles: &mut ParticleSet,
    table: &ParameterTable,
    cell: &SimulationCell,
    options: ForceOptions,
) -> Result<ForceSummary, Error> {
    let (types, positions, accelerations) = particles.forces_view();
    let evaluator = PairEvaluator::new(types, positions, table, cell, options)?;

    let mut summary = ForceSummary::default();
    let n_particles = positions.len();
    for i in 0..n_particles {
        for j in (i + 1)..n_particles {
            if let Some(contribution) = evaluator.evaluate(i, j)? {
                accelerations[i] += contribution.force;
                accelerations[j] -= contribution.force;
                summary.add(&contribution);
            }
        }
    }

    return Ok(summary);
}

/// Accelerations and energy accumulated by a single worker thread
struct PartialForces {
    accelerations: Vec<Vector3D>,
    summary: ForceSummary,
}

/// Parallel version of [`accumulate_forces`].
///
/// The loop over the first particle of each pair runs on the rayon thread
/// pool. Each thread accumulates forces in a private buffer, and the buffers
/// are summed into the accelerations after all pairs have been evaluated. If
/// this returns an error, the accelerations are left untouched.
#[time_graph::instrument(name = "accumulate_forces_parallel")]
pub fn accumulate_forces_parallel(
    particles: &mut ParticleSet,
    table: &ParameterTable,
    cell: &SimulationCell,
    options: ForceOptions,
) -> Result<ForceSummary, Error> {
    if particles.size() < 2 {
        warn!(
            "parallel force accumulation requested for {} particles, using the serial implementation",
            particles.size()
        );
        return accumulate_forces_serial(particles, table, cell, options);
    }

    let (types, positions, accelerations) = particles.forces_view();
    let evaluator = PairEvaluator::new(types, positions, table, cell, options)?;
    let n_particles = positions.len();

    let buffers = ThreadLocal::new();
    (0..n_particles).into_par_iter().try_for_each(|i| {
        let mut buffer = buffers.get_or(|| RefCell::new(PartialForces {
            accelerations: vec![Vector3D::zero(); n_particles],
            summary: ForceSummary::default(),
        })).borrow_mut();

        for j in (i + 1)..n_particles {
            if let Some(contribution) = evaluator.evaluate(i, j)? {
                buffer.accelerations[i] += contribution.force;
                buffer.accelerations[j] -= contribution.force;
                buffer.summary.add(&contribution);
            }
        }

        Ok::<(), Error>(())
    })?;

    let mut summary = ForceSummary::default();
    for buffer in buffers {
        let buffer = buffer.into_inner();
        for (acceleration, partial) in accelerations.iter_mut().zip(&buffer.accelerations) {
            *acceleration += partial;
        }
        summary.potential_energy += buffer.summary.potential_energy;
        summary.pairs += buffer.summary.pairs;
    }

    return Ok(summary);
}
