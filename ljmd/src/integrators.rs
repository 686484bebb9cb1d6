use rayon::prelude::*;

use crate::Vector3D;
use crate::systems::{KinematicsMut, ParticleSet};

/// Numerical schemes used to advance the particles by one time step, using
/// the accelerations computed for the current positions.
///
/// The scheme is chosen once for a whole simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub enum Integrator {
    /// Position (Störmer) Verlet integrator, using the current and previous
    /// positions of the particles. The previous positions must be consistent
    /// with the initial velocities before the first step, see
    /// [`crate::Simulation::prepare`].
    ///
    /// This also stores the central difference velocity for the current
    /// positions in the particles.
    Verlet,
    /// Explicit Euler integrator, using the current positions and velocities
    Euler {
        /// Add `acceleration * dt^2` to the position update
        #[serde(default)]
        acceleration_term: bool,
    },
}

impl Integrator {
    /// Advance a single particle by one time step `dt`
    #[inline]
    pub fn step(
        &self,
        position: &mut Vector3D,
        previous_position: &mut Vector3D,
        velocity: &mut Vector3D,
        acceleration: Vector3D,
        dt: f64,
    ) {
        match *self {
            Integrator::Verlet => verlet_step(position, previous_position, velocity, acceleration, dt),
            Integrator::Euler { acceleration_term } => euler_step(
                position, previous_position, velocity, acceleration, dt, acceleration_term
            ),
        }
    }

    /// Advance all `particles` by one time step `dt`, using their current
    /// accelerations. With `parallel`, the particles are distributed over the
    /// rayon thread pool.
    #[time_graph::instrument(name = "Integrator::integrate")]
    pub fn integrate(&self, particles: &mut ParticleSet, dt: f64, parallel: bool) {
        let KinematicsMut { positions, previous_positions, velocities, accelerations } = particles.kinematics_mut();

        if parallel {
            positions.par_iter_mut()
                .zip_eq(previous_positions.par_iter_mut())
                .zip_eq(velocities.par_iter_mut())
                .zip_eq(accelerations.par_iter())
                .for_each(|(((position, previous), velocity), &acceleration)| {
                    self.step(position, previous, velocity, acceleration, dt);
                });
        } else {
            let iter = positions.iter_mut()
                .zip(previous_positions.iter_mut())
                .zip(velocities.iter_mut())
                .zip(accelerations);

            for (((position, previous), velocity), &acceleration) in iter {
                self.step(position, previous, velocity, acceleration, dt);
            }
        }
    }
}

/// Verlet step: `x(t + dt) = 2 x(t) - x(t - dt) + a dt^2`.
///
/// The velocity is set to `(x(t + dt) - x(t - dt)) / 2 dt`, which is the
/// velocity at time `t`, the same time as the acceleration.
#[inline]
fn verlet_step(
    position: &mut Vector3D,
    previous_position: &mut Vector3D,
    velocity: &mut Vector3D,
    acceleration: Vector3D,
    dt: f64,
) {
    let next = 2.0 * *position - *previous_position + acceleration * (dt * dt);
    *velocity = (next - *previous_position) / (2.0 * dt);
    *previous_position = *position;
    *position = next;
}

/// Euler step: `x(t + dt) = x(t) + v dt [+ a dt^2]`, then `v += a dt`
#[inline]
fn euler_step(
    position: &mut Vector3D,
    previous_position: &mut Vector3D,
    velocity: &mut Vector3D,
    acceleration: Vector3D,
    dt: f64,
    acceleration_term: bool,
) {
    *previous_position = *position;

    let mut next = *previous_position + *velocity * dt;
    if acceleration_term {
        next += acceleration * (dt * dt);
    }
    *position = next;

    *velocity += acceleration * dt;
}
