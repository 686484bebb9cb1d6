mod cell;
pub use self::cell::SimulationCell;

mod particles;
pub use self::particles::{Particle, ParticleSet, Property};
pub(crate) use self::particles::KinematicsMut;

#[cfg(test)]
pub(crate) mod test_utils;
