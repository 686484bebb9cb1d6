use ndarray::Array2;

use crate::{Error, Vector3D};

/// A single particle, used to add particles to a [`ParticleSet`] and to
/// inspect them afterward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Type of the particle, used to select the interaction parameters
    pub particle_type: i32,
    /// Current position
    pub position: Vector3D,
    /// Position at the previous time step, used by the Verlet integrator
    pub previous_position: Vector3D,
    /// Current velocity
    pub velocity: Vector3D,
    /// Acceleration from the last force evaluation
    pub acceleration: Vector3D,
}

impl Particle {
    /// Create a new particle with the given type, position and velocity. The
    /// previous position is set to the current position and the acceleration
    /// to zero.
    pub fn new(particle_type: i32, position: Vector3D, velocity: Vector3D) -> Particle {
        Particle {
            particle_type: particle_type,
            position: position,
            previous_position: position,
            velocity: velocity,
            acceleration: Vector3D::zero(),
        }
    }
}

/// Per-particle quantities stored in a [`ParticleSet`], which can be exported
/// with [`ParticleSet::to_array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Positions,
    PreviousPositions,
    Velocities,
    Accelerations,
}

/// Storage for all the particles in a simulation.
///
/// All particles have unit mass. The data is stored as one array per
/// property, and each property can be accessed as a slice of length
/// [`ParticleSet::size`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSet {
    types: Vec<i32>,
    positions: Vec<Vector3D>,
    previous_positions: Vec<Vector3D>,
    velocities: Vec<Vector3D>,
    accelerations: Vec<Vector3D>,
}

/// Mutable views inside a [`ParticleSet`] used by the integrators: everything
/// except the accelerations can be modified.
pub struct KinematicsMut<'a> {
    pub positions: &'a mut [Vector3D],
    pub previous_positions: &'a mut [Vector3D],
    pub velocities: &'a mut [Vector3D],
    pub accelerations: &'a [Vector3D],
}

impl ParticleSet {
    /// Create a new empty set of particles
    pub fn new() -> ParticleSet {
        ParticleSet::default()
    }

    /// Create a set of particles containing all the given `particles`
    pub fn from_particles<I>(particles: I) -> Result<ParticleSet, Error> where I: IntoIterator<Item=Particle> {
        let mut set = ParticleSet::new();
        for particle in particles {
            set.add_particle(particle)?;
        }
        return Ok(set);
    }

    /// Add a `particle` at the end of this set. All the vectors in the
    /// particle must be finite.
    pub fn add_particle(&mut self, particle: Particle) -> Result<(), Error> {
        let all_finite = particle.position.is_finite()
            && particle.previous_position.is_finite()
            && particle.velocity.is_finite()
            && particle.acceleration.is_finite();

        if !all_finite {
            return Err(Error::InvalidParameter(format!(
                "particle {} contains non finite values: {:?}", self.size(), particle
            )));
        }

        self.types.push(particle.particle_type);
        self.positions.push(particle.position);
        self.previous_positions.push(particle.previous_position);
        self.velocities.push(particle.velocity);
        self.accelerations.push(particle.acceleration);
        Ok(())
    }

    /// Get the number of particles in this set
    pub fn size(&self) -> usize {
        self.types.len()
    }

    /// Check if this set does not contain any particle
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Get a copy of the particle at index `i`
    ///
    /// # Panics
    ///
    /// If `i` is out of bounds
    pub fn particle(&self, i: usize) -> Particle {
        Particle {
            particle_type: self.types[i],
            position: self.positions[i],
            previous_position: self.previous_positions[i],
            velocity: self.velocities[i],
            acceleration: self.accelerations[i],
        }
    }

    /// Iterate over copies of all the particles in this set
    pub fn iter(&self) -> impl ExactSizeIterator<Item=Particle> + '_ {
        (0..self.size()).map(move |i| self.particle(i))
    }

    pub fn types(&self) -> &[i32] {
        &self.types
    }

    pub fn positions(&self) -> &[Vector3D] {
        &self.positions
    }

    pub fn positions_mut(&mut self) -> &mut [Vector3D] {
        &mut self.positions
    }

    pub fn previous_positions(&self) -> &[Vector3D] {
        &self.previous_positions
    }

    pub fn previous_positions_mut(&mut self) -> &mut [Vector3D] {
        &mut self.previous_positions
    }

    pub fn velocities(&self) -> &[Vector3D] {
        &self.velocities
    }

    pub fn velocities_mut(&mut self) -> &mut [Vector3D] {
        &mut self.velocities
    }

    pub fn accelerations(&self) -> &[Vector3D] {
        &self.accelerations
    }

    /// Set all accelerations to zero. This must be done before accumulating
    /// new forces.
    pub fn zero_accelerations(&mut self) {
        for acceleration in &mut self.accelerations {
            *acceleration = Vector3D::zero();
        }
    }

    /// Sum of the accelerations of all particles. Since all forces are
    /// pairwise, this should be zero up to rounding errors.
    pub fn total_acceleration(&self) -> Vector3D {
        self.accelerations.iter().sum()
    }

    /// Kinetic energy of all particles, `1/2 sum v^2` with unit masses
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.velocities.iter().map(Vector3D::norm2).sum::<f64>()
    }

    /// Export one of the per-particle `property` as an array of shape
    /// `(size, 3)`
    pub fn to_array(&self, property: Property) -> Array2<f64> {
        let values = match property {
            Property::Positions => &self.positions,
            Property::PreviousPositions => &self.previous_positions,
            Property::Velocities => &self.velocities,
            Property::Accelerations => &self.accelerations,
        };

        let mut array = Array2::zeros((values.len(), 3));
        for (mut row, value) in array.rows_mut().into_iter().zip(values) {
            row[0] = value[0];
            row[1] = value[1];
            row[2] = value[2];
        }
        return array;
    }

    /// Get the types and positions together with mutable accelerations, to
    /// accumulate forces
    pub(crate) fn forces_view(&mut self) -> (&[i32], &[Vector3D], &mut [Vector3D]) {
        (&self.types, &self.positions, &mut self.accelerations)
    }

    /// Get mutable access to the data used by the integrators
    pub(crate) fn kinematics_mut(&mut self) -> KinematicsMut<'_> {
        KinematicsMut {
            positions: &mut self.positions,
            previous_positions: &mut self.previous_positions,
            velocities: &mut self.velocities,
            accelerations: &self.accelerations,
        }
    }
}
