//! The `SimulationCell` type represents the orthorhombic box enclosing the
//! particles, optionally with periodic boundary conditions.
use crate::{Error, Vector3D};
use crate::geometry::{wrap_into_cell, periodic_images};

/// A `SimulationCell` defines the physical boundaries of a simulation.
///
/// When the cell is periodic, particles leaving the cell re-enter it on the
/// opposite side, and interactions are summed over the 27 periodic images of
/// each particle. When it is not periodic, the extent is only informative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationCell {
    /// Side lengths of the cell
    extent: Vector3D,
    /// Are periodic boundary conditions active?
    periodic: bool,
    /// Translations to the periodic images, cached from extent
    images: [Vector3D; 27],
}

impl SimulationCell {
    /// Create a new cell with the given `extent` (side lengths along `x`,
    /// `y` and `z`).
    pub fn new(extent: Vector3D, periodic: bool) -> Result<SimulationCell, Error> {
        for k in 0..3 {
            if !(extent[k].is_finite() && extent[k] > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "cell extent must be positive and finite, got [{}, {}, {}]",
                    extent[0], extent[1], extent[2]
                )));
            }
        }

        Ok(SimulationCell {
            extent: extent,
            periodic: periodic,
            images: periodic_images(extent),
        })
    }

    /// Create a periodic cubic cell, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> Result<SimulationCell, Error> {
        SimulationCell::new(Vector3D::new(length, length, length), true)
    }

    /// Get the side lengths of the cell
    pub fn extent(&self) -> Vector3D {
        self.extent
    }

    /// Check if this cell uses periodic boundary conditions
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Get the volume of the cell
    pub fn volume(&self) -> f64 {
        self.extent[0] * self.extent[1] * self.extent[2]
    }

    /// Get the smallest side length of the cell
    pub fn smallest_side(&self) -> f64 {
        f64::min(self.extent[0], f64::min(self.extent[1], self.extent[2]))
    }

    /// Translations from a particle to its 27 periodic images, including the
    /// identity. This is only meaningful for periodic cells.
    pub fn images(&self) -> &[Vector3D; 27] {
        &self.images
    }

    /// Check if `position` is inside the cell, i.e. `0 <= position[k] <
    /// extent[k]` for all axes.
    pub fn contains(&self, position: Vector3D) -> bool {
        (0..3).all(|k| position[k] >= 0.0 && position[k] < self.extent[k])
    }

    /// Wrap a vector in the cell, obeying the periodic boundary conditions.
    /// This does nothing for non-periodic cells.
    pub fn wrap_vector(&self, vector: &mut Vector3D) {
        if self.periodic {
            *vector = wrap_into_cell(*vector, self.extent);
        }
    }

    /// Wrap a particle `position` inside the cell, and apply the same
    /// translation to `previous`, so that the displacement between the two
    /// positions is preserved. Only `position` is guaranteed to end up inside
    /// the cell.
    ///
    /// This returns an error if `position` can not be wrapped inside the cell,
    /// for example if it is not finite.
    pub fn wrap_particle(&self, position: &mut Vector3D, previous: &mut Vector3D) -> Result<(), Error> {
        if !self.periodic {
            return Ok(());
        }

        let wrapped = wrap_into_cell(*position, self.extent);
        if !self.contains(wrapped) {
            return Err(Error::StateCorruption(format!(
                "position [{}, {}, {}] can not be wrapped inside the cell",
                position[0], position[1], position[2]
            )));
        }

        *previous -= *position - wrapped;
        *position = wrapped;
        Ok(())
    }
}
