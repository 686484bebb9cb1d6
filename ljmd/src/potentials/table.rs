use std::collections::BTreeMap;

use log::info;
use ndarray::Array2;

use crate::Error;
use super::LennardJones;

/// Lennard-Jones parameters for all pairs of particle types in a simulation.
///
/// The table either contains a single set of parameters used for all pairs
/// ([`ParameterTable::global`]), or explicit parameters for unordered pairs of
/// particle types ([`ParameterTable::new`]). Parameters for a pair of
/// different types that is not explicitly given are created with the
/// Lorentz-Berthelot mixing rules if both types have parameters with
/// themselves.
///
/// Particle types are resolved to dense indexes once with
/// [`ParameterTable::type_indexes`], and parameters are then accessed with
/// [`ParameterTable::by_index`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTable {
    /// Sorted list of particle types known to this table. This is empty for
    /// global tables.
    types: Vec<i32>,
    /// Parameters for each pair of type indexes, symmetric
    parameters: Array2<LennardJones>,
}

impl ParameterTable {
    /// Create a table using the same `parameters` for all pairs of particles,
    /// regardless of their types.
    pub fn global(parameters: LennardJones) -> ParameterTable {
        ParameterTable {
            types: Vec::new(),
            parameters: Array2::from_elem((1, 1), parameters),
        }
    }

    /// Create a table from a list of `(type_a, type_b, parameters)`. Pairs are
    /// unordered, so `(a, b)` and `(b, a)` refer to the same pair and can not
    /// both be given.
    ///
    /// All pairs of types appearing in `pairs` must either have explicit
    /// parameters or get them from the mixing of the corresponding self pairs.
    pub fn new(pairs: &[(i32, i32, LennardJones)]) -> Result<ParameterTable, Error> {
        if pairs.is_empty() {
            return Err(Error::InvalidParameter(
                "expected at least one pair of types in the Lennard-Jones parameters".into()
            ));
        }

        let mut explicit = BTreeMap::new();
        for &(a, b, parameters) in pairs {
            let key = (i32::min(a, b), i32::max(a, b));
            if explicit.insert(key, parameters).is_some() {
                return Err(Error::InvalidParameter(format!(
                    "Lennard-Jones parameters for types {} and {} are given more than once",
                    key.0, key.1
                )));
            }
        }

        let mut types = explicit.keys()
            .flat_map(|&(a, b)| [a, b])
            .collect::<Vec<_>>();
        types.sort_unstable();
        types.dedup();

        let n_types = types.len();
        let mut all_parameters = Vec::with_capacity(n_types * n_types);
        for &a in &types {
            for &b in &types {
                let key = (i32::min(a, b), i32::max(a, b));
                if let Some(&parameters) = explicit.get(&key) {
                    all_parameters.push(parameters);
                    continue;
                }

                let self_a = explicit.get(&(a, a));
                let self_b = explicit.get(&(b, b));
                match (self_a, self_b) {
                    (Some(self_a), Some(self_b)) if a != b => {
                        if a < b {
                            info!(
                                "using Lorentz-Berthelot mixing rules for Lennard-Jones parameters between types {} and {}",
                                a, b
                            );
                        }
                        all_parameters.push(self_a.mix(self_b));
                    }
                    _ => {
                        return Err(Error::InvalidParameter(format!(
                            "missing Lennard-Jones parameters for types {} and {}",
                            key.0, key.1
                        )));
                    }
                }
            }
        }

        let parameters = Array2::from_shape_vec((n_types, n_types), all_parameters)
            .expect("wrong number of parameters in the table");

        return Ok(ParameterTable {
            types: types,
            parameters: parameters,
        });
    }

    /// Does this table use the same parameters for all types?
    pub fn is_global(&self) -> bool {
        self.types.is_empty()
    }

    /// Particle types with known parameters, sorted in increasing order. This
    /// is empty for global tables.
    pub fn types(&self) -> &[i32] {
        &self.types
    }

    /// Get the parameters for the pair of types `a` and `b`, if they are
    /// known to this table
    pub fn get(&self, a: i32, b: i32) -> Option<&LennardJones> {
        let i = self.type_index(a)?;
        let j = self.type_index(b)?;
        return Some(&self.parameters[[i, j]]);
    }

    /// Resolve a list of particle types to the indexes used by
    /// [`ParameterTable::by_index`]. This returns an error if any of the
    /// types is not in the table.
    pub fn type_indexes(&self, types: &[i32]) -> Result<Vec<usize>, Error> {
        types.iter().map(|&particle_type| {
            self.type_index(particle_type).ok_or_else(|| Error::InvalidParameter(format!(
                "missing Lennard-Jones parameters for particle type {}", particle_type
            )))
        }).collect()
    }

    /// Get the parameters for a pair of type indexes, as returned by
    /// [`ParameterTable::type_indexes`].
    ///
    /// # Panics
    ///
    /// If one of the indexes is out of bounds
    #[inline]
    pub fn by_index(&self, i: usize, j: usize) -> &LennardJones {
        &self.parameters[[i, j]]
    }

    /// Largest cutoff of all the parameters in this table
    pub fn max_cutoff(&self) -> f64 {
        self.parameters.iter().map(LennardJones::cutoff).fold(0.0, f64::max)
    }

    fn type_index(&self, particle_type: i32) -> Option<usize> {
        if self.is_global() {
            Some(0)
        } else {
            self.types.binary_search(&particle_type).ok()
        }
    }
}
