use crate::{Error, Vector3D};
use crate::integrators::Integrator;
use crate::potentials::{LennardJones, ParameterTable};
use crate::systems::SimulationCell;

/// Parameters of the simulation cell
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CellParameters {
    /// Size of the cell along the `x`, `y` and `z` axes
    pub extent: [f64; 3],
    /// Should we use periodic boundary conditions?
    #[serde(default)]
    pub periodic: bool,
}

/// Lennard-Jones parameters for a single pair of particle types
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TypePairParameters {
    /// The two particle types in this pair, in any order
    pub types: [i32; 2],
    pub epsilon: f64,
    pub sigma: f64,
}

/// Energy and length scale of a Lennard-Jones potential
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InteractionParameters {
    pub epsilon: f64,
    pub sigma: f64,
}

/// Possible ways to define the Lennard-Jones interactions
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub enum LennardJonesParameters {
    /// Use the same parameters for all pairs of particles
    Global(InteractionParameters),
    /// Use different parameters depending on the types of the particles.
    /// Missing pairs between two different types are created with the
    /// Lorentz-Berthelot mixing rules.
    PerType(Vec<TypePairParameters>),
}

impl LennardJonesParameters {
    /// Create the corresponding parameter table
    pub fn parameter_table(&self) -> Result<ParameterTable, Error> {
        match self {
            LennardJonesParameters::Global(parameters) => {
                let parameters = LennardJones::new(parameters.epsilon, parameters.sigma)?;
                return Ok(ParameterTable::global(parameters));
            }
            LennardJonesParameters::PerType(pairs) => {
                let pairs = pairs.iter().map(|pair| {
                    let parameters = LennardJones::new(pair.epsilon, pair.sigma)?;
                    Ok((pair.types[0], pair.types[1], parameters))
                }).collect::<Result<Vec<_>, Error>>()?;

                return ParameterTable::new(&pairs);
            }
        }
    }
}

/// Parameters for a [`crate::Simulation`], which can be loaded from JSON.
///
/// ```
/// # use ljmd::SimulationParameters;
/// let parameters: SimulationParameters = serde_json::from_str(r#"{
///     "timestep": 0.001,
///     "integrator": "Verlet",
///     "cell": {"extent": [10.0, 10.0, 10.0], "periodic": true},
///     "cutoff": true,
///     "lennard_jones": {"Global": {"epsilon": 1.0, "sigma": 1.0}}
/// }"#).unwrap();
///
/// assert!(parameters.validate().is_ok());
/// assert!(!parameters.parallel);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SimulationParameters {
    /// Time step of the integration
    pub timestep: f64,
    /// Numerical scheme used to advance the positions
    pub integrator: Integrator,
    /// Simulation cell
    pub cell: CellParameters,
    /// Should we neglect interactions beyond 2.5 sigma?
    #[serde(default)]
    pub cutoff: bool,
    /// Parameters of the interactions between particles
    pub lennard_jones: LennardJonesParameters,
    /// Compute forces and integrate the equations of motion in parallel
    #[serde(default)]
    pub parallel: bool,
    /// Stop the simulation with an error if two particles are closer than
    /// this distance
    #[serde(default)]
    pub min_distance: Option<f64>,
}

impl SimulationParameters {
    /// Check that all the parameters are valid
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected positive timestep, got {}", self.timestep
            )));
        }

        if let Some(min_distance) = self.min_distance {
            if !(min_distance.is_finite() && min_distance > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "expected positive minimal distance, got {}", min_distance
                )));
            }
        }

        self.simulation_cell()?;
        self.lennard_jones.parameter_table()?;

        return Ok(());
    }

    /// Create the simulation cell corresponding to these parameters
    pub fn simulation_cell(&self) -> Result<SimulationCell, Error> {
        SimulationCell::new(Vector3D::from(self.cell.extent), self.cell.periodic)
    }
}
