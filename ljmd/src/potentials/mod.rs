//! Pair potentials acting between particles, and their parameters.

mod lennard_jones;
pub use self::lennard_jones::{LennardJones, PairInteraction, lennard_jones};
pub use self::lennard_jones::CUTOFF_IN_SIGMA;

mod table;
pub use self::table::ParameterTable;
