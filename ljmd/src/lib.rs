#![warn(clippy::all, clippy::pedantic)]

// disable some style lints
#![allow(clippy::needless_return, clippy::must_use_candidate, clippy::comparison_chain)]
#![allow(clippy::redundant_field_names, clippy::redundant_closure_for_method_calls)]
#![allow(clippy::unreadable_literal, clippy::option_if_let_else, clippy::range_plus_one)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc, clippy::module_name_repetitions)]
#![allow(clippy::many_single_char_names, clippy::similar_names)]

#![allow(clippy::cast_precision_loss)]

// Tests lints
#![cfg_attr(test, allow(clippy::float_cmp))]

//! Molecular dynamics of point particles interacting with Lennard-Jones
//! potentials.
//!
//! A [`Simulation`] advances a [`ParticleSet`] in time by repeatedly calling
//! [`Simulation::advance`]. Each step resets the accelerations, accumulates
//! the forces acting between all pairs of particles (including periodic
//! images when the [`SimulationCell`] is periodic), integrates the equations
//! of motion with the selected [`Integrator`] and wraps the particles back
//! inside the cell.

pub mod types;
pub use types::*;

mod errors;
pub use self::errors::Error;

pub mod geometry;

pub mod systems;
pub use self::systems::{Particle, ParticleSet, Property, SimulationCell};

pub mod potentials;
pub use self::potentials::{LennardJones, ParameterTable};

pub mod forces;
pub use self::forces::{ForceOptions, ForceSummary};

mod integrators;
pub use self::integrators::Integrator;

mod parameters;
pub use self::parameters::{SimulationParameters, CellParameters};
pub use self::parameters::{LennardJonesParameters, InteractionParameters, TypePairParameters};

mod simulation;
pub use self::simulation::{Simulation, StepReport, advance};
