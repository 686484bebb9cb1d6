use crate::Error;

/// Interactions are neglected beyond this distance, expressed in units of
/// `sigma`, when cutoffs are enabled.
pub const CUTOFF_IN_SIGMA: f64 = 2.5;

/// Result of the evaluation of a pair potential at a given distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairInteraction {
    /// Force between the particles divided by their distance, i.e. `-1/r
    /// dV/dr`. Multiplying this by the vector going from the second particle
    /// to the first one gives the force acting on the first particle. Positive
    /// values are repulsive.
    pub force: f64,
    /// Potential energy of the pair
    pub potential: f64,
}

/// Parameters of the Lennard-Jones potential
///
/// ```text
/// V(r) = 4 ε [(σ/r)^12 - (σ/r)^6]
/// ```
///
/// `σ^6` and `σ^12` are computed once when creating the parameters, and the
/// values can not be modified afterward. Use [`LennardJones::with_sigma`] or
/// [`LennardJones::with_epsilon`] to get a new set of parameters instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LennardJones {
    epsilon: f64,
    sigma: f64,
    sigma_6: f64,
    sigma_12: f64,
}

impl LennardJones {
    /// Create new Lennard-Jones parameters with the given energy scale
    /// `epsilon` and length scale `sigma`. Both must be positive and finite.
    pub fn new(epsilon: f64, sigma: f64) -> Result<LennardJones, Error> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected positive epsilon for Lennard-Jones potential, got {}", epsilon
            )));
        }

        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "expected positive sigma for Lennard-Jones potential, got {}", sigma
            )));
        }

        let sigma_6 = sigma.powi(6);
        return Ok(LennardJones {
            epsilon: epsilon,
            sigma: sigma,
            sigma_6: sigma_6,
            sigma_12: sigma_6 * sigma_6,
        });
    }

    /// Get new parameters with the same `epsilon` and a different `sigma`
    pub fn with_sigma(&self, sigma: f64) -> Result<LennardJones, Error> {
        LennardJones::new(self.epsilon, sigma)
    }

    /// Get new parameters with the same `sigma` and a different `epsilon`
    pub fn with_epsilon(&self, epsilon: f64) -> Result<LennardJones, Error> {
        LennardJones::new(epsilon, self.sigma)
    }

    /// Combine two sets of parameters with the Lorentz-Berthelot rules:
    /// arithmetic mean for `sigma`, geometric mean for `epsilon`.
    pub fn mix(&self, other: &LennardJones) -> LennardJones {
        let sigma = 0.5 * (self.sigma + other.sigma);
        let sigma_6 = sigma.powi(6);
        LennardJones {
            epsilon: f64::sqrt(self.epsilon * other.epsilon),
            sigma: sigma,
            sigma_6: sigma_6,
            sigma_12: sigma_6 * sigma_6,
        }
    }

    /// Energy scale of the potential
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Length scale of the potential
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// `sigma^6`
    pub fn sigma_6(&self) -> f64 {
        self.sigma_6
    }

    /// `sigma^12`
    pub fn sigma_12(&self) -> f64 {
        self.sigma_12
    }

    /// Distance after which interactions are neglected when using cutoffs
    pub fn cutoff(&self) -> f64 {
        CUTOFF_IN_SIGMA * self.sigma
    }

    /// Evaluate the potential and force at distance `r`, see
    /// [`lennard_jones`].
    #[inline]
    pub fn compute(&self, r: f64) -> PairInteraction {
        lennard_jones(r, self)
    }
}

/// Evaluate the Lennard-Jones force and potential energy for two particles at
/// distance `r > 0`.
///
/// Nothing prevents calling this with `r = 0`, the result will then be
/// infinite or NaN.
#[inline]
pub fn lennard_jones(r: f64, parameters: &LennardJones) -> PairInteraction {
    let ri = 1.0 / r;
    let ri3 = ri * ri * ri;
    let ri6 = ri3 * ri3;

    let epsilon = parameters.epsilon;
    PairInteraction {
        force: 48.0 * epsilon * ri6 * ri * ri * (parameters.sigma_12 * ri6 - 0.5 * parameters.sigma_6),
        potential: 4.0 * epsilon * ri6 * (parameters.sigma_12 * ri6 - parameters.sigma_6),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_relative_eq, assert_ulps_eq};

    #[test]
    fn invalid_parameters() {
        assert!(LennardJones::new(0.0, 1.0).is_err());
        assert!(LennardJones::new(-1.0, 1.0).is_err());
        assert!(LennardJones::new(1.0, 0.0).is_err());
        assert!(LennardJones::new(1.0, f64::NAN).is_err());
        assert!(LennardJones::new(f64::INFINITY, 1.0).is_err());

        let error = LennardJones::new(1.0, -2.0).unwrap_err();
        assert_eq!(error.to_string(), "invalid parameter: expected positive sigma for Lennard-Jones potential, got -2");
    }

    #[test]
    fn cached_powers() {
        let lj = LennardJones::new(0.8, 1.5).unwrap();
        assert_ulps_eq!(lj.sigma_6(), 1.5f64.powi(6));
        assert_ulps_eq!(lj.sigma_12(), 1.5f64.powi(12));
        assert_eq!(lj.cutoff(), 3.75);

        let lj = lj.with_sigma(2.0).unwrap();
        assert_eq!(lj.epsilon(), 0.8);
        assert_eq!(lj.sigma(), 2.0);
        assert_eq!(lj.sigma_6(), 64.0);
        assert_eq!(lj.sigma_12(), 4096.0);
        assert_eq!(lj.cutoff(), 5.0);

        let lj = lj.with_epsilon(3.0).unwrap();
        assert_eq!(lj.epsilon(), 3.0);
        assert_eq!(lj.sigma_12(), 4096.0);
    }

    #[test]
    fn minimum() {
        let lj = LennardJones::new(1.0, 1.0).unwrap();
        let r_min = f64::powf(2.0, 1.0 / 6.0);

        let interaction = lj.compute(r_min);
        assert_relative_eq!(interaction.force, 0.0, epsilon = 1e-12);
        assert_relative_eq!(interaction.potential, -1.0, max_relative = 1e-12);

        let lj = LennardJones::new(2.5, 0.5).unwrap();
        let interaction = lj.compute(0.5 * r_min);
        assert_relative_eq!(interaction.force, 0.0, epsilon = 1e-10);
        assert_relative_eq!(interaction.potential, -2.5, max_relative = 1e-12);
    }

    #[test]
    fn sign_and_zero_crossing() {
        let lj = LennardJones::new(1.0, 1.0).unwrap();

        // V(sigma) = 0, and the force is repulsive
        let interaction = lj.compute(1.0);
        assert_eq!(interaction.potential, 0.0);
        assert_eq!(interaction.force, 24.0);

        // attractive beyond the minimum
        let interaction = lj.compute(1.5);
        assert!(interaction.force < 0.0);
        assert!(interaction.potential < 0.0);

        // coincident particles give non-finite values instead of crashing
        let interaction = lj.compute(0.0);
        assert!(!interaction.force.is_finite());
    }

    #[test]
    fn force_is_derivative_of_potential() {
        let lj = LennardJones::new(1.3, 0.9).unwrap();
        let delta = 1e-6;
        for &r in &[0.85, 1.0, 1.2, 1.7, 2.4] {
            let interaction = lj.compute(r);
            let finite_difference = -(lj.compute(r + delta).potential - lj.compute(r - delta).potential) / (2.0 * delta);
            assert_relative_eq!(interaction.force * r, finite_difference, max_relative = 1e-6);
        }
    }

    #[test]
    fn lorentz_berthelot() {
        let a = LennardJones::new(1.0, 1.0).unwrap();
        let b = LennardJones::new(4.0, 2.0).unwrap();

        let mixed = a.mix(&b);
        assert_eq!(mixed.epsilon(), 2.0);
        assert_eq!(mixed.sigma(), 1.5);
        assert_eq!(mixed, LennardJones::new(2.0, 1.5).unwrap());
        assert_eq!(a.mix(&a), a);
    }
}
