use core::fmt;

use thiserror::Error;

/// The numerical solvers that can fail to converge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solver {
    /// Newton-Raphson on the elliptic Kepler equation `M = E - e sin E`.
    Kepler,
    /// Newton-Raphson on the hyperbolic Kepler equation `M = e sinh F - F`.
    HyperbolicKepler,
    /// The secant iteration on the semi-latus rectum of a Lambert transfer.
    Lambert,
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Solver::Kepler => write!(f, "Kepler equation solver"),
            Solver::HyperbolicKepler => write!(f, "hyperbolic Kepler equation solver"),
            Solver::Lambert => write!(f, "Lambert transfer solver"),
        }
    }
}

/// An error raised at the boundary of numerical validity.
///
/// Computations in this crate never hand back silently wrong numbers:
/// they either clamp round-off noise back into range, or fail with one
/// of these variants.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Error)]
pub enum OrbitError {
    /// An input lies outside the domain of the equation being solved.
    ///
    /// Values that fall outside the valid range only because of floating
    /// point round-off are clamped instead of raising this error.
    #[error("{quantity} = {value} is out of domain: {reason}")]
    Domain {
        /// The name of the offending quantity.
        quantity: &'static str,
        /// The offending value.
        value: f64,
        /// Why the value is not acceptable.
        reason: &'static str,
    },

    /// An iterative solver ran out of iterations before meeting its tolerance.
    #[error("{solver} did not converge after {iterations} iterations (residual {residual:e})")]
    Convergence {
        /// Which solver gave up.
        solver: Solver,
        /// How many iterations were performed.
        iterations: u32,
        /// The last residual, in the solver's own units.
        residual: f64,
    },

    /// The trajectory is exactly parabolic, which is not supported.
    #[error("parabolic trajectories (eccentricity of exactly 1) are not supported")]
    Parabolic,
}

impl OrbitError {
    pub(crate) fn domain(quantity: &'static str, value: f64, reason: &'static str) -> Self {
        OrbitError::Domain {
            quantity,
            value,
            reason,
        }
    }
}

/// How far outside `[-1, 1]` an `acos`/`asin` argument may stray before
/// it is treated as a real domain violation rather than round-off.
pub(crate) const CLAMP_TOLERANCE: f64 = 1e-9;

/// Clamps a cosine or sine value into `[-1, 1]`.
///
/// Values within [`CLAMP_TOLERANCE`] of the range are pulled back in;
/// anything further out is a [`OrbitError::Domain`].
pub(crate) fn clamp_unit(quantity: &'static str, value: f64) -> Result<f64, OrbitError> {
    if value.is_nan() {
        return Err(OrbitError::domain(quantity, value, "not a number"));
    }
    if value.abs() <= 1.0 {
        return Ok(value);
    }
    if value.abs() <= 1.0 + CLAMP_TOLERANCE {
        log::debug!("clamping {quantity} = {value} into [-1, 1]");
        return Ok(value.clamp(-1.0, 1.0));
    }
    Err(OrbitError::domain(
        quantity,
        value,
        "expected a value within [-1, 1]",
    ))
}
