//! Lambert's problem: the conic connecting two positions in a given time.
//!
//! The solver iterates on the semi-latus rectum `p` of the transfer orbit
//! using the p-iteration method with a secant update, since the flight time
//! has no closed-form derivative in `p`.
//!
//! Source: <http://www.braeunig.us/space/orbmech.htm#transfer>

use core::f64::consts::{PI, TAU};

use glam::DVec3;
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{angle_between, anomaly::normalize_angle, Orbit, OrbitError, Solver, StateVectors};

/// Smallest `|sin(transfer angle)|` the solver accepts.
///
/// Transfers through (nearly) 0 or 180 degrees don't define a transfer
/// plane, and the `g` coefficient vanishes.
const MIN_SIN_TRANSFER_ANGLE: f64 = 1e-9;

/// Which way around the parent body a transfer goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TransferPath {
    /// Sweeps the angle between the two positions, less than 180 degrees.
    #[default]
    ShortWay,
    /// Sweeps the rest of the circle, more than 180 degrees.
    LongWay,
}

/// Settings for the Lambert solver.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransferOptions {
    /// How close the flight time must get to the requested duration,
    /// in seconds.
    pub time_tolerance: f64,
    /// How many secant steps to take before giving up.
    pub max_iterations: u32,
    /// Which way around the parent body to go.
    pub path: TransferPath,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            time_tolerance: 1.0,
            max_iterations: 64,
            path: TransferPath::ShortWay,
        }
    }
}

/// The solution of a Lambert problem.
///
/// Holds the solved transfer conic between `origin` and `destination`:
/// its semi-latus rectum, semi-major axis, swept true anomaly and flight
/// time. Departure and capture velocities follow from the Lagrange
/// coefficients `f`, `g`, `f'` and `g'`.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use keplerian_transfer::{units::{AU, days}, Transfer};
///
/// # fn main() -> Result<(), keplerian_transfer::OrbitError> {
/// let earth = DVec3::new(0.473265, -0.899215, 0.0) * AU;
/// let mars = DVec3::new(0.066842, 1.561256, 0.030948) * AU;
///
/// let transfer = Transfer::new(earth, mars, days(207.0), 1.32712438e20)?;
///
/// assert!((transfer.get_parameter() / AU - 1.250633).abs() < 5e-6);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transfer {
    origin: DVec3,
    destination: DVec3,
    parameter: f64,
    semi_major_axis: f64,
    transfer_angle: f64,
    time: f64,
    mu: f64,
    iterations: u32,
}

/// The parts of a Lambert problem that don't depend on `p`.
struct Geometry {
    r1: f64,
    r2: f64,
    transfer_angle: f64,
    k: f64,
    l: f64,
    m: f64,
    mu: f64,
}

/// A trial transfer orbit for one value of `p`.
#[derive(Clone, Copy, Debug)]
struct Trial {
    parameter: f64,
    semi_major_axis: f64,
    time: f64,
}

impl Geometry {
    fn new(origin: DVec3, destination: DVec3, transfer_angle: f64, mu: f64) -> Self {
        let r1 = origin.length();
        let r2 = destination.length();
        let cos_angle = transfer_angle.cos();

        Geometry {
            r1,
            r2,
            transfer_angle,
            k: r1 * r2 * (1.0 - cos_angle),
            l: r1 + r2,
            m: r1 * r2 * (1.0 + cos_angle),
            mu,
        }
    }

    fn is_long_way(&self) -> bool {
        self.transfer_angle > PI
    }

    /// The `p` of the parabolic transfer, which bounds the valid range:
    /// `p_i` from below on the short way, `p_ii` from above on the long way.
    fn parabolic_parameter(&self) -> f64 {
        let root = (2.0 * self.m).sqrt();
        if self.is_long_way() {
            self.k / (self.l - root)
        } else {
            self.k / (self.l + root)
        }
    }

    /// Two starting guesses for `p`.
    fn initial_parameters(&self) -> (f64, f64) {
        if self.is_long_way() {
            let p0 = 0.95 * self.parabolic_parameter();
            (p0, 0.95 * p0)
        } else {
            let p0 = (self.r1 + self.r2) * 0.5;
            (p0, 1.05 * p0)
        }
    }

    /// Keeps a secant step within the range of valid `p` by bisecting
    /// towards the bound it overshot.
    fn constrain(&self, parameter: f64, previous: f64) -> f64 {
        let bound = self.parabolic_parameter();

        if self.is_long_way() {
            if parameter >= bound {
                return (previous + bound) * 0.5;
            }
            if parameter <= 0.0 {
                return previous * 0.5;
            }
        } else if parameter <= bound {
            return (previous + bound) * 0.5;
        }
        parameter
    }

    fn one_minus_cos(&self) -> f64 {
        1.0 - self.transfer_angle.cos()
    }

    fn f(&self, parameter: f64) -> f64 {
        1.0 - self.r2 * self.one_minus_cos() / parameter
    }

    fn g(&self, parameter: f64) -> f64 {
        self.r1 * self.r2 * self.transfer_angle.sin() / (self.mu * parameter).sqrt()
    }

    fn f_dot(&self, parameter: f64) -> f64 {
        (self.mu / parameter).sqrt()
            * (self.transfer_angle * 0.5).tan()
            * (self.one_minus_cos() / parameter - 1.0 / self.r1 - 1.0 / self.r2)
    }

    fn g_dot(&self, parameter: f64) -> f64 {
        1.0 - self.r1 * self.one_minus_cos() / parameter
    }

    /// `a = m k p / ((2m - l^2) p^2 + 2 k l p - k^2)`
    fn semi_major_axis(&self, parameter: f64) -> f64 {
        let (k, l, m) = (self.k, self.l, self.m);
        m * k * parameter
            / ((2.0 * m - l * l) * parameter * parameter + 2.0 * k * l * parameter - k * k)
    }

    fn trial(&self, parameter: f64) -> Trial {
        let semi_major_axis = self.semi_major_axis(parameter);
        let f = self.f(parameter);
        let g = self.g(parameter);

        let time = if semi_major_axis > 0.0 {
            let cos_delta = 1.0 - self.r1 * (1.0 - f) / semi_major_axis;
            let sin_delta =
                -self.r1 * self.r2 * self.f_dot(parameter) / (self.mu * semi_major_axis).sqrt();
            let delta = normalize_angle(sin_delta.atan2(cos_delta));

            g + (semi_major_axis.powi(3) / self.mu).sqrt() * (delta - delta.sin())
        } else {
            let delta = (1.0 - self.r1 * (1.0 - f) / semi_major_axis).acosh();

            g + ((-semi_major_axis).powi(3) / self.mu).sqrt() * (delta.sinh() - delta)
        };

        Trial {
            parameter,
            semi_major_axis,
            time,
        }
    }
}

impl Transfer {
    /// Solves the Lambert problem with the default [`TransferOptions`].
    ///
    /// # Arguments
    /// * `origin` - The starting position, in meters, relative to the parent body
    /// * `destination` - The final position, in meters, relative to the parent body
    /// * `duration` - The flight time, in seconds
    /// * `mu` - The gravitational parameter of the parent body, in m^3/s^2
    ///
    /// # Errors
    /// See [`with_options`][Self::with_options].
    pub fn new(
        origin: DVec3,
        destination: DVec3,
        duration: f64,
        mu: f64,
    ) -> Result<Transfer, OrbitError> {
        Self::with_options(origin, destination, duration, mu, &TransferOptions::default())
    }

    /// Solves the Lambert problem.
    ///
    /// # Errors
    /// - [`OrbitError::Domain`] for a non-positive duration or
    ///   gravitational parameter, a zero position, or positions that are
    ///   (nearly) collinear with the parent body.
    /// - [`OrbitError::Convergence`] if the flight time doesn't get within
    ///   `options.time_tolerance` of `duration` in `options.max_iterations`
    ///   steps, or the iteration breaks down.
    pub fn with_options(
        origin: DVec3,
        destination: DVec3,
        duration: f64,
        mu: f64,
        options: &TransferOptions,
    ) -> Result<Transfer, OrbitError> {
        if duration <= 0.0 || !duration.is_finite() {
            return Err(OrbitError::domain(
                "duration",
                duration,
                "expected a finite, positive flight time",
            ));
        }
        if mu <= 0.0 || !mu.is_finite() {
            return Err(OrbitError::domain(
                "gravitational parameter",
                mu,
                "expected a finite, positive value",
            ));
        }

        let short_angle = angle_between(origin, destination)?;
        if short_angle.sin().abs() < MIN_SIN_TRANSFER_ANGLE {
            return Err(OrbitError::domain(
                "transfer angle",
                short_angle,
                "origin and destination are collinear with the parent body",
            ));
        }
        let transfer_angle = match options.path {
            TransferPath::ShortWay => short_angle,
            TransferPath::LongWay => TAU - short_angle,
        };

        let geometry = Geometry::new(origin, destination, transfer_angle, mu);

        let (p0, p1) = geometry.initial_parameters();
        let mut previous = geometry.trial(p0);
        let mut current = geometry.trial(p1);
        let mut residual = duration - current.time;

        for iteration in 1..=options.max_iterations {
            trace!(
                "lambert iteration {iteration}: p = {}, a = {}, t = {}, residual = {residual}",
                current.parameter,
                current.semi_major_axis,
                current.time,
            );

            if !residual.is_finite() {
                break;
            }
            if residual.abs() < options.time_tolerance {
                debug!(
                    "lambert solver converged after {iteration} iterations: p = {}, a = {}",
                    current.parameter, current.semi_major_axis,
                );
                return Ok(Transfer {
                    origin,
                    destination,
                    parameter: current.parameter,
                    semi_major_axis: current.semi_major_axis,
                    transfer_angle,
                    time: current.time,
                    mu,
                    iterations: iteration,
                });
            }

            let slope = current.time - previous.time;
            if slope == 0.0 {
                break;
            }

            let next = current.parameter
                + residual * (current.parameter - previous.parameter) / slope;
            let next = geometry.constrain(next, current.parameter);

            previous = current;
            current = geometry.trial(next);
            residual = duration - current.time;
        }

        Err(OrbitError::Convergence {
            solver: Solver::Lambert,
            iterations: options.max_iterations,
            residual: residual.abs(),
        })
    }

    /// Gets the starting position, in meters.
    pub fn get_origin(&self) -> DVec3 {
        self.origin
    }

    /// Gets the final position, in meters.
    pub fn get_destination(&self) -> DVec3 {
        self.destination
    }

    /// Gets the semi-latus rectum `p` of the transfer orbit, in meters.
    pub fn get_parameter(&self) -> f64 {
        self.parameter
    }

    /// Gets the semi-major axis of the transfer orbit, in meters.
    ///
    /// Negative for hyperbolic transfers.
    pub fn get_semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// Gets the true anomaly swept by the transfer, in radians.
    pub fn get_transfer_angle(&self) -> f64 {
        self.transfer_angle
    }

    /// Gets the flight time of the solved transfer, in seconds.
    ///
    /// Within the solver's time tolerance of the requested duration.
    pub fn get_time(&self) -> f64 {
        self.time
    }

    /// Gets the gravitational parameter of the parent body, in m^3/s^2.
    pub fn get_gravitational_parameter(&self) -> f64 {
        self.mu
    }

    /// Gets how many secant iterations the solver took.
    pub fn get_iterations(&self) -> u32 {
        self.iterations
    }

    fn geometry(&self) -> Geometry {
        Geometry::new(self.origin, self.destination, self.transfer_angle, self.mu)
    }

    /// Gets the Lagrange coefficient `f = 1 - r2 (1 - cos dv) / p`.
    pub fn get_f(&self) -> f64 {
        self.geometry().f(self.parameter)
    }

    /// Gets the Lagrange coefficient `g = r1 r2 sin dv / sqrt(mu p)`.
    pub fn get_g(&self) -> f64 {
        self.geometry().g(self.parameter)
    }

    /// Gets the Lagrange coefficient
    /// `f' = sqrt(mu / p) tan(dv / 2) ((1 - cos dv) / p - 1 / r1 - 1 / r2)`.
    pub fn get_f_dot(&self) -> f64 {
        self.geometry().f_dot(self.parameter)
    }

    /// Gets the Lagrange coefficient `g' = 1 - r1 (1 - cos dv) / p`.
    pub fn get_g_dot(&self) -> f64 {
        self.geometry().g_dot(self.parameter)
    }

    /// Gets the velocity at the origin, in meters per second.
    ///
    /// `v1 = (r2 - f r1) / g`
    pub fn get_departure_velocity(&self) -> DVec3 {
        (self.destination - self.origin * self.get_f()) / self.get_g()
    }

    /// Gets the velocity at the destination, in meters per second.
    ///
    /// `v2 = f' r1 + g' v1`
    pub fn get_capture_velocity(&self) -> DVec3 {
        self.origin * self.get_f_dot() + self.get_departure_velocity() * self.get_g_dot()
    }

    /// Gets the hyperbolic excess velocity needed at departure, relative to
    /// the velocity of the departure body.
    pub fn get_departure_excess_velocity(&self, body_velocity: DVec3) -> DVec3 {
        self.get_departure_velocity() - body_velocity
    }

    /// Gets the hyperbolic excess velocity on arrival, relative to the
    /// velocity of the arrival body.
    pub fn get_arrival_excess_velocity(&self, body_velocity: DVec3) -> DVec3 {
        self.get_capture_velocity() - body_velocity
    }

    /// Gets the state vectors at departure.
    pub fn get_departure_state_vectors(&self) -> StateVectors {
        StateVectors {
            position: self.origin,
            velocity: self.get_departure_velocity(),
        }
    }

    /// Gets the transfer orbit, positioned at the origin.
    pub fn to_orbit(&self) -> Result<Orbit, OrbitError> {
        self.get_departure_state_vectors().to_orbit(self.mu)
    }
}
