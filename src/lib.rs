//! # Keplerian Transfers
//! This library crate contains logic for two-body Keplerian orbits and
//! Lambert transfers between them, the kind of math you'd use to plan a
//! launch window or an interplanetary transfer.
//!
//! Keplerian orbits don't use time steps: an orbit is a conic section, and
//! the position of the orbiting body at any time follows from Kepler's
//! equation. It's a two-body model, so it doesn't account for external forces
//! like gravity from other bodies or the engines of a spacecraft.
//!
//! ## Getting started
//! This crate provides these main types:
//! - [`Orbit`]: A conic (ellipse or hyperbola) around a parent body, frozen at
//!   one true anomaly. Every "mutation" gives you a new `Orbit`.
//! - [`OrbitalElements`]: Time-varying element sets, either polynomial
//!   tables for planets or fixed two-body elements, that produce an `Orbit`
//!   at any time.
//! - [`Transfer`]: The solution of a Lambert problem, the conic connecting two
//!   positions in a given flight time.
//! - [`Body`] and [`Universe`]: Celestial bodies and the parent-satellite
//!   registry that ties them together.
//!
//! We also provide a [`body_presets`] module with the Sun, the planets and
//! the Moon, as well as the Kerbol system.
//!
//! ## Units
//! Lengths are in meters, times in seconds and angles in radians.
//! Absolute times are seconds since Julian date 0; see [`units`] for
//! conversions.
//!
//! ## Example
//!
//! ```rust
//! use keplerian_transfer::Orbit;
//!
//! # fn main() -> Result<(), keplerian_transfer::OrbitError> {
//! // A low Earth orbit with an eccentricity of 0.1
//! let orbit = Orbit::new(0.1, 7_500_000.0, 0.0, 0.0, 0.0, 0.0, 3.986005e14)?;
//!
//! let later = orbit.after(600.0)?;
//! assert!(later.get_true_anomaly() > orbit.get_true_anomaly());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod anomaly;
mod body;
pub mod body_presets;
mod elements;
mod error;
mod orbit;
mod spherical;
mod transfer;
pub mod units;
mod universe;

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use body::{Body, CelestialBody};
pub use elements::{EpochAnomaly, FixedElements, OrbitalElements};
pub use error::{OrbitError, Solver};
pub use orbit::{Degeneracy, Orbit};
pub use spherical::{angle_between, Spherical};
pub use transfer::{Transfer, TransferOptions, TransferPath};
pub use universe::{BodyRelation, Id, Universe, UniverseError};

/// The step size below which the elliptic Kepler solver stops iterating,
/// in radians.
pub const KEPLER_TOLERANCE: f64 = 1e-4;

/// The relative step size below which the hyperbolic Kepler solver stops
/// iterating.
pub const HYPERBOLIC_KEPLER_TOLERANCE: f64 = 1e-12;

/// The maximum number of iterations for the Newton-Raphson solvers.
pub const NUMERIC_MAX_ITERS: u32 = 1000;

/// A struct representing a 3x2 matrix.
///
/// This struct is used to store the transformation matrix
/// for transforming a 2D vector in the orbital plane into a 3D vector.
///
/// Matrix e11 is at row 1, column 1.
///
/// # Example
/// ```
/// use glam::{DVec2, DVec3};
///
/// use keplerian_transfer::Matrix3x2;
///
/// let matrix = Matrix3x2 {
///     e11: 1.0, e12: 0.0,
///     e21: 0.0, e22: 1.0,
///     e31: 1.0, e32: 1.0,
/// };
///
/// let result = matrix.dot_vec(DVec2::new(1.0, 2.0));
///
/// assert_eq!(result, DVec3::new(1.0, 2.0, 3.0));
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix3x2 {
    // Element XY
    pub e11: f64,
    pub e12: f64,
    pub e21: f64,
    pub e22: f64,
    pub e31: f64,
    pub e32: f64,
}

impl Matrix3x2 {
    /// Computes a dot product between this matrix and a 2D vector.
    pub fn dot_vec(&self, vec: DVec2) -> DVec3 {
        DVec3::new(
            vec.x * self.e11 + vec.y * self.e12,
            vec.x * self.e21 + vec.y * self.e22,
            vec.x * self.e31 + vec.y * self.e32,
        )
    }
}

/// A position and velocity at a point in an orbit.
///
/// The position vector is in meters, while the velocity vector is in
/// meters per second. Both are relative to the parent body.
///
/// State vectors can be used to form an orbit, see
/// [`to_orbit`][Self::to_orbit] for more information.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateVectors {
    /// The 3D position at a point in the orbit, in meters.
    pub position: DVec3,
    /// The 3D velocity at a point in the orbit, in meters per second.
    pub velocity: DVec3,
}

#[cfg(test)]
mod tests;
