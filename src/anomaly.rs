//! Conversions between the true, eccentric and mean anomalies.
//!
//! Elliptic orbits (`e < 1`) use the eccentric anomaly `E` and Kepler's
//! equation `M = E - e sin E`.
//! Hyperbolic trajectories (`e > 1`) use the hyperbolic eccentric anomaly `F`
//! and the hyperbolic Kepler equation `M = e sinh F - F`.
//! Parabolic trajectories are not supported.
//!
//! All angles are in radians.

use core::f64::consts::{PI, TAU};

use crate::{OrbitError, Solver, HYPERBOLIC_KEPLER_TOLERANCE, KEPLER_TOLERANCE, NUMERIC_MAX_ITERS};

/// Eccentricity above which the elliptic Newton iteration is seeded at
/// pi instead of at the mean anomaly.
///
/// Seeding at the mean anomaly (or at zero) can make Newton's method cycle
/// around `M = pi` for highly eccentric orbits; a seed of pi converges
/// for every mean anomaly.
const HIGH_ECCENTRICITY: f64 = 0.8;

/// Newton converges quadratically once within [`KEPLER_TOLERANCE`], so a
/// few extra steps reach machine precision.
const POLISH_MAX_ITERS: u32 = 8;

/// Wraps an angle into `[0, tau)`.
///
/// # Example
/// ```
/// use keplerian_transfer::anomaly::normalize_angle;
/// use std::f64::consts::{PI, TAU};
///
/// assert_eq!(normalize_angle(-PI), PI);
/// assert_eq!(normalize_angle(TAU), 0.0);
/// ```
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly tau
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Wraps an angle into `(-pi, pi]`.
pub fn signed_angle(angle: f64) -> f64 {
    let wrapped = normalize_angle(angle);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Gets the mean motion of a conic, in radians per second.
///
/// `n = sqrt(mu / |a|^3)`
///
/// For hyperbolic trajectories the semi-major axis is negative, and its
/// magnitude is used; this yields the hyperbolic mean motion.
pub fn mean_motion(semi_major_axis: f64, mu: f64) -> f64 {
    (mu / semi_major_axis.abs().powi(3)).sqrt()
}

#[inline]
pub(crate) fn keplers_equation(mean_anomaly: f64, eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentricity * eccentric_anomaly.sin() - eccentric_anomaly + mean_anomaly
}

#[inline]
pub(crate) fn keplers_equation_derivative(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentricity * eccentric_anomaly.cos() - 1.0
}

#[inline]
fn hyperbolic_keplers_equation(mean_anomaly: f64, eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentricity * eccentric_anomaly.sinh() - eccentric_anomaly - mean_anomaly
}

#[inline]
fn hyperbolic_keplers_equation_derivative(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentricity * eccentric_anomaly.cosh() - 1.0
}

fn check_eccentricity(eccentricity: f64) -> Result<(), OrbitError> {
    if eccentricity < 0.0 || !eccentricity.is_finite() {
        return Err(OrbitError::domain(
            "eccentricity",
            eccentricity,
            "expected a finite, non-negative value",
        ));
    }
    if eccentricity == 1.0 {
        return Err(OrbitError::Parabolic);
    }
    Ok(())
}

/// Solves Kepler's equation `M = E - e sin E` for the eccentric anomaly.
///
/// Uses Newton-Raphson on `f(E) = e sin E - E + M` until a step is no
/// larger than [`KEPLER_TOLERANCE`], then refines the result to machine
/// precision.
/// The mean anomaly is wrapped into `[0, tau)` first.
///
/// # Errors
/// - [`OrbitError::Domain`] if the eccentricity is not in `[0, 1)`.
/// - [`OrbitError::Convergence`] if the iteration limit is reached.
pub fn eccentric_anomaly_at_mean_anomaly(
    mean_anomaly: f64,
    eccentricity: f64,
) -> Result<f64, OrbitError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(OrbitError::domain(
            "eccentricity",
            eccentricity,
            "the elliptic Kepler equation needs 0 <= e < 1",
        ));
    }
    let mean_anomaly = normalize_angle(mean_anomaly);

    let mut eccentric_anomaly = if eccentricity < HIGH_ECCENTRICITY {
        mean_anomaly
    } else {
        PI
    };

    for _ in 0..NUMERIC_MAX_ITERS {
        let f = keplers_equation(mean_anomaly, eccentric_anomaly, eccentricity);
        let fp = keplers_equation_derivative(eccentric_anomaly, eccentricity);
        let step = f / fp;
        eccentric_anomaly -= step;

        if step.abs() <= KEPLER_TOLERANCE {
            return Ok(polish_eccentric_anomaly(
                mean_anomaly,
                eccentric_anomaly,
                eccentricity,
                step.abs(),
            ));
        }
    }

    Err(OrbitError::Convergence {
        solver: Solver::Kepler,
        iterations: NUMERIC_MAX_ITERS,
        residual: keplers_equation(mean_anomaly, eccentric_anomaly, eccentricity).abs(),
    })
}

/// Newton steps past the step tolerance, until the steps stop shrinking or
/// reach machine precision.
///
/// Near `e = 1` converting `E` to `v` magnifies any leftover error in `E`
/// by up to `sqrt((1 + e) / (1 - e))`.
fn polish_eccentric_anomaly(
    mean_anomaly: f64,
    mut eccentric_anomaly: f64,
    eccentricity: f64,
    mut last_step: f64,
) -> f64 {
    for _ in 0..POLISH_MAX_ITERS {
        let f = keplers_equation(mean_anomaly, eccentric_anomaly, eccentricity);
        let fp = keplers_equation_derivative(eccentric_anomaly, eccentricity);
        let step = f / fp;

        // Rounding noise, not convergence
        if step.abs() >= last_step || !step.is_finite() {
            break;
        }
        eccentric_anomaly -= step;
        last_step = step.abs();

        if last_step <= f64::EPSILON * eccentric_anomaly.abs().max(1.0) {
            break;
        }
    }

    eccentric_anomaly
}

/// Solves the hyperbolic Kepler equation `M = e sinh F - F` for the
/// hyperbolic eccentric anomaly.
///
/// The mean anomaly of a hyperbola is unbounded and signed; it is not wrapped.
///
/// # Errors
/// - [`OrbitError::Domain`] if the eccentricity is not above 1.
/// - [`OrbitError::Convergence`] if the iteration limit is reached.
pub fn hyperbolic_eccentric_anomaly_at_mean_anomaly(
    mean_anomaly: f64,
    eccentricity: f64,
) -> Result<f64, OrbitError> {
    if eccentricity <= 1.0 || !eccentricity.is_finite() {
        return Err(OrbitError::domain(
            "eccentricity",
            eccentricity,
            "the hyperbolic Kepler equation needs e > 1",
        ));
    }

    // ln(2|M|/e + 1.8), signed like M
    let mut eccentric_anomaly =
        (2.0 * mean_anomaly.abs() / eccentricity + 1.8).ln().copysign(mean_anomaly);

    for _ in 0..NUMERIC_MAX_ITERS {
        let f = hyperbolic_keplers_equation(mean_anomaly, eccentric_anomaly, eccentricity);
        let fp = hyperbolic_keplers_equation_derivative(eccentric_anomaly, eccentricity);
        let step = f / fp;
        eccentric_anomaly -= step;

        if step.abs() <= HYPERBOLIC_KEPLER_TOLERANCE * eccentric_anomaly.abs().max(1.0) {
            return Ok(eccentric_anomaly);
        }
        if !step.is_finite() {
            break;
        }
    }

    Err(OrbitError::Convergence {
        solver: Solver::HyperbolicKepler,
        iterations: NUMERIC_MAX_ITERS,
        residual: hyperbolic_keplers_equation(mean_anomaly, eccentric_anomaly, eccentricity)
            .abs(),
    })
}

/// Gets the true anomaly at a given eccentric anomaly of an elliptic orbit.
///
/// `tan(v / 2) = sqrt((1 + e) / (1 - e)) tan(E / 2)`
///
/// The result is wrapped into `[0, tau)`.
pub fn true_anomaly_at_eccentric_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let ratio = ((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt();
    normalize_angle(2.0 * (ratio * (eccentric_anomaly * 0.5).tan()).atan())
}

/// Gets the true anomaly at a given hyperbolic eccentric anomaly.
///
/// `tan(v / 2) = sqrt((e + 1) / (e - 1)) tanh(F / 2)`
///
/// The result is wrapped into `[0, tau)`; negative anomalies (before
/// periapsis) therefore come out just below tau.
pub fn true_anomaly_at_hyperbolic_eccentric_anomaly(
    eccentric_anomaly: f64,
    eccentricity: f64,
) -> f64 {
    let ratio = ((eccentricity + 1.0) / (eccentricity - 1.0)).sqrt();
    normalize_angle(2.0 * (ratio * (eccentric_anomaly * 0.5).tanh()).atan())
}

/// Gets the eccentric anomaly of an elliptic orbit at a given true anomaly.
///
/// `tan(E / 2) = sqrt((1 - e) / (1 + e)) tan(v / 2)`, the inverse of
/// [`true_anomaly_at_eccentric_anomaly`]. Past apoapsis `E` follows `v`
/// into the lower half, so the result lies in `[0, tau)`.
///
/// This equals `acos((e + cos v) / (1 + e cos v))` on the upper half, but
/// keeps full precision near periapsis where the cosine is close to 1.
///
/// # Errors
/// [`OrbitError::Domain`] if the eccentricity is not in `[0, 1)`.
pub fn eccentric_anomaly_at_true_anomaly(
    true_anomaly: f64,
    eccentricity: f64,
) -> Result<f64, OrbitError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(OrbitError::domain(
            "eccentricity",
            eccentricity,
            "an elliptic eccentric anomaly needs 0 <= e < 1",
        ));
    }
    let (sin_half, cos_half) = (normalize_angle(true_anomaly) * 0.5).sin_cos();

    Ok(normalize_angle(
        2.0 * ((1.0 - eccentricity).sqrt() * sin_half)
            .atan2((1.0 + eccentricity).sqrt() * cos_half),
    ))
}

/// Gets the hyperbolic eccentric anomaly at a given true anomaly.
///
/// `F = acosh((e + cos v) / (1 + e cos v))`, with the sign of the true
/// anomaly taken in `(-pi, pi]`.
///
/// # Errors
/// [`OrbitError::Domain`] if the true anomaly lies at or beyond the
/// asymptotes of the hyperbola, where `1 + e cos v <= 0`.
pub fn hyperbolic_eccentric_anomaly_at_true_anomaly(
    true_anomaly: f64,
    eccentricity: f64,
) -> Result<f64, OrbitError> {
    let true_anomaly = signed_angle(true_anomaly);
    let cos_v = true_anomaly.cos();
    let denominator = 1.0 + eccentricity * cos_v;

    if denominator <= 0.0 {
        return Err(OrbitError::domain(
            "true anomaly",
            true_anomaly,
            "the hyperbola never reaches this true anomaly",
        ));
    }

    let cosh_f = ((eccentricity + cos_v) / denominator).max(1.0);
    Ok(cosh_f.acosh().copysign(true_anomaly))
}

/// Gets the true anomaly at a given mean anomaly.
///
/// Elliptic orbits solve Kepler's equation and wrap `M` into `[0, tau)`;
/// hyperbolic trajectories solve the hyperbolic Kepler equation with an
/// unbounded, signed `M`. The result is wrapped into `[0, tau)`.
///
/// # Errors
/// - [`OrbitError::Parabolic`] for `e == 1`.
/// - [`OrbitError::Domain`] for a negative or non-finite eccentricity.
/// - [`OrbitError::Convergence`] if the solver gives up.
///
/// # Example
/// ```
/// use keplerian_transfer::anomaly::{mean_anomaly_at_true_anomaly, true_anomaly_at_mean_anomaly};
///
/// let e = 0.3;
/// let v = 2.0;
/// let m = mean_anomaly_at_true_anomaly(v, e).unwrap();
///
/// assert!((true_anomaly_at_mean_anomaly(m, e).unwrap() - v).abs() < 1e-6);
/// ```
pub fn true_anomaly_at_mean_anomaly(mean_anomaly: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    check_eccentricity(eccentricity)?;

    if eccentricity < 1.0 {
        let eccentric_anomaly = eccentric_anomaly_at_mean_anomaly(mean_anomaly, eccentricity)?;
        Ok(true_anomaly_at_eccentric_anomaly(eccentric_anomaly, eccentricity))
    } else {
        let eccentric_anomaly =
            hyperbolic_eccentric_anomaly_at_mean_anomaly(mean_anomaly, eccentricity)?;
        Ok(true_anomaly_at_hyperbolic_eccentric_anomaly(
            eccentric_anomaly,
            eccentricity,
        ))
    }
}

/// Gets the mean anomaly at a given true anomaly.
///
/// Elliptic orbits return `M = E - e sin E` in `[0, tau)`; hyperbolic
/// trajectories return the signed `M = e sinh F - F`.
///
/// # Errors
/// - [`OrbitError::Parabolic`] for `e == 1`.
/// - [`OrbitError::Domain`] for a negative eccentricity, or for a true
///   anomaly beyond the asymptotes of a hyperbola.
pub fn mean_anomaly_at_true_anomaly(true_anomaly: f64, eccentricity: f64) -> Result<f64, OrbitError> {
    check_eccentricity(eccentricity)?;

    if eccentricity < 1.0 {
        let eccentric_anomaly = eccentric_anomaly_at_true_anomaly(true_anomaly, eccentricity)?;
        Ok(normalize_angle(
            eccentric_anomaly - eccentricity * eccentric_anomaly.sin(),
        ))
    } else {
        let eccentric_anomaly =
            hyperbolic_eccentric_anomaly_at_true_anomaly(true_anomaly, eccentricity)?;
        Ok(eccentricity * eccentric_anomaly.sinh() - eccentric_anomaly)
    }
}
