//! Orbital element sets that produce an [`Orbit`] at any time.
//!
//! Planetary ephemeris tables give each element as a polynomial in Julian
//! centuries; two-body problems (moons, the Kerbol system) give fixed
//! elements and a mean anomaly that advances linearly with time.
//!
//! Which time law applies is decided by the shape of the mean anomaly data:
//!
//! | Mean anomaly coefficients | Mean anomaly at time `t`                         |
//! |---------------------------|--------------------------------------------------|
//! | none                      | `L(T) - w(T) - W(T)`, `T` in Julian centuries     |
//! | one (`M0`)                | `M0 + n (t - epoch)`, `t` in seconds               |
//! | two or more               | `M(T)`, `T` in Julian centuries                    |
//!
//! Source: <http://www.braeunig.us/space/plntpos.htm>

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    anomaly::{mean_motion, normalize_angle, true_anomaly_at_mean_anomaly},
    units::julian_centuries,
    CelestialBody, Orbit, OrbitError,
};

/// Horner's method, lowest order coefficient first.
fn horner(coefficients: &[f64], t: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, coefficient| acc * t + coefficient)
}

/// A set of six classical orbital elements, possibly varying with time.
///
/// Every element except the semi-major axis is a list of polynomial
/// coefficients, lowest order first. Angles are in radians; the semi-major
/// axis is in meters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitalElements {
    semi_major_axis: f64,
    eccentricity: Vec<f64>,
    inclination: Vec<f64>,
    arg_pe: Vec<f64>,
    long_asc_node: Vec<f64>,
    mean_longitude: Vec<f64>,
    mean_anomaly: Vec<f64>,
    epoch: f64,
}

/// Which angle places the body on its orbit at the epoch of a fixed
/// element set.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EpochAnomaly {
    /// The mean anomaly `M0`, in radians.
    MeanAnomaly(f64),
    /// The mean longitude `L = M0 + w + W`, in radians.
    MeanLongitude(f64),
}

impl Default for EpochAnomaly {
    fn default() -> Self {
        EpochAnomaly::MeanAnomaly(0.0)
    }
}

/// The scalar elements of a fixed two-body orbit.
///
/// The defaults are zero for every angle and an eccentricity of 1, which is
/// not a valid orbit; always set the eccentricity of a bound orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FixedElements {
    /// The eccentricity.
    pub eccentricity: f64,
    /// The inclination, in radians.
    pub inclination: f64,
    /// The argument of periapsis, in radians.
    pub arg_pe: f64,
    /// The longitude of the ascending node, in radians.
    pub long_asc_node: f64,
    /// Where the body is at the epoch.
    pub epoch_anomaly: EpochAnomaly,
    /// The epoch, in seconds since Julian date 0.
    pub epoch: f64,
}

impl Default for FixedElements {
    fn default() -> Self {
        Self {
            eccentricity: 1.0,
            inclination: 0.0,
            arg_pe: 0.0,
            long_asc_node: 0.0,
            epoch_anomaly: EpochAnomaly::default(),
            epoch: 0.0,
        }
    }
}

impl OrbitalElements {
    /// Creates a planetary element set from polynomial coefficients in
    /// Julian centuries since 1900 January 0.5.
    ///
    /// The position on the orbit comes from the mean longitude `L`.
    ///
    /// # Arguments
    /// * `semi_major_axis` - `a`, in meters
    /// * `mean_longitude` - `L`, in radians
    /// * `eccentricity` - `e`
    /// * `inclination` - `i`, in radians
    /// * `arg_pe` - `w`, in radians
    /// * `long_asc_node` - `W`, in radians
    pub fn with_mean_longitude(
        semi_major_axis: f64,
        mean_longitude: Vec<f64>,
        eccentricity: Vec<f64>,
        inclination: Vec<f64>,
        arg_pe: Vec<f64>,
        long_asc_node: Vec<f64>,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination,
            arg_pe,
            long_asc_node,
            mean_longitude,
            mean_anomaly: Vec::new(),
            epoch: 0.0,
        }
    }

    /// Creates an element set in the ecliptic plane whose position comes
    /// from a mean anomaly polynomial in Julian centuries since
    /// 1900 January 0.5.
    ///
    /// Inclination, argument of periapsis and longitude of the ascending
    /// node are all zero. A single-coefficient mean anomaly is treated as a
    /// rate law instead, see the [module docs][self].
    pub fn with_mean_anomaly(
        semi_major_axis: f64,
        eccentricity: Vec<f64>,
        mean_anomaly: Vec<f64>,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination: Vec::new(),
            arg_pe: Vec::new(),
            long_asc_node: Vec::new(),
            mean_longitude: Vec::new(),
            mean_anomaly,
            epoch: 0.0,
        }
    }

    /// Creates a fixed two-body element set.
    ///
    /// The mean anomaly advances at the mean motion from the epoch
    /// onwards. A mean longitude at the epoch is converted into the
    /// equivalent mean anomaly `L - w - W`.
    ///
    /// # Example
    /// ```
    /// use keplerian_transfer::{EpochAnomaly, FixedElements, OrbitalElements};
    ///
    /// let elements = OrbitalElements::fixed(
    ///     47_000_000.0,
    ///     FixedElements {
    ///         eccentricity: 0.0,
    ///         epoch_anomaly: EpochAnomaly::MeanAnomaly(0.9),
    ///         ..Default::default()
    ///     },
    /// );
    ///
    /// assert_eq!(elements.get_mean_anomaly(), &[0.9]);
    /// ```
    pub fn fixed(semi_major_axis: f64, elements: FixedElements) -> Self {
        let mean_anomaly = match elements.epoch_anomaly {
            EpochAnomaly::MeanAnomaly(mean_anomaly) => mean_anomaly,
            EpochAnomaly::MeanLongitude(mean_longitude) => normalize_angle(
                mean_longitude - elements.arg_pe - elements.long_asc_node,
            ),
        };

        Self {
            semi_major_axis,
            eccentricity: vec![elements.eccentricity],
            inclination: vec![elements.inclination],
            arg_pe: vec![elements.arg_pe],
            long_asc_node: vec![elements.long_asc_node],
            mean_longitude: Vec::new(),
            mean_anomaly: vec![mean_anomaly],
            epoch: elements.epoch,
        }
    }

    /// Evaluates a polynomial `c0 + c1 t + c2 t^2 + ...`.
    ///
    /// An empty coefficient list evaluates to 0.
    ///
    /// # Example
    /// ```
    /// use keplerian_transfer::OrbitalElements;
    ///
    /// assert_eq!(OrbitalElements::evaluate_polynomial(&[1.0, 2.0, 3.0], 2.0), 17.0);
    /// assert_eq!(OrbitalElements::evaluate_polynomial(&[], 2.0), 0.0);
    /// ```
    pub fn evaluate_polynomial(coefficients: &[f64], t: f64) -> f64 {
        horner(coefficients, t)
    }

    /// Returns a copy of these elements with a different eccentricity.
    pub fn with_eccentricity(mut self, eccentricity: f64) -> Self {
        self.eccentricity = vec![eccentricity];
        self
    }

    /// Returns a copy of these elements with a different inclination.
    pub fn with_inclination(mut self, inclination: f64) -> Self {
        self.inclination = vec![inclination];
        self
    }

    /// Returns a copy of these elements with a different argument of
    /// periapsis.
    pub fn with_arg_pe(mut self, arg_pe: f64) -> Self {
        self.arg_pe = vec![arg_pe];
        self
    }

    /// Returns a copy of these elements with a different longitude of the
    /// ascending node.
    pub fn with_long_asc_node(mut self, long_asc_node: f64) -> Self {
        self.long_asc_node = vec![long_asc_node];
        self
    }

    /// Returns a copy of these elements that follows the rate law from a
    /// mean anomaly `M0` at the given epoch (seconds since Julian date 0).
    pub fn with_mean_anomaly_at_epoch(mut self, mean_anomaly: f64, epoch: f64) -> Self {
        self.mean_anomaly = vec![mean_anomaly];
        self.mean_longitude.clear();
        self.epoch = epoch;
        self
    }

    /// Gets the semi-major axis, in meters.
    pub fn get_semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// Gets the eccentricity coefficients.
    pub fn get_eccentricity(&self) -> &[f64] {
        &self.eccentricity
    }

    /// Gets the inclination coefficients.
    pub fn get_inclination(&self) -> &[f64] {
        &self.inclination
    }

    /// Gets the argument of periapsis coefficients.
    pub fn get_arg_pe(&self) -> &[f64] {
        &self.arg_pe
    }

    /// Gets the longitude of ascending node coefficients.
    pub fn get_long_asc_node(&self) -> &[f64] {
        &self.long_asc_node
    }

    /// Gets the mean longitude coefficients.
    pub fn get_mean_longitude(&self) -> &[f64] {
        &self.mean_longitude
    }

    /// Gets the mean anomaly coefficients.
    pub fn get_mean_anomaly(&self) -> &[f64] {
        &self.mean_anomaly
    }

    /// Gets the epoch of the rate law, in seconds since Julian date 0.
    ///
    /// Only meaningful for element sets with a single mean anomaly
    /// coefficient.
    pub fn get_epoch(&self) -> f64 {
        self.epoch
    }

    /// Gets the mean anomaly at a given time.
    ///
    /// `time` is in seconds since Julian date 0.
    pub fn get_mean_anomaly_at_time(&self, parent: &impl CelestialBody, time: f64) -> f64 {
        let centuries = julian_centuries(time);

        match self.mean_anomaly.as_slice() {
            [] => {
                let mean_longitude = horner(&self.mean_longitude, centuries);
                let arg_pe = horner(&self.arg_pe, centuries);
                let long_asc_node = horner(&self.long_asc_node, centuries);
                normalize_angle(mean_longitude - arg_pe - long_asc_node)
            }
            [mean_anomaly_at_epoch] => {
                let mean_motion =
                    mean_motion(self.semi_major_axis, parent.get_gravitational_parameter());
                let mean_anomaly = mean_anomaly_at_epoch + mean_motion * (time - self.epoch);

                if horner(&self.eccentricity, centuries) < 1.0 {
                    normalize_angle(mean_anomaly)
                } else {
                    mean_anomaly
                }
            }
            coefficients => normalize_angle(horner(coefficients, centuries)),
        }
    }

    /// Gets the orbit around `parent` at a given time.
    ///
    /// `time` is in seconds since Julian date 0. Polynomial elements are
    /// evaluated in Julian centuries since 1900 January 0.5.
    ///
    /// # Errors
    /// Fails if the evaluated elements don't form a valid orbit, see
    /// [`Orbit::new`], or if Kepler's equation can't be solved.
    pub fn orbit_at(&self, parent: &impl CelestialBody, time: f64) -> Result<Orbit, OrbitError> {
        let centuries = julian_centuries(time);
        let eccentricity = horner(&self.eccentricity, centuries);
        let mean_anomaly = self.get_mean_anomaly_at_time(parent, time);
        let true_anomaly = true_anomaly_at_mean_anomaly(mean_anomaly, eccentricity)?;

        Orbit::new(
            eccentricity,
            self.semi_major_axis,
            horner(&self.inclination, centuries),
            normalize_angle(horner(&self.arg_pe, centuries)),
            normalize_angle(horner(&self.long_asc_node, centuries)),
            true_anomaly,
            parent.get_gravitational_parameter(),
        )
    }

    /// Gets the orbit around `parent` when the body is at a given true
    /// anomaly.
    ///
    /// The shape and orientation come from the constant terms of each
    /// element, i.e. their values at the epoch of the table.
    pub fn orbit_at_true_anomaly(
        &self,
        parent: &impl CelestialBody,
        true_anomaly: f64,
    ) -> Result<Orbit, OrbitError> {
        let constant = |coefficients: &[f64]| coefficients.first().copied().unwrap_or(0.0);

        Orbit::new(
            constant(&self.eccentricity),
            self.semi_major_axis,
            constant(&self.inclination),
            normalize_angle(constant(&self.arg_pe)),
            normalize_angle(constant(&self.long_asc_node)),
            true_anomaly,
            parent.get_gravitational_parameter(),
        )
    }
}
