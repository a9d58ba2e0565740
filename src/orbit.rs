use core::f64::consts::TAU;

use glam::{DVec2, DVec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    anomaly::{
        eccentric_anomaly_at_true_anomaly, hyperbolic_eccentric_anomaly_at_true_anomaly,
        mean_anomaly_at_true_anomaly, mean_motion, normalize_angle, signed_angle,
        true_anomaly_at_mean_anomaly,
    },
    error::clamp_unit,
    Matrix3x2, OrbitError, Spherical, StateVectors,
};

/// Relative size below which the node or eccentricity vector of a state
/// vector pair counts as zero.
const DEGENERACY_THRESHOLD: f64 = 1e-11;

/// A Keplerian orbit frozen at one point along it.
///
/// An orbit is a conic section around a parent body, described by the six
/// classical elements plus the parent's gravitational parameter.
/// The position along the conic is stored as a true anomaly.
///
/// Orbits are immutable: [`after`][Self::after] and
/// [`at_true_anomaly`][Self::at_true_anomaly] return new orbits.
///
/// Elliptic orbits have `0 <= e < 1` and a positive semi-major axis;
/// hyperbolic trajectories have `e > 1` and a negative semi-major axis.
/// Parabolic trajectories are not supported.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Orbit {
    eccentricity: f64,
    semi_major_axis: f64,
    inclination: f64,
    arg_pe: f64,
    long_asc_node: f64,
    true_anomaly: f64,
    mu: f64,
}

/// Which angles of an orbit built from state vectors were undefined and
/// set to zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Degeneracy {
    /// The orbit lies in the reference plane, so it has no ascending node.
    /// The longitude of the ascending node is 0 and the argument of
    /// periapsis is measured from the +X axis.
    pub equatorial: bool,
    /// The orbit is circular, so it has no periapsis.
    /// The argument of periapsis is 0 and the true anomaly is measured from
    /// the ascending node (or the +X axis, if also equatorial).
    pub circular: bool,
}

impl Degeneracy {
    /// Whether any angle was undefined.
    pub fn is_degenerate(&self) -> bool {
        self.equatorial || self.circular
    }
}

fn check_finite(quantity: &'static str, value: f64) -> Result<f64, OrbitError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OrbitError::domain(quantity, value, "expected a finite value"))
    }
}

impl Orbit {
    /// Creates a new orbit from its elements.
    ///
    /// # Arguments
    /// * `eccentricity` - `e`, the shape of the conic
    /// * `semi_major_axis` - `a`, in meters; negative for hyperbolas
    /// * `inclination` - `i`, in radians, within `[0, pi]`
    /// * `arg_pe` - `w`, the argument of periapsis, in radians
    /// * `long_asc_node` - `W`, the longitude of the ascending node, in radians
    /// * `true_anomaly` - `v`, in radians
    /// * `mu` - the gravitational parameter of the parent body, in m^3/s^2
    ///
    /// Angles other than the inclination are wrapped into `[0, tau)`.
    ///
    /// # Errors
    /// - [`OrbitError::Parabolic`] if `e == 1`.
    /// - [`OrbitError::Domain`] if any element is out of range, if the sign
    ///   of `a` doesn't match `e`, or if a hyperbola never reaches the
    ///   given true anomaly.
    pub fn new(
        eccentricity: f64,
        semi_major_axis: f64,
        inclination: f64,
        arg_pe: f64,
        long_asc_node: f64,
        true_anomaly: f64,
        mu: f64,
    ) -> Result<Orbit, OrbitError> {
        if mu <= 0.0 || !mu.is_finite() {
            return Err(OrbitError::domain(
                "gravitational parameter",
                mu,
                "expected a finite, positive value",
            ));
        }
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

        let semi_major_axis = check_finite("semi-major axis", semi_major_axis)?;
        if eccentricity < 1.0 && semi_major_axis <= 0.0 {
            return Err(OrbitError::domain(
                "semi-major axis",
                semi_major_axis,
                "an ellipse needs a positive semi-major axis",
            ));
        }
        if eccentricity > 1.0 && semi_major_axis >= 0.0 {
            return Err(OrbitError::domain(
                "semi-major axis",
                semi_major_axis,
                "a hyperbola needs a negative semi-major axis",
            ));
        }

        if !(0.0..=core::f64::consts::PI).contains(&inclination) {
            return Err(OrbitError::domain(
                "inclination",
                inclination,
                "expected a value within [0, pi]",
            ));
        }

        let arg_pe = normalize_angle(check_finite("argument of periapsis", arg_pe)?);
        let long_asc_node =
            normalize_angle(check_finite("longitude of ascending node", long_asc_node)?);
        let true_anomaly = normalize_angle(check_finite("true anomaly", true_anomaly)?);

        if eccentricity > 1.0 && 1.0 + eccentricity * true_anomaly.cos() <= 0.0 {
            return Err(OrbitError::domain(
                "true anomaly",
                true_anomaly,
                "the hyperbola never reaches this true anomaly",
            ));
        }

        Ok(Orbit {
            eccentricity,
            semi_major_axis,
            inclination,
            arg_pe,
            long_asc_node,
            true_anomaly,
            mu,
        })
    }

    /// Gets the eccentricity of the orbit.
    pub fn get_eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Gets the semi-major axis of the orbit, in meters.
    ///
    /// Negative for hyperbolic trajectories.
    pub fn get_semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// Gets the inclination of the orbit, in radians.
    pub fn get_inclination(&self) -> f64 {
        self.inclination
    }

    /// Gets the argument of periapsis of the orbit, in radians.
    pub fn get_arg_pe(&self) -> f64 {
        self.arg_pe
    }

    /// Gets the longitude of the ascending node of the orbit, in radians.
    pub fn get_long_asc_node(&self) -> f64 {
        self.long_asc_node
    }

    /// Gets the current true anomaly, in radians.
    pub fn get_true_anomaly(&self) -> f64 {
        self.true_anomaly
    }

    /// Gets the gravitational parameter of the parent body, in m^3/s^2.
    pub fn get_gravitational_parameter(&self) -> f64 {
        self.mu
    }

    /// Whether this orbit is a hyperbolic trajectory.
    pub fn is_hyperbolic(&self) -> bool {
        self.eccentricity > 1.0
    }

    /// Gets the periapsis distance `a (1 - e)`, in meters.
    pub fn get_periapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Gets the apoapsis distance `a (1 + e)`, in meters.
    ///
    /// Hyperbolic trajectories have no apoapsis; this returns a negative
    /// number for them.
    pub fn get_apoapsis(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Gets the semi-latus rectum `a (1 - e^2)`, in meters.
    pub fn get_semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    /// Gets the mean motion `sqrt(mu / |a|^3)`, in radians per second.
    pub fn get_mean_motion(&self) -> f64 {
        mean_motion(self.semi_major_axis, self.mu)
    }

    /// Gets the orbital period, in seconds.
    ///
    /// Infinite for hyperbolic trajectories.
    pub fn get_orbital_period(&self) -> f64 {
        if self.is_hyperbolic() {
            f64::INFINITY
        } else {
            TAU / self.get_mean_motion()
        }
    }

    /// Gets the current eccentric anomaly, in radians.
    ///
    /// For hyperbolic trajectories this is the hyperbolic eccentric anomaly
    /// `F`, which is signed.
    pub fn get_eccentric_anomaly(&self) -> Result<f64, OrbitError> {
        if self.is_hyperbolic() {
            hyperbolic_eccentric_anomaly_at_true_anomaly(self.true_anomaly, self.eccentricity)
        } else {
            eccentric_anomaly_at_true_anomaly(self.true_anomaly, self.eccentricity)
        }
    }

    /// Gets the current mean anomaly, in radians.
    ///
    /// Within `[0, tau)` for elliptic orbits; signed and unbounded for
    /// hyperbolic trajectories.
    pub fn get_mean_anomaly(&self) -> Result<f64, OrbitError> {
        mean_anomaly_at_true_anomaly(self.true_anomaly, self.eccentricity)
    }

    /// Gets the distance from the parent body at a given true anomaly,
    /// in meters.
    ///
    /// `r = a (1 - e^2) / (1 + e cos v)`
    pub fn get_altitude_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        self.get_semi_latus_rectum() / (1.0 + self.eccentricity * true_anomaly.cos())
    }

    /// Gets the current distance from the parent body, in meters.
    pub fn get_altitude(&self) -> f64 {
        self.get_altitude_at_true_anomaly(self.true_anomaly)
    }

    /// Gets the flight-path angle at a given true anomaly, in radians.
    ///
    /// This is the angle of the velocity above the local horizontal:
    /// `atan(e sin v / (1 + e cos v))`.
    /// It's positive while moving away from periapsis.
    pub fn get_azimuth_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        let (sin_v, cos_v) = true_anomaly.sin_cos();
        (self.eccentricity * sin_v / (1.0 + self.eccentricity * cos_v)).atan()
    }

    /// Gets the current flight-path angle, in radians.
    pub fn get_azimuth(&self) -> f64 {
        self.get_azimuth_at_true_anomaly(self.true_anomaly)
    }

    /// Gets the speed at a given distance from the parent body, using the
    /// vis-viva equation `v^2 = mu (2 / r - 1 / a)`.
    ///
    /// # Speed vs. Velocity
    /// Speed is not to be confused with velocity.
    /// Speed tells you how fast something is moving,
    /// while velocity tells you how fast *and in what direction* it's moving in.
    pub fn get_speed_at_altitude(&self, altitude: f64) -> f64 {
        (self.mu * (2.0 / altitude - 1.0 / self.semi_major_axis)).sqrt()
    }

    /// Gets the speed at a given true anomaly, in meters per second.
    pub fn get_speed_at_true_anomaly(&self, true_anomaly: f64) -> f64 {
        self.get_speed_at_altitude(self.get_altitude_at_true_anomaly(true_anomaly))
    }

    /// Gets the current speed, in meters per second.
    pub fn get_speed(&self) -> f64 {
        self.get_speed_at_true_anomaly(self.true_anomaly)
    }

    /// Gets the position at a given true anomaly as longitude, latitude and
    /// distance from the parent body.
    ///
    /// With the argument of latitude `u = v + w`, the longitude is
    /// `l' + W` where `tan l' = cos i tan u` and `l'` lies in the same
    /// quadrant as `u`; the latitude is `asin(sin u sin i)`.
    ///
    /// Source: <http://www.braeunig.us/space/plntpos.htm>
    pub fn get_position_at_true_anomaly(&self, true_anomaly: f64) -> Spherical {
        let radius = self.get_altitude_at_true_anomaly(true_anomaly);
        let (sin_u, cos_u) = (true_anomaly + self.arg_pe).sin_cos();
        let (sin_inc, cos_inc) = self.inclination.sin_cos();

        // atan2 keeps l' in the quadrant of u, where a bare atan would be
        // half a turn off whenever cos u < 0
        let longitude = (cos_inc * sin_u).atan2(cos_u) + self.long_asc_node;
        let latitude = (sin_u * sin_inc).clamp(-1.0, 1.0).asin();

        Spherical::new(normalize_angle(longitude), latitude, radius)
    }

    /// Gets the current position as longitude, latitude and distance.
    pub fn get_position(&self) -> Spherical {
        self.get_position_at_true_anomaly(self.true_anomaly)
    }

    /// Gets the Cartesian position at a given true anomaly, in meters,
    /// relative to the parent body.
    pub fn get_cartesian_position_at_true_anomaly(&self, true_anomaly: f64) -> DVec3 {
        self.get_position_at_true_anomaly(true_anomaly).to_cartesian()
    }

    /// Gets the current Cartesian position, in meters.
    pub fn get_cartesian_position(&self) -> DVec3 {
        self.get_cartesian_position_at_true_anomaly(self.true_anomaly)
    }

    /// Get an initial two-vector basis that rotates vectors in the
    /// [perifocal coordinate system](https://en.wikipedia.org/wiki/Perifocal_coordinate_system)
    /// into the reference frame.
    ///
    /// The first column is the direction of periapsis, the second the
    /// direction of the body at a true anomaly of 90 degrees.
    pub fn get_transformation_matrix(&self) -> Matrix3x2 {
        let (sin_inc, cos_inc) = self.inclination.sin_cos();
        let (sin_arg_pe, cos_arg_pe) = self.arg_pe.sin_cos();
        let (sin_lan, cos_lan) = self.long_asc_node.sin_cos();

        // https://downloads.rene-schwarz.com/download/M001-Keplerian_Orbit_Elements_to_Cartesian_State_Vectors.pdf
        Matrix3x2 {
            e11: cos_arg_pe * cos_lan - sin_arg_pe * cos_inc * sin_lan,
            e12: -(sin_arg_pe * cos_lan + cos_arg_pe * cos_inc * sin_lan),
            e21: cos_arg_pe * sin_lan + sin_arg_pe * cos_inc * cos_lan,
            e22: cos_arg_pe * cos_inc * cos_lan - sin_arg_pe * sin_lan,
            e31: sin_arg_pe * sin_inc,
            e32: cos_arg_pe * sin_inc,
        }
    }

    /// Transforms a vector in the perifocal plane into the reference frame.
    pub fn transform_pqw_vector(&self, vector: DVec2) -> DVec3 {
        self.get_transformation_matrix().dot_vec(vector)
    }

    /// Gets the velocity at a given true anomaly in the
    /// [perifocal coordinate system](https://en.wikipedia.org/wiki/Perifocal_coordinate_system).
    ///
    /// `sqrt(mu / p) (-sin v, e + cos v)`
    pub fn get_pqw_velocity_at_true_anomaly(&self, true_anomaly: f64) -> DVec2 {
        let (sin_v, cos_v) = true_anomaly.sin_cos();
        let mult = (self.mu / self.get_semi_latus_rectum()).sqrt();

        DVec2::new(-sin_v, self.eccentricity + cos_v) * mult
    }

    /// Gets the velocity at a given true anomaly, in meters per second.
    ///
    /// This is the closed-form perifocal velocity rotated into the
    /// reference frame, so it's exact up to floating point error.
    pub fn get_velocity_at_true_anomaly(&self, true_anomaly: f64) -> DVec3 {
        self.transform_pqw_vector(self.get_pqw_velocity_at_true_anomaly(true_anomaly))
    }

    /// Gets the current velocity, in meters per second.
    pub fn get_velocity(&self) -> DVec3 {
        self.get_velocity_at_true_anomaly(self.true_anomaly)
    }

    /// Gets the position and velocity at a given true anomaly.
    pub fn get_state_vectors_at_true_anomaly(&self, true_anomaly: f64) -> StateVectors {
        StateVectors {
            position: self.get_cartesian_position_at_true_anomaly(true_anomaly),
            velocity: self.get_velocity_at_true_anomaly(true_anomaly),
        }
    }

    /// Gets the current position and velocity.
    pub fn get_state_vectors(&self) -> StateVectors {
        self.get_state_vectors_at_true_anomaly(self.true_anomaly)
    }

    /// Returns the same orbit with the body at a different true anomaly.
    ///
    /// # Errors
    /// [`OrbitError::Domain`] if this is a hyperbola that never reaches
    /// the given true anomaly.
    pub fn at_true_anomaly(&self, true_anomaly: f64) -> Result<Orbit, OrbitError> {
        Orbit::new(
            self.eccentricity,
            self.semi_major_axis,
            self.inclination,
            self.arg_pe,
            self.long_asc_node,
            true_anomaly,
            self.mu,
        )
    }

    /// Returns the orbit a number of seconds later (or earlier, if
    /// negative).
    ///
    /// The mean anomaly advances at the mean motion, and Kepler's equation
    /// turns it back into a true anomaly.
    ///
    /// # Example
    /// ```
    /// use keplerian_transfer::Orbit;
    ///
    /// # fn main() -> Result<(), keplerian_transfer::OrbitError> {
    /// let orbit = Orbit::new(0.1, 7_500_000.0, 0.0, 0.0, 0.0, 1.0, 3.986005e14)?;
    /// let period = orbit.get_orbital_period();
    ///
    /// let later = orbit.after(period)?;
    /// assert!((later.get_true_anomaly() - orbit.get_true_anomaly()).abs() < 1e-6);
    /// # Ok(())
    /// # }
    /// ```
    pub fn after(&self, seconds: f64) -> Result<Orbit, OrbitError> {
        let mean_anomaly = self.get_mean_anomaly()? + self.get_mean_motion() * seconds;
        let true_anomaly = true_anomaly_at_mean_anomaly(mean_anomaly, self.eccentricity)?;
        self.at_true_anomaly(true_anomaly)
    }

    /// Gets the time it takes to reach a given mean anomaly, in seconds.
    ///
    /// Elliptic orbits always look forward, so the result is within one
    /// period. Hyperbolic trajectories return a negative time if the mean
    /// anomaly has already been passed.
    pub fn seconds_to_mean_anomaly(&self, mean_anomaly: f64) -> Result<f64, OrbitError> {
        let delta = mean_anomaly - self.get_mean_anomaly()?;

        let delta = if self.is_hyperbolic() {
            delta
        } else {
            normalize_angle(delta)
        };

        Ok(delta / self.get_mean_motion())
    }

    /// Gets the time it takes to reach a given true anomaly, in seconds.
    ///
    /// # Errors
    /// [`OrbitError::Domain`] if this is a hyperbola that never reaches
    /// the given true anomaly.
    pub fn seconds_to_true_anomaly(&self, true_anomaly: f64) -> Result<f64, OrbitError> {
        self.seconds_to_mean_anomaly(mean_anomaly_at_true_anomaly(
            true_anomaly,
            self.eccentricity,
        )?)
    }

    /// Gets the outbound true anomaly at which the orbit reaches a given
    /// distance from the parent body, in `[0, pi]`.
    ///
    /// `cos v = (a (1 - e^2) / r - 1) / e`
    ///
    /// Returns `None` if the orbit never reaches that distance. A circular
    /// orbit has no distinguished anomaly, so it also returns `None`.
    pub fn true_anomaly_at_radius(&self, radius: f64) -> Option<f64> {
        if radius <= 0.0 || radius.is_nan() || self.eccentricity == 0.0 {
            return None;
        }

        let cos_v = (self.get_semi_latus_rectum() / radius - 1.0) / self.eccentricity;
        clamp_unit("cos(true anomaly)", cos_v).ok().map(f64::acos)
    }

    /// Gets the radius of the sphere of influence of the body on this
    /// orbit, in meters.
    ///
    /// `r_soi = r (mu_child / mu_parent)^0.4`, where `r` is the current
    /// distance and `mu_parent` the gravitational parameter this orbit is
    /// around.
    pub fn get_soi_radius(&self, child_mu: f64) -> f64 {
        self.get_altitude() * (child_mu / self.mu).powf(0.4)
    }

    /// Gets the time until this orbit leaves the sphere of influence of its
    /// parent body, in seconds.
    ///
    /// `parent_orbit` is the orbit of the parent body around its own parent.
    /// Returns `Ok(None)` if this orbit never leaves, and `Ok(Some(0.0))` if
    /// it is already outside and moving away from periapsis.
    /// An inbound orbit outside the sphere returns the time until it crosses
    /// the sphere again on the way out.
    pub fn seconds_to_leave_soi(&self, parent_orbit: &Orbit) -> Result<Option<f64>, OrbitError> {
        let soi_radius = parent_orbit.get_soi_radius(self.mu);

        if !self.is_hyperbolic() && self.get_apoapsis() <= soi_radius {
            return Ok(None);
        }

        let outbound = signed_angle(self.true_anomaly) >= 0.0;
        if outbound && self.get_altitude() >= soi_radius {
            return Ok(Some(0.0));
        }

        self.true_anomaly_at_radius(soi_radius)
            .map(|true_anomaly| self.seconds_to_true_anomaly(true_anomaly))
            .transpose()
    }

    /// Gets the flight-path angle between any position and velocity, in
    /// radians.
    ///
    /// This is the angle of the velocity above the plane perpendicular to the
    /// position: `asin(r . v / (|r| |v|))`.
    /// For state vectors on an orbit it equals
    /// [`get_azimuth`][Self::get_azimuth].
    pub fn get_flight_path_angle(position: DVec3, velocity: DVec3) -> Result<f64, OrbitError> {
        let lengths = position.length() * velocity.length();

        if lengths == 0.0 || !lengths.is_finite() {
            return Err(OrbitError::domain(
                "vector length",
                lengths,
                "the flight-path angle needs a non-zero position and velocity",
            ));
        }

        Ok(clamp_unit("sin(flight-path angle)", position.dot(velocity) / lengths)?.asin())
    }
}

impl StateVectors {
    /// Creates a new [`Orbit`] from the state vectors and a given mu value.
    ///
    /// # Mu
    /// Mu is also known as the gravitational parameter, and
    /// is equal to `GM`, where `G` is the gravitational constant,
    /// and `M` is the mass of the parent body.
    /// It can be described as how strongly the parent body pulls on
    /// the orbiting body.
    ///
    /// Learn more about the gravitational parameter:
    /// <https://en.wikipedia.org/wiki/Standard_gravitational_parameter>
    ///
    /// # Degenerate orbits
    /// Equatorial and circular orbits have undefined angles, which are set
    /// to zero. Use [`to_orbit_with_degeneracy`][Self::to_orbit_with_degeneracy]
    /// to find out whether that happened.
    pub fn to_orbit(self, mu: f64) -> Result<Orbit, OrbitError> {
        self.to_orbit_with_degeneracy(mu).map(|(orbit, _)| orbit)
    }

    /// Creates a new [`Orbit`] from the state vectors, also reporting which
    /// angles were undefined.
    ///
    /// Source: <http://www.braeunig.us/space/orbmech.htm>
    ///
    /// # Errors
    /// - [`OrbitError::Domain`] for a zero position, non-finite inputs, or a
    ///   purely radial velocity (no orbital plane).
    /// - [`OrbitError::Parabolic`] if the specific energy is exactly zero.
    pub fn to_orbit_with_degeneracy(self, mu: f64) -> Result<(Orbit, Degeneracy), OrbitError> {
        let position = self.position;
        let velocity = self.velocity;

        if mu <= 0.0 || !mu.is_finite() {
            return Err(OrbitError::domain(
                "gravitational parameter",
                mu,
                "expected a finite, positive value",
            ));
        }

        let radius = position.length();
        let speed_squared = velocity.length_squared();

        if radius == 0.0 || !radius.is_finite() {
            return Err(OrbitError::domain(
                "position length",
                radius,
                "expected a finite, non-zero position",
            ));
        }
        let speed_squared = check_finite("speed squared", speed_squared)?;

        let angular_momentum = position.cross(velocity);
        let angular_momentum_len = angular_momentum.length();

        if angular_momentum_len <= f64::EPSILON * radius * speed_squared.sqrt() {
            return Err(OrbitError::domain(
                "angular momentum",
                angular_momentum_len,
                "a radial trajectory has no orbital plane",
            ));
        }

        let inverse_semi_major_axis = 2.0 / radius - speed_squared / mu;
        if inverse_semi_major_axis == 0.0 {
            return Err(OrbitError::Parabolic);
        }
        let semi_major_axis = 1.0 / inverse_semi_major_axis;

        // n = z x h
        let node = DVec3::new(-angular_momentum.y, angular_momentum.x, 0.0);
        let node_len = node.length();

        let ecc_vec = ((speed_squared - mu / radius) * position
            - position.dot(velocity) * velocity)
            / mu;
        let eccentricity = ecc_vec.length();

        let degeneracy = Degeneracy {
            equatorial: node_len <= DEGENERACY_THRESHOLD * angular_momentum_len,
            circular: eccentricity <= DEGENERACY_THRESHOLD,
        };
        let retrograde = angular_momentum.z < 0.0;

        let inclination =
            clamp_unit("cos(inclination)", angular_momentum.z / angular_momentum_len)?.acos();

        let long_asc_node = if degeneracy.equatorial {
            0.0
        } else {
            let long_asc_node = clamp_unit("cos(ascending node)", node.x / node_len)?.acos();
            if node.y < 0.0 {
                TAU - long_asc_node
            } else {
                long_asc_node
            }
        };

        // In-plane angle of a vector from +X, for equatorial orbits
        let equatorial_angle = |vector: DVec3| {
            let angle = vector.y.atan2(vector.x);
            normalize_angle(if retrograde { -angle } else { angle })
        };

        let arg_pe = if degeneracy.circular {
            0.0
        } else if degeneracy.equatorial {
            equatorial_angle(ecc_vec)
        } else {
            let arg_pe = clamp_unit(
                "cos(argument of periapsis)",
                node.dot(ecc_vec) / (node_len * eccentricity),
            )?
            .acos();
            if ecc_vec.z < 0.0 {
                TAU - arg_pe
            } else {
                arg_pe
            }
        };

        let true_anomaly = match (degeneracy.circular, degeneracy.equatorial) {
            (true, true) => equatorial_angle(position),
            (true, false) => {
                let arg_lat = clamp_unit(
                    "cos(argument of latitude)",
                    node.dot(position) / (node_len * radius),
                )?
                .acos();
                if position.z < 0.0 {
                    TAU - arg_lat
                } else {
                    arg_lat
                }
            }
            (false, _) => {
                let true_anomaly = clamp_unit(
                    "cos(true anomaly)",
                    ecc_vec.dot(position) / (eccentricity * radius),
                )?
                .acos();
                if position.dot(velocity) < 0.0 {
                    TAU - true_anomaly
                } else {
                    true_anomaly
                }
            }
        };

        if degeneracy.is_degenerate() {
            log::warn!(
                "degenerate orbit from state vectors (equatorial: {}, circular: {}); undefined angles set to 0",
                degeneracy.equatorial,
                degeneracy.circular,
            );
        }

        let orbit = Orbit::new(
            eccentricity,
            semi_major_axis,
            inclination,
            arg_pe,
            long_asc_node,
            true_anomaly,
            mu,
        )?;

        Ok((orbit, degeneracy))
    }
}
