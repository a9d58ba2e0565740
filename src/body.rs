use crate::{Orbit, OrbitError, OrbitalElements};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Something with a gravitational pull that orbits can be computed around.
///
/// Orbits and transfers only ever read these two values; they never hold on
/// to the body itself.
pub trait CelestialBody {
    /// Gets the standard gravitational parameter `GM` of the body, in m^3/s^2.
    ///
    /// Learn more about the gravitational parameter:
    /// <https://en.wikipedia.org/wiki/Standard_gravitational_parameter>
    fn get_gravitational_parameter(&self) -> f64;

    /// Gets the mean radius of the body, in meters.
    fn get_radius(&self) -> f64;
}

/// A struct representing a celestial body.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// The name of the celestial body.
    pub name: String,

    /// The gravitational parameter of the celestial body, in m^3/s^2.
    pub mu: f64,

    /// The radius of the celestial body, in meters.
    pub radius: f64,

    /// The elements of the body's orbit around its parent, if it has one.
    pub orbit: Option<OrbitalElements>,
}

impl Body {
    /// Creates a new `Body` instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the celestial body.
    /// * `mu` - The gravitational parameter of the celestial body, in m^3/s^2.
    /// * `radius` - The radius of the celestial body, in meters.
    /// * `orbit` - The elements of the body's orbit, if it orbits something.
    pub fn new(
        name: impl Into<String>,
        mu: f64,
        radius: f64,
        orbit: Option<OrbitalElements>,
    ) -> Self {
        Self {
            name: name.into(),
            mu,
            radius,
            orbit,
        }
    }

    /// Releases the body from its orbit.
    pub fn release_from_orbit(&mut self) {
        self.orbit = None;
    }

    /// Gets the orbit of this body around `parent` at a given time.
    ///
    /// Returns `Ok(None)` if the body has no orbital elements.
    pub fn get_orbit_at_time(
        &self,
        parent: &impl CelestialBody,
        time: f64,
    ) -> Result<Option<Orbit>, OrbitError> {
        self.orbit
            .as_ref()
            .map(|elements| elements.orbit_at(parent, time))
            .transpose()
    }

    /// Gets the radius of this body's sphere of influence around `parent`
    /// at a given time, in meters.
    ///
    /// Returns `Ok(None)` if the body has no orbital elements.
    pub fn get_soi_radius_at_time(
        &self,
        parent: &impl CelestialBody,
        time: f64,
    ) -> Result<Option<f64>, OrbitError> {
        Ok(self
            .get_orbit_at_time(parent, time)?
            .map(|orbit| orbit.get_soi_radius(self.mu)))
    }
}

impl CelestialBody for Body {
    fn get_gravitational_parameter(&self) -> f64 {
        self.mu
    }

    fn get_radius(&self) -> f64 {
        self.radius
    }
}

impl<T: CelestialBody + ?Sized> CelestialBody for &T {
    fn get_gravitational_parameter(&self) -> f64 {
        (**self).get_gravitational_parameter()
    }

    fn get_radius(&self) -> f64 {
        (**self).get_radius()
    }
}
