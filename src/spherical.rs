use glam::DVec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{anomaly::normalize_angle, error::clamp_unit, OrbitError};

/// A position given as longitude, latitude and distance from the origin.
///
/// Longitude is measured in the XY plane from the +X axis towards +Y, and
/// latitude from the XY plane towards +Z. In a heliocentric ecliptic frame
/// these are the ecliptic longitude and latitude.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spherical {
    /// The longitude in radians, in `[0, tau)`.
    pub longitude: f64,
    /// The latitude in radians, in `[-pi/2, pi/2]`.
    pub latitude: f64,
    /// The distance from the origin in meters.
    pub radius: f64,
}

impl Spherical {
    /// Creates a new spherical position.
    pub const fn new(longitude: f64, latitude: f64, radius: f64) -> Self {
        Self {
            longitude,
            latitude,
            radius,
        }
    }

    /// Converts this position into a Cartesian vector.
    ///
    /// # Example
    /// ```
    /// use keplerian_transfer::Spherical;
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let point = Spherical::new(FRAC_PI_2, 0.0, 2.0).to_cartesian();
    ///
    /// assert!(point.x.abs() < 1e-12);
    /// assert!((point.y - 2.0).abs() < 1e-12);
    /// ```
    pub fn to_cartesian(&self) -> DVec3 {
        let (sin_lon, cos_lon) = self.longitude.sin_cos();
        let (sin_lat, cos_lat) = self.latitude.sin_cos();

        DVec3::new(
            self.radius * cos_lat * cos_lon,
            self.radius * cos_lat * sin_lon,
            self.radius * sin_lat,
        )
    }

    /// Converts a Cartesian vector into longitude, latitude and radius.
    ///
    /// # Errors
    /// [`OrbitError::Domain`] for the zero vector, which has no direction.
    pub fn from_cartesian(vector: DVec3) -> Result<Self, OrbitError> {
        let radius = vector.length();

        if radius == 0.0 || !radius.is_finite() {
            return Err(OrbitError::domain(
                "vector length",
                radius,
                "expected a finite, non-zero vector",
            ));
        }

        let latitude = clamp_unit("sin(latitude)", vector.z / radius)?.asin();
        let longitude = normalize_angle(vector.y.atan2(vector.x));

        Ok(Self {
            longitude,
            latitude,
            radius,
        })
    }
}

impl From<Spherical> for DVec3 {
    fn from(value: Spherical) -> Self {
        value.to_cartesian()
    }
}

/// Gets the angle between two vectors, in `[0, pi]`.
///
/// # Errors
/// [`OrbitError::Domain`] if either vector has zero length.
pub fn angle_between(a: DVec3, b: DVec3) -> Result<f64, OrbitError> {
    let lengths = a.length() * b.length();

    if lengths == 0.0 || !lengths.is_finite() {
        return Err(OrbitError::domain(
            "vector length",
            lengths,
            "the angle to a zero vector is undefined",
        ));
    }

    Ok(clamp_unit("cos(angle)", a.dot(b) / lengths)?.acos())
}
