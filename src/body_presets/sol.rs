//! The Sun, the planets and the Moon.
//!
//! Planetary elements are polynomials in Julian centuries since
//! 1900 January 0.5, valid for a few centuries around that epoch.
//!
//! Sources:
//! - <http://www.braeunig.us/space/constant.htm>
//! - <http://www.braeunig.us/space/plntpos.htm#elements>

use super::{add_satellite, degrees};
use crate::{units::astronomical_units, Body, FixedElements, OrbitalElements, Universe};

/// Returns the Sun.
pub fn the_sun() -> Body {
    Body::new("Sun", 1.32712438e20, 696_000_000.0, None)
}

/// Returns Mercury, orbiting the Sun.
pub fn mercury() -> Body {
    let elements = OrbitalElements::with_mean_longitude(
        astronomical_units(0.387_0986),
        degrees(&[178.179_078, 149_474.070_78, 0.000_3011]),
        vec![0.205_614_21, 0.000_020_46, -0.000_000_030],
        degrees(&[7.002_881, 0.001_8608, -0.000_0183]),
        degrees(&[28.753_753, 0.370_2806, 0.000_1208]),
        degrees(&[47.145_944, 1.185_2083, 0.000_1739]),
    );

    Body::new("Mercury", 0.02203e15, 2_439_700.0, Some(elements))
}

/// Returns Venus, orbiting the Sun.
pub fn venus() -> Body {
    let elements = OrbitalElements::with_mean_longitude(
        astronomical_units(0.723_3316),
        degrees(&[342.767_053, 58_519.211_91, 0.000_3097]),
        vec![0.006_820_69, -0.000_047_74, 0.000_000_091],
        degrees(&[3.393_631, 0.001_0058, -0.000_0010]),
        degrees(&[54.384_186, 0.508_1861, -0.001_3864]),
        degrees(&[75.779_647, 0.899_8500, 0.000_4100]),
    );

    Body::new("Venus", 0.3249e15, 6_051_800.0, Some(elements))
}

/// Returns the Earth, orbiting the Sun.
///
/// The Earth's orbit lies in the ecliptic by definition, so its elements
/// only give the eccentricity and mean anomaly.
pub fn earth() -> Body {
    let elements = OrbitalElements::with_mean_anomaly(
        astronomical_units(1.000_0002),
        vec![0.016_751_04, -0.000_041_8, -0.000_000_126],
        degrees(&[358.475_83, 35_999.049_75, -0.000_150, -0.000_003_3]),
    );

    Body::new("Earth", 3.986005e14, 6_378_137.0, Some(elements))
}

/// Returns the Moon, orbiting the Earth on a circular orbit.
pub fn the_moon() -> Body {
    let elements = OrbitalElements::fixed(
        384_403_000.0,
        FixedElements {
            eccentricity: 0.0,
            ..Default::default()
        },
    );

    Body::new("Moon", 4.902794e12, 1_738_000.0, Some(elements))
}

/// Returns Mars, orbiting the Sun.
pub fn mars() -> Body {
    let elements = OrbitalElements::with_mean_longitude(
        astronomical_units(1.523_6883),
        degrees(&[293.737_334, 19_141.695_51, 0.000_3107]),
        vec![0.093_312_90, 0.000_092_064, -0.000_000_077],
        degrees(&[1.850_333, -0.000_6750, 0.000_0126]),
        degrees(&[285.431_761, 1.069_7667, 0.000_1313, 0.000_004_14]),
        degrees(&[48.786_442, 0.770_9917, -0.000_0014, -0.000_005_33]),
    );

    Body::new("Mars", 4.282831e13, 3_397_000.0, Some(elements))
}

/// Returns Jupiter, orbiting the Sun.
pub fn jupiter() -> Body {
    let elements = OrbitalElements::with_mean_longitude(
        astronomical_units(5.202_561),
        degrees(&[238.049_257, 3036.309_86, 0.000_3347, -0.000_001_65]),
        vec![0.048_334_75, 0.000_164_180, -0.000_000_4676, -0.000_000_0017],
        degrees(&[1.308_736, -0.005_6961, 0.000_0039]),
        degrees(&[273.277_558, 0.559_4317, 0.000_704_05, 0.000_005_08]),
        degrees(&[99.443_414, 1.010_5300, 0.000_352_22, 0.000_008_51]),
    );

    Body::new("Jupiter", 126.686e15, 71_492_000.0, Some(elements))
}

/// Returns Saturn, orbiting the Sun.
pub fn saturn() -> Body {
    let elements = OrbitalElements::with_mean_longitude(
        astronomical_units(9.554_747),
        degrees(&[266.564_377, 1223.509_884, 0.000_3245, -0.000_0058]),
        vec![0.055_892_32, -0.000_345_50, -0.000_000_728, 0.000_000_000_74],
        degrees(&[2.492_519, -0.003_9189, -0.000_015_49, 0.000_000_04]),
        degrees(&[338.307_800, 1.085_2207, 0.000_978_54, 0.000_009_92]),
        degrees(&[112.790_414, 0.873_1951, -0.000_152_18, -0.000_005_31]),
    );

    Body::new("Saturn", 37.931e15, 60_268_000.0, Some(elements))
}

/// Returns Uranus, orbiting the Sun.
pub fn uranus() -> Body {
    let elements = OrbitalElements::with_mean_longitude(
        astronomical_units(19.218_14),
        degrees(&[244.197_470, 429.863_546, 0.000_3160, -0.000_000_60]),
        vec![0.046_3444, -0.000_026_58, 0.000_000_077],
        degrees(&[0.772_464, 0.000_6253, 0.000_0395]),
        degrees(&[98.071_581, 0.985_7650, -0.001_0745, -0.000_000_61]),
        degrees(&[73.477_111, 0.498_6678, 0.001_3117]),
    );

    Body::new("Uranus", 5.794e15, 25_559_000.0, Some(elements))
}

/// Returns Neptune, orbiting the Sun.
pub fn neptune() -> Body {
    let elements = OrbitalElements::with_mean_longitude(
        astronomical_units(30.109_57),
        degrees(&[84.457_994, 219.885_914, 0.000_3205, -0.000_000_60]),
        vec![0.008_997_04, 0.000_006_330, -0.000_000_002],
        degrees(&[1.779_242, -0.009_5436, -0.000_0091]),
        degrees(&[276.045_975, 0.325_6394, 0.000_140_95, 0.000_004_113]),
        degrees(&[130.681_389, 1.098_9350, 0.000_249_87, -0.000_004_718]),
    );

    Body::new("Neptune", 6.835e15, 24_764_000.0, Some(elements))
}

/// Builds a universe with the Sun, the eight planets and the Moon.
///
/// Look bodies up by name with
/// [`get_body_index_with_name`][Universe::get_body_index_with_name].
///
/// # Example
/// ```
/// use keplerian_transfer::{body_presets::solar_system, units::seconds_from_julian_date};
///
/// let universe = solar_system();
/// let mars = universe.get_body_index_with_name("Mars").unwrap();
///
/// let position = universe
///     .get_body_position(mars, seconds_from_julian_date(2_442_980.0))
///     .unwrap();
/// assert!(position.length() > 1.5e11);
/// ```
pub fn solar_system() -> Universe {
    let mut universe = Universe::new();

    let Some(sun) = add_satellite(&mut universe, the_sun(), None) else {
        return universe;
    };

    for planet in [mercury(), venus()] {
        add_satellite(&mut universe, planet, Some(sun));
    }
    if let Some(earth) = add_satellite(&mut universe, earth(), Some(sun)) {
        add_satellite(&mut universe, the_moon(), Some(earth));
    }
    for planet in [mars(), jupiter(), saturn(), uranus(), neptune()] {
        add_satellite(&mut universe, planet, Some(sun));
    }

    universe
}
