//! The Kerbol system from Kerbal Space Program.
//!
//! Kerbol bodies move on fixed orbits. Their epoch is time 0, so pass
//! the in-game universal time in seconds as the time.

use super::add_satellite;
use crate::{Body, EpochAnomaly, FixedElements, OrbitalElements, Universe};
use core::f64::consts::PI;

/// Fixed elements with angles in degrees and the epoch anomaly in radians.
fn elements(
    semi_major_axis: f64,
    eccentricity: f64,
    inclination: f64,
    arg_pe: f64,
    long_asc_node: f64,
    epoch_anomaly: EpochAnomaly,
) -> OrbitalElements {
    OrbitalElements::fixed(
        semi_major_axis,
        FixedElements {
            eccentricity,
            inclination: inclination.to_radians(),
            arg_pe: arg_pe.to_radians(),
            long_asc_node: long_asc_node.to_radians(),
            epoch_anomaly,
            epoch: 0.0,
        },
    )
}

/// Returns Kerbol, the star of the system.
pub fn kerbol() -> Body {
    Body::new("Kerbol", 1.172_332_794_832_49e18, 261_600_000.0, None)
}

/// Returns Moho, orbiting Kerbol.
pub fn moho() -> Body {
    let orbit = elements(
        5_263_138_304.0,
        0.2,
        7.0,
        15.0,
        70.0,
        EpochAnomaly::MeanLongitude(PI + 85f64.to_radians()),
    );
    Body::new("Moho", 168_609_378_654.509, 250_000.0, Some(orbit))
}

/// Returns Eve, orbiting Kerbol.
pub fn eve() -> Body {
    let orbit = elements(
        9_832_684_544.0,
        0.01,
        2.1,
        0.0,
        15.0,
        EpochAnomaly::MeanLongitude(PI + 15f64.to_radians()),
    );
    Body::new("Eve", 8_171_730_229_210.87, 700_000.0, Some(orbit))
}

/// Returns Gilly, orbiting Eve.
pub fn gilly() -> Body {
    let orbit = elements(
        31_500_000.0,
        0.55,
        12.0,
        10.0,
        80.0,
        EpochAnomaly::MeanLongitude(0.9 + 90f64.to_radians()),
    );
    Body::new("Gilly", 8_289_449.814_716_35, 13_000.0, Some(orbit))
}

/// Returns Kerbin, orbiting Kerbol.
pub fn kerbin() -> Body {
    let orbit = elements(
        13_599_840_256.0,
        0.0,
        0.0,
        0.0,
        0.0,
        EpochAnomaly::MeanAnomaly(PI),
    );
    Body::new("Kerbin", 3_531_600_000_000.0, 600_000.0, Some(orbit))
}

/// Returns the Mun, orbiting Kerbin.
pub fn mun() -> Body {
    let orbit = elements(12_000_000.0, 0.0, 0.0, 0.0, 0.0, EpochAnomaly::MeanAnomaly(1.7));
    Body::new("Mun", 65_138_397_520.780_7, 200_000.0, Some(orbit))
}

/// Returns Minmus, orbiting Kerbin.
pub fn minmus() -> Body {
    let orbit = elements(
        47_000_000.0,
        0.0,
        6.0,
        38.0,
        78.0,
        EpochAnomaly::MeanLongitude(0.9 + 116f64.to_radians()),
    );
    Body::new("Minmus", 1_765_800_026.312_47, 60_000.0, Some(orbit))
}

/// Returns Duna, orbiting Kerbol.
pub fn duna() -> Body {
    let orbit = elements(
        20_726_155_264.0,
        0.051,
        0.06,
        0.0,
        135.5,
        EpochAnomaly::MeanLongitude(PI + 135.5f64.to_radians()),
    );
    Body::new("Duna", 301_363_211_975.098, 320_000.0, Some(orbit))
}

/// Returns Ike, orbiting Duna.
pub fn ike() -> Body {
    let orbit = elements(3_200_000.0, 0.03, 0.2, 0.0, 0.0, EpochAnomaly::MeanLongitude(1.7));
    Body::new("Ike", 18_568_368_573.144, 130_000.0, Some(orbit))
}

/// Returns Dres, orbiting Kerbol.
pub fn dres() -> Body {
    let orbit = elements(
        40_839_348_203.0,
        0.145,
        5.0,
        90.0,
        280.0,
        EpochAnomaly::MeanLongitude(PI + 10f64.to_radians()),
    );
    Body::new("Dres", 21_484_488_600.0, 138_000.0, Some(orbit))
}

/// Returns Jool, orbiting Kerbol.
pub fn jool() -> Body {
    let orbit = elements(
        68_773_560_320.0,
        0.05,
        1.304,
        0.0,
        52.0,
        EpochAnomaly::MeanLongitude(0.1 + 52f64.to_radians()),
    );
    Body::new("Jool", 282_528_004_209_995.0, 6_000_000.0, Some(orbit))
}

/// Returns Laythe, orbiting Jool.
pub fn laythe() -> Body {
    let orbit = elements(27_184_000.0, 0.0, 0.0, 0.0, 0.0, EpochAnomaly::MeanAnomaly(PI));
    Body::new("Laythe", 1_962_000_029_236.08, 500_000.0, Some(orbit))
}

/// Returns Vall, orbiting Jool.
pub fn vall() -> Body {
    let orbit = elements(43_152_000.0, 0.0, 0.0, 0.0, 0.0, EpochAnomaly::MeanAnomaly(0.9));
    Body::new("Vall", 207_481_499_473.751, 300_000.0, Some(orbit))
}

/// Returns Tylo, orbiting Jool.
pub fn tylo() -> Body {
    let orbit = elements(68_500_000.0, 0.0, 0.025, 0.0, 0.0, EpochAnomaly::MeanLongitude(PI));
    Body::new("Tylo", 2_825_280_042_099.95, 600_000.0, Some(orbit))
}

/// Returns Bop, orbiting Jool.
pub fn bop() -> Body {
    let orbit = elements(
        128_500_000.0,
        0.235,
        15.0,
        25.0,
        0.0,
        EpochAnomaly::MeanLongitude(0.9 + 35f64.to_radians()),
    );
    Body::new("Bop", 2_486_834_944.414_91, 65_000.0, Some(orbit))
}

/// Returns Pol, orbiting Jool.
pub fn pol() -> Body {
    let orbit = elements(
        179_890_000.0,
        0.170_85,
        4.25,
        15.0,
        2.0,
        EpochAnomaly::MeanLongitude(0.9 + 17f64.to_radians()),
    );
    Body::new("Pol", 721_702_080.0, 44_000.0, Some(orbit))
}

/// Returns Eeloo, orbiting Kerbol.
pub fn eeloo() -> Body {
    let orbit = elements(
        90_118_820_000.0,
        0.26,
        6.15,
        260.0,
        50.0,
        EpochAnomaly::MeanLongitude(PI + 310f64.to_radians()),
    );
    Body::new("Eeloo", 74_410_814_527.049_6, 210_000.0, Some(orbit))
}

/// Builds a universe with Kerbol and all of its planets and moons.
///
/// # Example
/// ```
/// use keplerian_transfer::body_presets::kerbol_system;
///
/// let universe = kerbol_system();
/// let mun = universe.get_body_index_with_name("Mun").unwrap();
/// let kerbin = universe.get_body_index_with_name("Kerbin").unwrap();
///
/// assert_eq!(universe.get_body_relation(mun).unwrap().parent, Some(kerbin));
/// ```
pub fn kerbol_system() -> Universe {
    let mut universe = Universe::new();

    let Some(star) = add_satellite(&mut universe, kerbol(), None) else {
        return universe;
    };

    let systems: [(Body, Vec<Body>); 7] = [
        (moho(), vec![]),
        (eve(), vec![gilly()]),
        (kerbin(), vec![mun(), minmus()]),
        (duna(), vec![ike()]),
        (dres(), vec![]),
        (jool(), vec![laythe(), vall(), tylo(), bop(), pol()]),
        (eeloo(), vec![]),
    ];

    for (planet, moons) in systems {
        if let Some(planet) = add_satellite(&mut universe, planet, Some(star)) {
            for moon in moons {
                add_satellite(&mut universe, moon, Some(planet));
            }
        }
    }

    universe
}
