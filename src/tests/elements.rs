use core::f64::consts::{PI, TAU};

use super::{
    assert_almost_eq, assert_almost_eq_angle, assert_close, assert_close_degrees,
    assert_domain_error,
};
use crate::{
    body_presets::sol::{earth, mars, the_sun},
    units::{seconds_from_julian_date, AU},
    Body, EpochAnomaly, FixedElements, OrbitError, OrbitalElements,
};

/// 1976 June 10, the date used for the Mars ephemeris below.
const JD_1976_06_10: f64 = 2_442_980.0;

fn elements_of(body: Body) -> OrbitalElements {
    body.orbit.unwrap()
}

#[test]
fn polynomial_evaluation() {
    assert_eq!(OrbitalElements::evaluate_polynomial(&[], 3.0), 0.0);
    assert_eq!(OrbitalElements::evaluate_polynomial(&[4.0], 3.0), 4.0);
    assert_eq!(
        OrbitalElements::evaluate_polynomial(&[1.0, -2.0, 0.5], 4.0),
        1.0 - 8.0 + 8.0
    );
}

#[test]
fn mars_elements() {
    let sun = the_sun();
    let elements = elements_of(mars());
    let time = seconds_from_julian_date(JD_1976_06_10);

    let orbit = elements.orbit_at(&sun, time).unwrap();

    assert_close_degrees(
        orbit.get_long_asc_node(),
        49.376635,
        5e-6,
        "longitude of ascending node",
    );
    assert_close(orbit.get_eccentricity(), 0.09338333, 5e-9, "eccentricity");
    assert_close_degrees(orbit.get_inclination(), 1.8498237, 0.005, "inclination");
    assert_close_degrees(orbit.get_arg_pe(), 286.25075, 5e-6, "argument of periapsis");
    assert_close_degrees(
        elements.get_mean_anomaly_at_time(&sun, time),
        211.137002,
        5e-6,
        "mean anomaly",
    );
}

#[test]
fn mars_position() {
    let sun = the_sun();
    let time = seconds_from_julian_date(JD_1976_06_10);

    let position = elements_of(mars())
        .orbit_at(&sun, time)
        .unwrap()
        .get_position();

    assert_close_degrees(position.longitude, 181.756494, 5e-5, "ecliptic longitude");
    assert_close_degrees(position.latitude, 1.366666, 0.005, "ecliptic latitude");
    assert_close(position.radius / AU, 1.6486405, 5e-7, "distance in AU");
}

#[test]
fn earth_lies_in_the_ecliptic() {
    let sun = the_sun();
    let elements = elements_of(earth());
    let time = seconds_from_julian_date(JD_1976_06_10);

    let orbit = elements.orbit_at(&sun, time).unwrap();

    assert_eq!(orbit.get_inclination(), 0.0);
    assert_eq!(orbit.get_long_asc_node(), 0.0);
    assert_eq!(orbit.get_arg_pe(), 0.0);
    assert_close(orbit.get_eccentricity(), 0.016718968, 5e-10, "eccentricity");
    assert_close_degrees(
        elements.get_mean_anomaly_at_time(&sun, time),
        195.859204,
        5e-6,
        "mean anomaly polynomial",
    );
}

fn fixed_orbit(epoch_anomaly: EpochAnomaly) -> OrbitalElements {
    OrbitalElements::fixed(
        12_000_000.0,
        FixedElements {
            eccentricity: 0.1,
            inclination: 0.2,
            arg_pe: 0.5,
            long_asc_node: 1.0,
            epoch_anomaly,
            epoch: 1000.0,
        },
    )
}

#[test]
fn rate_law() {
    let kerbin = Body::new("Kerbin", 3.5316e12, 600_000.0, None);
    let elements = fixed_orbit(EpochAnomaly::MeanAnomaly(1.0));
    let period = elements.orbit_at(&kerbin, 1000.0).unwrap().get_orbital_period();

    assert_almost_eq(
        elements.get_mean_anomaly_at_time(&kerbin, 1000.0),
        1.0,
        "mean anomaly at the epoch",
    );
    assert_almost_eq(
        elements.get_mean_anomaly_at_time(&kerbin, 1000.0 + 0.5 * period),
        1.0 + PI,
        "half a period later",
    );
    assert_almost_eq_angle(
        elements.get_mean_anomaly_at_time(&kerbin, 1000.0 - period),
        1.0,
        "one period before the epoch",
    );
}

#[test]
fn mean_longitude_at_epoch() {
    let elements = fixed_orbit(EpochAnomaly::MeanLongitude(3.0));

    // L - w - W
    assert_eq!(elements.get_mean_anomaly().len(), 1);
    assert_almost_eq(elements.get_mean_anomaly()[0], 1.5, "mean anomaly at epoch");
    assert!(elements.get_mean_longitude().is_empty());

    let wrapped = fixed_orbit(EpochAnomaly::MeanLongitude(0.5));
    assert_almost_eq(wrapped.get_mean_anomaly()[0], TAU - 1.0, "wrapped mean anomaly");
}

#[test]
fn missing_coefficients_are_zero() {
    let sun = the_sun();
    let elements = OrbitalElements::with_mean_longitude(
        AU,
        Vec::new(),
        vec![0.1],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );
    let time = seconds_from_julian_date(JD_1976_06_10);

    assert_eq!(elements.get_mean_anomaly_at_time(&sun, time), 0.0);

    let orbit = elements.orbit_at(&sun, time).unwrap();
    assert_eq!(orbit.get_inclination(), 0.0);
    assert_eq!(orbit.get_true_anomaly(), 0.0);
}

#[test]
fn hyperbolic_rate_law_is_signed() {
    let sun = the_sun();
    let elements = OrbitalElements::fixed(
        -AU,
        FixedElements {
            eccentricity: 2.0,
            epoch_anomaly: EpochAnomaly::MeanAnomaly(-3.0),
            ..Default::default()
        },
    );

    assert_eq!(elements.get_mean_anomaly_at_time(&sun, 0.0), -3.0);

    let orbit = elements.orbit_at(&sun, 0.0).unwrap();
    assert!(orbit.get_true_anomaly() > PI, "still inbound");
    assert_almost_eq(orbit.get_mean_anomaly().unwrap(), -3.0, "mean anomaly");
}

#[test]
fn builders() {
    let elements = OrbitalElements::with_mean_anomaly(AU, vec![0.0], vec![0.0, 1.0])
        .with_eccentricity(0.2)
        .with_inclination(0.3)
        .with_arg_pe(0.4)
        .with_long_asc_node(0.5)
        .with_mean_anomaly_at_epoch(0.6, 100.0);

    assert_eq!(elements.get_semi_major_axis(), AU);
    assert_eq!(elements.get_eccentricity(), &[0.2]);
    assert_eq!(elements.get_inclination(), &[0.3]);
    assert_eq!(elements.get_arg_pe(), &[0.4]);
    assert_eq!(elements.get_long_asc_node(), &[0.5]);
    assert_eq!(elements.get_mean_anomaly(), &[0.6]);
    assert_eq!(elements.get_epoch(), 100.0);

    let sun = the_sun();
    assert_almost_eq(
        elements.get_mean_anomaly_at_time(&sun, 100.0),
        0.6,
        "rate law after the builder",
    );
}

#[test]
fn orbit_at_true_anomaly_uses_constant_terms() {
    let sun = the_sun();
    let elements = elements_of(mars());

    let orbit = elements.orbit_at_true_anomaly(&sun, 1.0).unwrap();

    assert_eq!(orbit.get_true_anomaly(), 1.0);
    assert_eq!(orbit.get_eccentricity(), elements.get_eccentricity()[0]);
    assert_eq!(orbit.get_inclination(), elements.get_inclination()[0]);
    assert_eq!(orbit.get_gravitational_parameter(), sun.mu);
}

#[test]
fn invalid_element_sets() {
    let sun = the_sun();

    // The default eccentricity is 1
    let parabolic = OrbitalElements::fixed(AU, FixedElements::default());
    assert_eq!(parabolic.orbit_at(&sun, 0.0), Err(OrbitError::Parabolic));

    let mismatched = OrbitalElements::fixed(
        -AU,
        FixedElements {
            eccentricity: 0.5,
            ..Default::default()
        },
    );
    assert_domain_error(mismatched.orbit_at(&sun, 0.0), "ellipse with a < 0");
}

#[test]
fn body_orbit_and_soi() {
    let sun = the_sun();
    let earth = earth();
    let time = seconds_from_julian_date(JD_1976_06_10);

    let orbit = earth.get_orbit_at_time(&sun, time).unwrap().unwrap();
    let soi = earth.get_soi_radius_at_time(&sun, time).unwrap().unwrap();

    assert_almost_eq(soi, orbit.get_soi_radius(earth.mu), "SOI radius");
    assert_eq!(sun.get_orbit_at_time(&earth, time), Ok(None));

    let mut released = earth.clone();
    released.release_from_orbit();
    assert_eq!(released.get_soi_radius_at_time(&sun, time), Ok(None));
}
