#![cfg(test)]

extern crate std;

use glam::{DVec2, DVec3};
use std::f64::consts::{PI, TAU};

use crate::{Orbit, OrbitError, Spherical};

const ORBIT_POLL_ANGLES: usize = 1024;

/// Earth's gravitational parameter, in m^3/s^2.
const MU_EARTH: f64 = 3.986005e14;

/// The Sun's gravitational parameter, in m^3/s^2.
const MU_SUN: f64 = 1.32712438e20;


mod anomaly;
mod elements;

use assertions::*;
use polling::*;

/// Routes `log` output through the test harness. Run with
/// `RUST_LOG=debug` to see solver traces.
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit_orbit() -> Orbit {
    Orbit::new(0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0).unwrap()
}

#[test]
fn unit_orbit_angle_3d() {
    let orbit = unit_orbit();

    let tests = [
        ("unit orbit 1", 0.0 * PI, DVec3::new(1.0, 0.0, 0.0)),
        ("unit orbit 2", 0.5 * PI, DVec3::new(0.0, 1.0, 0.0)),
        ("unit orbit 3", 1.0 * PI, DVec3::new(-1.0, 0.0, 0.0)),
        ("unit orbit 4", 1.5 * PI, DVec3::new(0.0, -1.0, 0.0)),
        ("unit orbit 5", 2.0 * PI, DVec3::new(1.0, 0.0, 0.0)),
    ];

    for (what, angle, expected) in tests {
        assert_almost_eq_vec3(
            orbit.get_cartesian_position_at_true_anomaly(angle),
            expected,
            what,
        );
    }
}

#[test]
fn unit_orbit_transformation() {
    // Test how the inclination and LAN tilts points in the orbit.
    // Since inclination is zero, it should not do anything.
    let orbit = unit_orbit();

    let tests = [(1.0, 1.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)];

    for point in tests {
        let transformed = orbit.transform_pqw_vector(DVec2::new(point.0, point.1));

        assert_eq!(transformed.x, point.0);
        assert_eq!(transformed.y, point.1);
        assert_eq!(transformed.z, 0.0);
    }
}

#[test]
fn tilted_90deg() {
    let orbit = Orbit::new(0.0, 1.0, PI / 2.0, 0.0, 0.0, 0.0, 1.0).unwrap();

    // Before and after transformation
    let tests = [
        ("Vector 1", (1.0, 0.0), DVec3::new(1.0, 0.0, 0.0)),
        ("Vector 2", (0.0, 1.0), DVec3::new(0.0, 0.0, 1.0)),
        ("Vector 3", (-1.0, 0.0), DVec3::new(-1.0, 0.0, 0.0)),
        ("Vector 4", (0.0, -1.0), DVec3::new(0.0, 0.0, -1.0)),
    ];

    for (what, point, expected) in tests.iter() {
        let transformed = orbit.transform_pqw_vector(DVec2::new(point.0, point.1));

        assert_almost_eq_vec3(transformed, *expected, what);
    }
}

#[test]
fn tilted_equidistant() {
    let orbit = Orbit::new(
        0.0,
        1.0,
        2.848915582093,
        1.9520945821,
        2.1834987325,
        0.69482153021,
        1.0,
    )
    .unwrap();

    for point in poll_positions(&orbit) {
        assert_almost_eq(point.length(), 1.0, "Distance");
    }
}

#[test]
fn matrix_matches_spherical_position() {
    // The rotated perifocal position and the longitude/latitude route
    // must land on the same point.
    let orbit = Orbit::new(0.3, 2.0, 1.1, 4.0, 5.5, 0.0, 1.0).unwrap();

    for angle in poll_angles() {
        let radius = orbit.get_altitude_at_true_anomaly(angle);
        let pqw = DVec2::new(angle.cos(), angle.sin()) * radius;

        assert_almost_eq_vec3(
            orbit.transform_pqw_vector(pqw),
            orbit.get_cartesian_position_at_true_anomaly(angle),
            &format!("position at v = {angle}"),
        );
    }
}

#[test]
fn spherical_round_trip() {
    let points = [
        Spherical::new(0.0, 0.0, 1.0),
        Spherical::new(1.2, 0.4, 7.5e6),
        Spherical::new(3.5, -1.1, 2.0),
        Spherical::new(6.0, 0.0, 1.5e11),
        Spherical::new(PI, PI / 2.0 - 1e-3, 1.0),
    ];

    for point in points {
        let recovered = Spherical::from_cartesian(point.to_cartesian()).unwrap();
        let what = format!("{point:?}");

        assert_almost_eq_rescale(recovered.radius, point.radius, &what);
        assert_almost_eq_angle(recovered.longitude, point.longitude, &what);
        assert_almost_eq(recovered.latitude, point.latitude, &what);
        assert_normalized(recovered.longitude, &what);
    }

    // Longitudes past tau wrap, negative latitudes stay negative
    let wrapped = Spherical::from_cartesian(Spherical::new(TAU + 0.5, -0.3, 4.0).into()).unwrap();
    assert_almost_eq(wrapped.longitude, 0.5, "wrapped longitude");
    assert_almost_eq(wrapped.latitude, -0.3, "southern latitude");
}

#[test]
fn spherical_of_axes() {
    let up = Spherical::from_cartesian(DVec3::new(0.0, 0.0, 3.0)).unwrap();
    assert_almost_eq(up.latitude, PI / 2.0, "latitude of +z");
    assert_eq!(up.radius, 3.0);

    let west = Spherical::from_cartesian(DVec3::new(0.0, -2.0, 0.0)).unwrap();
    assert_almost_eq(west.longitude, 1.5 * PI, "longitude of -y");
    assert_eq!(west.latitude, 0.0);

    assert_domain_error(Spherical::from_cartesian(DVec3::ZERO), "zero vector");
    assert_domain_error(
        Spherical::from_cartesian(DVec3::new(f64::NAN, 0.0, 1.0)),
        "NaN vector",
    );
}

#[test]
fn orbit_positions_convert_back() {
    let orbit = Orbit::new(0.3, 2.0, 1.1, 4.0, 5.5, 0.0, 1.0).unwrap();

    for angle in poll_angles() {
        let position = orbit.get_position_at_true_anomaly(angle);
        let recovered = Spherical::from_cartesian(position.to_cartesian()).unwrap();
        let what = format!("position at v = {angle}");

        assert_almost_eq_angle(recovered.longitude, position.longitude, &what);
        assert_almost_eq(recovered.latitude, position.latitude, &what);
        assert_almost_eq(recovered.radius, position.radius, &what);
    }
}

#[test]
fn hyperbolic_positions_are_finite() {
    let orbit = Orbit::new(2.0, -1.0, 0.5, 1.0, 2.0, 0.0, 1.0).unwrap();
    // Asymptote at acos(-1/2) = 120 degrees
    let limit = (-1.0 / orbit.get_eccentricity()).acos();

    for angle in poll_angles() {
        let signed = if angle > PI { angle - TAU } else { angle };
        if signed.abs() >= 0.99 * limit {
            continue;
        }

        let position = orbit.get_cartesian_position_at_true_anomaly(angle);
        assert!(
            position.is_finite(),
            "position at v = {angle} should be finite, got {position}"
        );
        assert_almost_eq_rescale(
            position.length(),
            orbit.get_altitude_at_true_anomaly(angle),
            &format!("distance at v = {angle}"),
        );
    }
}

#[test]
fn errors_are_displayable() {
    let error = OrbitError::Parabolic;
    assert!(error.to_string().contains("parabolic"));

    let error = Orbit::new(0.5, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0).unwrap_err();
    assert!(error.to_string().contains("semi-major axis"));
}
