use core::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{assert_almost_eq, assert_almost_eq_angle, assert_domain_error, assert_normalized};
use crate::{
    anomaly::{
        eccentric_anomaly_at_mean_anomaly, eccentric_anomaly_at_true_anomaly,
        hyperbolic_eccentric_anomaly_at_mean_anomaly,
        hyperbolic_eccentric_anomaly_at_true_anomaly, mean_anomaly_at_true_anomaly, mean_motion,
        normalize_angle, signed_angle, true_anomaly_at_eccentric_anomaly,
        true_anomaly_at_hyperbolic_eccentric_anomaly, true_anomaly_at_mean_anomaly,
    },
    OrbitError,
};

const RANDOM_TESTS: usize = 1000;

#[test]
fn normalize_angle_range() {
    assert_eq!(normalize_angle(0.0), 0.0);
    assert_eq!(normalize_angle(TAU), 0.0);
    assert_almost_eq(normalize_angle(-FRAC_PI_2), 1.5 * PI, "-pi/2");
    assert_almost_eq(normalize_angle(5.0 * PI), PI, "5 pi");
    // Rounds up to exactly tau without the guard
    assert_normalized(normalize_angle(-1e-18), "tiny negative angle");

    for _ in 0..RANDOM_TESTS {
        let angle: f64 = rand::random_range(-100.0..100.0);
        assert_normalized(normalize_angle(angle), "random angle");
        assert_almost_eq_angle(normalize_angle(angle), angle, "random angle");
    }
}

#[test]
fn signed_angle_range() {
    assert_eq!(signed_angle(PI), PI);
    assert_almost_eq(signed_angle(1.5 * PI), -FRAC_PI_2, "3 pi / 2");
    assert_almost_eq(signed_angle(-0.25), -0.25, "-0.25");
}

#[test]
fn mean_motion_of_hyperbola_uses_magnitude() {
    assert_eq!(mean_motion(2.0, 8.0), mean_motion(-2.0, 8.0));
    assert_almost_eq(mean_motion(4.0, 64.0), 1.0, "n = sqrt(64 / 4^3)");
}

#[test]
fn kepler_equation_residual() {
    for _ in 0..RANDOM_TESTS {
        let eccentricity: f64 = rand::random_range(0.0..0.999);
        let mean_anomaly: f64 = rand::random_range(-10.0..10.0);

        let eccentric_anomaly =
            eccentric_anomaly_at_mean_anomaly(mean_anomaly, eccentricity).unwrap();
        let recovered = eccentric_anomaly - eccentricity * eccentric_anomaly.sin();

        assert_almost_eq_angle(
            recovered,
            mean_anomaly,
            &format!("M from E for e = {eccentricity}, M = {mean_anomaly}"),
        );
    }
}

#[test]
fn kepler_equation_high_eccentricity() {
    // Seeding at zero makes Newton's method cycle for some of these
    let eccentricities = [0.8, 0.9, 0.99, 0.999, 0.999_999];
    let mean_anomalies = [1e-6, 0.01, 0.5, 3.0, PI, 3.2, 6.0, TAU - 1e-6];

    for e in eccentricities {
        for m in mean_anomalies {
            let eccentric_anomaly = eccentric_anomaly_at_mean_anomaly(m, e).unwrap();
            assert!(
                eccentric_anomaly.is_finite(),
                "E should be finite for e = {e}, M = {m}"
            );
            assert_almost_eq_angle(
                eccentric_anomaly - e * eccentric_anomaly.sin(),
                m,
                &format!("Kepler residual for e = {e}, M = {m}"),
            );
        }
    }
}

#[test]
fn circular_anomalies_coincide() {
    for angle in [0.0, 0.3, 2.0, PI, 4.0, 6.0] {
        assert_almost_eq(
            eccentric_anomaly_at_mean_anomaly(angle, 0.0).unwrap(),
            angle,
            "E of a circle",
        );
        assert_almost_eq(
            true_anomaly_at_mean_anomaly(angle, 0.0).unwrap(),
            angle,
            "v of a circle",
        );
    }
}

/// Past this, `M` in `[0, tau)` can't hold `v` to 1e-6 rad in double
/// precision just before periapsis.
const MAX_ROUND_TRIP_ECCENTRICITY: f64 = 0.999_98;

#[test]
fn elliptic_round_trip() {
    for _ in 0..RANDOM_TESTS {
        let eccentricity: f64 = rand::random_range(0.0..MAX_ROUND_TRIP_ECCENTRICITY);
        let true_anomaly: f64 = rand::random_range(0.0..TAU);

        let mean_anomaly = mean_anomaly_at_true_anomaly(true_anomaly, eccentricity).unwrap();
        assert_normalized(mean_anomaly, "elliptic mean anomaly");

        let recovered = true_anomaly_at_mean_anomaly(mean_anomaly, eccentricity).unwrap();
        assert_normalized(recovered, "elliptic true anomaly");
        assert_almost_eq_angle(
            recovered,
            true_anomaly,
            &format!("v -> M -> v for e = {eccentricity}"),
        );
    }
}

#[test]
fn elliptic_round_trip_near_parabolic() {
    const STEPS: usize = 20_000;

    for eccentricity in [0.99, 0.995, 0.998, 0.999, 0.9999, MAX_ROUND_TRIP_ECCENTRICITY] {
        for i in 0..STEPS {
            let true_anomaly = (i as f64 + 0.5) * TAU / STEPS as f64;

            let mean_anomaly = mean_anomaly_at_true_anomaly(true_anomaly, eccentricity).unwrap();
            let recovered = true_anomaly_at_mean_anomaly(mean_anomaly, eccentricity).unwrap();

            assert_almost_eq_angle(
                recovered,
                true_anomaly,
                &format!("v -> M -> v for e = {eccentricity}, v = {true_anomaly}"),
            );
        }
    }

    // Close to periapsis and apoapsis, where E and v diverge the most
    for true_anomaly in [1e-7, 0.01, 4.838, PI - 1e-9, PI + 1e-9, TAU - 0.01] {
        let mean_anomaly =
            mean_anomaly_at_true_anomaly(true_anomaly, MAX_ROUND_TRIP_ECCENTRICITY).unwrap();
        let recovered =
            true_anomaly_at_mean_anomaly(mean_anomaly, MAX_ROUND_TRIP_ECCENTRICITY).unwrap();

        assert_almost_eq_angle(recovered, true_anomaly, &format!("v = {true_anomaly}"));
    }
}

#[test]
fn eccentric_anomaly_matches_cosine_form() {
    for eccentricity in [0.0, 0.3, 0.9, 0.9999] {
        for true_anomaly in [0.0, 0.2, 1.5, 3.0, PI, 3.5, 5.0, 6.2] {
            let eccentric_anomaly =
                eccentric_anomaly_at_true_anomaly(true_anomaly, eccentricity).unwrap();
            let cos_v: f64 = true_anomaly.cos();
            let cos_e = (eccentricity + cos_v) / (1.0 + eccentricity * cos_v);

            assert_normalized(eccentric_anomaly, "eccentric anomaly");
            assert_almost_eq(
                eccentric_anomaly.cos(),
                cos_e,
                &format!("cos E for e = {eccentricity}, v = {true_anomaly}"),
            );
            assert_eq!(
                eccentric_anomaly > PI,
                true_anomaly > PI,
                "E and v share a half for e = {eccentricity}, v = {true_anomaly}"
            );
        }
    }

    assert_domain_error(eccentric_anomaly_at_true_anomaly(1.0, 1.5), "hyperbola");
}

#[test]
fn eccentric_anomaly_quadrants() {
    let e = 0.5;

    // Past apoapsis, E follows v into the lower half
    let before = eccentric_anomaly_at_true_anomaly(PI - 0.1, e).unwrap();
    let after = eccentric_anomaly_at_true_anomaly(PI + 0.1, e).unwrap();

    assert!(before < PI && after > PI);
    assert_almost_eq(before + after, TAU, "E is symmetric around apoapsis");
    assert_almost_eq(
        eccentric_anomaly_at_true_anomaly(-0.1, e).unwrap(),
        eccentric_anomaly_at_true_anomaly(TAU - 0.1, e).unwrap(),
        "negative true anomaly",
    );

    for eccentric_anomaly in [0.0, 1.0, PI, 4.0, 6.0] {
        let true_anomaly = true_anomaly_at_eccentric_anomaly(eccentric_anomaly, e);
        assert_almost_eq_angle(
            eccentric_anomaly_at_true_anomaly(true_anomaly, e).unwrap(),
            eccentric_anomaly,
            &format!("E -> v -> E at E = {eccentric_anomaly}"),
        );
    }
}

#[test]
fn hyperbolic_round_trip() {
    for _ in 0..RANDOM_TESTS {
        let eccentricity: f64 = rand::random_range(1.01..10.0);
        let limit = 0.9 * (-1.0 / eccentricity).acos();
        let true_anomaly: f64 = rand::random_range(-limit..limit);

        let mean_anomaly = mean_anomaly_at_true_anomaly(true_anomaly, eccentricity).unwrap();
        assert_eq!(
            mean_anomaly.signum(),
            true_anomaly.signum(),
            "hyperbolic mean anomaly keeps the sign of v = {true_anomaly}"
        );

        let recovered = true_anomaly_at_mean_anomaly(mean_anomaly, eccentricity).unwrap();
        assert_almost_eq_angle(
            recovered,
            true_anomaly,
            &format!("v -> M -> v for e = {eccentricity}"),
        );
    }
}

#[test]
fn hyperbolic_kepler_large_mean_anomaly() {
    for mean_anomaly in [-1e6, -1000.0, -1.0, 0.0, 1e-9, 1.0, 1000.0, 1e6] {
        for eccentricity in [1.001, 1.5, 3.0, 50.0] {
            let anomaly =
                hyperbolic_eccentric_anomaly_at_mean_anomaly(mean_anomaly, eccentricity).unwrap();
            let recovered = eccentricity * anomaly.sinh() - anomaly;
            let scale = mean_anomaly.abs().max(1.0);

            assert_almost_eq(
                recovered / scale,
                mean_anomaly / scale,
                &format!("hyperbolic Kepler residual for e = {eccentricity}, M = {mean_anomaly}"),
            );
        }
    }
}

#[test]
fn hyperbolic_anomaly_signs() {
    let e = 2.0;

    let f = hyperbolic_eccentric_anomaly_at_true_anomaly(1.0, e).unwrap();
    let f_neg = hyperbolic_eccentric_anomaly_at_true_anomaly(-1.0, e).unwrap();
    assert!(f > 0.0);
    assert_almost_eq(f, -f_neg, "F is odd in v");

    // Negative true anomalies come back wrapped just below tau
    let v = true_anomaly_at_hyperbolic_eccentric_anomaly(f_neg, e);
    assert_almost_eq(v, TAU - 1.0, "v before periapsis");
}

#[test]
fn hyperbolic_beyond_asymptote() {
    let e = 2.0;
    // The asymptote is at 120 degrees
    let beyond = 130f64.to_radians();

    assert_domain_error(
        hyperbolic_eccentric_anomaly_at_true_anomaly(beyond, e),
        "F beyond the asymptote",
    );
    assert_domain_error(
        mean_anomaly_at_true_anomaly(-beyond, e),
        "M beyond the asymptote",
    );
}

#[test]
fn invalid_eccentricities() {
    assert_eq!(
        true_anomaly_at_mean_anomaly(1.0, 1.0),
        Err(OrbitError::Parabolic)
    );
    assert_eq!(
        mean_anomaly_at_true_anomaly(1.0, 1.0),
        Err(OrbitError::Parabolic)
    );
    assert_domain_error(true_anomaly_at_mean_anomaly(1.0, -0.5), "negative e");
    assert_domain_error(true_anomaly_at_mean_anomaly(1.0, f64::NAN), "NaN e");
    assert_domain_error(eccentric_anomaly_at_mean_anomaly(1.0, 1.5), "elliptic solver, e > 1");
    assert_domain_error(
        hyperbolic_eccentric_anomaly_at_mean_anomaly(1.0, 0.5),
        "hyperbolic solver, e < 1",
    );
}
