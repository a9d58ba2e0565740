//! Preset celestial bodies and systems.
//!
//! Each preset is a function returning a [`Body`][crate::Body], so you only
//! pay for the bodies you use. The `*_system` functions build a whole
//! [`Universe`][crate::Universe] with the parent-satellite relations in place.

pub mod kerbol;
pub mod sol;

pub use kerbol::kerbol_system;
pub use sol::solar_system;

use log::warn;

use crate::{Body, Id, Universe};

/// Converts polynomial coefficients in degrees into radians.
fn degrees(coefficients: &[f64]) -> Vec<f64> {
    coefficients.iter().map(|c| c.to_radians()).collect()
}

/// Adds a body to a preset universe.
///
/// Presets add every parent before its satellites, so this only returns
/// `None` if that order is broken.
pub(crate) fn add_satellite(
    universe: &mut Universe,
    body: Body,
    parent: Option<Id>,
) -> Option<Id> {
    match universe.add_body(body, parent) {
        Ok(id) => Some(id),
        Err((error, body)) => {
            warn!("leaving {} out of the preset universe: {error}", body.name);
            None
        }
    }
}
