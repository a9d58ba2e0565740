use core::fmt;
use std::collections::HashMap;

use glam::DVec3;
use thiserror::Error;

use crate::{Body, Orbit, OrbitError, StateVectors};

/// The identifier of a body in a [`Universe`].
pub type Id = u64;

/// A registry of celestial bodies and who orbits whom.
///
/// Bodies refer to their parent and satellites by [`Id`], so there are no
/// ownership cycles: add the parent first, then its satellites.
///
/// Times are in seconds since Julian date 0, see [`units`][crate::units].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Universe {
    /// The celestial bodies in the universe and their relations.
    bodies: HashMap<Id, BodyWrapper>,

    /// The next ID to assign to a body.
    next_id: Id,
}

/// The parent and satellites of a body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyRelation {
    /// The body this one orbits, if any.
    pub parent: Option<Id>,
    /// The bodies orbiting this one.
    pub satellites: Vec<Id>,
}

#[derive(Clone, Debug, PartialEq)]
struct BodyWrapper {
    body: Body,
    relations: BodyRelation,
}

/// An error from looking up bodies in a [`Universe`].
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Error)]
pub enum UniverseError {
    /// There was no body at the specified parent index.
    #[error("there was no body at the specified parent index {0}")]
    ParentNotFound(Id),

    /// There was no body at the specified index.
    #[error("there was no body at the specified index {0}")]
    BodyNotFound(Id),

    /// The body has no parent or no orbital elements.
    #[error("body {0} is not orbiting anything")]
    NotOrbiting(Id),

    /// The orbit of a body could not be computed.
    #[error(transparent)]
    Orbit(#[from] OrbitError),
}

impl Universe {
    /// Creates an empty universe.
    pub fn new() -> Universe {
        Universe::default()
    }

    /// Adds a body to the universe.
    /// `body`: The body to add into the universe.
    /// `satellite_of`: The index of the body that this body is orbiting.
    /// Returns: The index of the newly-added body.
    ///
    /// If the parent doesn't exist, the body is handed back with the error.
    pub fn add_body(
        &mut self,
        body: Body,
        satellite_of: Option<Id>,
    ) -> Result<Id, (UniverseError, Body)> {
        if let Some(parent_index) = satellite_of {
            if !self.bodies.contains_key(&parent_index) {
                return Err((UniverseError::ParentNotFound(parent_index), body));
            }
        }

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        self.bodies.insert(
            id,
            BodyWrapper {
                body,
                relations: BodyRelation {
                    parent: satellite_of,
                    satellites: Vec::new(),
                },
            },
        );
        if let Some(parent_index) = satellite_of {
            if let Some(wrapper) = self.bodies.get_mut(&parent_index) {
                wrapper.relations.satellites.push(id);
            }
        }

        Ok(id)
    }

    /// Removes a body from the universe.
    ///
    /// `body_index`: The index of the body to remove.
    ///
    /// Returns: A Vec of all bodies that were removed, including the one specified
    /// and everything orbiting it.
    /// An empty Vec is returned if the body was not found.
    pub fn remove_body(&mut self, body_index: Id) -> Vec<Body> {
        let wrapper = match self.bodies.remove(&body_index) {
            Some(wrapper) => wrapper,
            None => return Vec::new(),
        };

        let (body, relations) = (wrapper.body, wrapper.relations);
        let mut bodies = vec![body];

        if let Some(parent_index) = relations.parent {
            if let Some(parent_wrapper) = self.bodies.get_mut(&parent_index) {
                parent_wrapper
                    .relations
                    .satellites
                    .retain(|&satellite| satellite != body_index);
            }
        }

        for &satellite_index in &relations.satellites {
            bodies.append(&mut self.remove_body(satellite_index));
        }

        bodies
    }

    /// Gets the number of bodies in the universe.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the universe has no bodies.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Gets a Vec of all bodies in the universe.
    pub fn get_bodies(&self) -> Vec<&Body> {
        self.bodies.values().map(|wrapper| &wrapper.body).collect()
    }

    /// Gets the parent and satellites of a body.
    pub fn get_body_relation(&self, index: Id) -> Option<&BodyRelation> {
        self.bodies.get(&index).map(|wrapper| &wrapper.relations)
    }

    /// Gets a mutable reference to a body in the universe.
    pub fn get_body_mut(&mut self, index: Id) -> Option<&mut Body> {
        self.bodies.get_mut(&index).map(|wrapper| &mut wrapper.body)
    }

    /// Gets an immutable reference to a body in the universe.
    pub fn get_body(&self, index: Id) -> Option<&Body> {
        self.bodies.get(&index).map(|wrapper| &wrapper.body)
    }

    /// Gets the index of a body with a given name.
    pub fn get_body_index_with_name(&self, name: &str) -> Option<Id> {
        self.bodies
            .iter()
            .find(|(_, w)| w.body.name == name)
            .map(|(id, _)| *id)
    }

    fn get_wrapper(&self, index: Id) -> Result<&BodyWrapper, UniverseError> {
        self.bodies
            .get(&index)
            .ok_or(UniverseError::BodyNotFound(index))
    }

    /// Gets the orbit of a body around its parent at a given time.
    ///
    /// # Errors
    /// - [`UniverseError::BodyNotFound`] if there's no such body.
    /// - [`UniverseError::NotOrbiting`] if the body has no parent or no
    ///   orbital elements.
    /// - [`UniverseError::Orbit`] if the elements don't form a valid orbit.
    pub fn get_body_orbit_at_time(&self, index: Id, time: f64) -> Result<Orbit, UniverseError> {
        let wrapper = self.get_wrapper(index)?;

        let parent = wrapper
            .relations
            .parent
            .ok_or(UniverseError::NotOrbiting(index))?;
        let elements = wrapper
            .body
            .orbit
            .as_ref()
            .ok_or(UniverseError::NotOrbiting(index))?;

        let parent = &self.get_wrapper(parent)?.body;
        Ok(elements.orbit_at(parent, time)?)
    }

    /// Gets the position and velocity of a body relative to its parent.
    ///
    /// Bodies that aren't orbiting anything are at rest at the origin.
    pub fn get_body_relative_state_vectors(
        &self,
        index: Id,
        time: f64,
    ) -> Result<StateVectors, UniverseError> {
        match self.get_body_orbit_at_time(index, time) {
            Ok(orbit) => Ok(orbit.get_state_vectors()),
            Err(UniverseError::NotOrbiting(_)) => Ok(StateVectors {
                position: DVec3::ZERO,
                velocity: DVec3::ZERO,
            }),
            Err(error) => Err(error),
        }
    }

    /// Gets the absolute position and velocity of a body at a given time.
    ///
    /// Each coordinate is in meters or meters per second.
    /// The top ancestor of the body (i.e, the body with no parent) is at
    /// rest at the origin.
    pub fn get_body_state_vectors(
        &self,
        index: Id,
        time: f64,
    ) -> Result<StateVectors, UniverseError> {
        let mut state = self.get_body_relative_state_vectors(index, time)?;

        if let Some(parent) = self.get_wrapper(index)?.relations.parent {
            let parent_state = self.get_body_state_vectors(parent, time)?;
            state.position += parent_state.position;
            state.velocity += parent_state.velocity;
        }

        Ok(state)
    }

    /// Gets the absolute position of a body at a given time, in meters.
    pub fn get_body_position(&self, index: Id, time: f64) -> Result<DVec3, UniverseError> {
        Ok(self.get_body_state_vectors(index, time)?.position)
    }

    /// Gets the absolute velocity of a body at a given time, in meters
    /// per second.
    pub fn get_body_velocity(&self, index: Id, time: f64) -> Result<DVec3, UniverseError> {
        Ok(self.get_body_state_vectors(index, time)?.velocity)
    }

    /// Gets the radius of the sphere of influence of a body at a given
    /// time, in meters.
    ///
    /// A body that isn't orbiting anything has an infinite sphere of
    /// influence.
    pub fn get_body_soi_radius(&self, index: Id, time: f64) -> Result<f64, UniverseError> {
        match self.get_body_orbit_at_time(index, time) {
            Ok(orbit) => Ok(orbit.get_soi_radius(self.get_wrapper(index)?.body.mu)),
            Err(UniverseError::NotOrbiting(_)) => Ok(f64::INFINITY),
            Err(error) => Err(error),
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Universe with {} bodies", self.bodies.len())
    }
}
