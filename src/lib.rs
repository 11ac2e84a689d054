//! Relief Alloc - allocation core for flood-relief coordination
//!
//! Two pure matchers sit at the center of this crate: nearest-available
//! shelter selection for registering displaced people, and skill-overlap
//! assignment of volunteers to tasks. Both work over plain slices and return
//! decisions; applying those decisions is left to a [`services::Registry`].

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{find_nearest_available, haversine_distance, select_assignee};
pub use crate::models::{AssignmentDecision, Coordinate, Shelter, ShelterDecision, ShelterMatch, Task, TaskAssignment, Volunteer};
pub use crate::services::{InMemoryRegistry, Registry, RegistryError};
