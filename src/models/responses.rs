use serde::{Deserialize, Serialize};
use crate::models::decisions::{ShelterDecision, ShelterMatch};
use crate::models::domain::{Shelter, Victim};

/// Result of registering a victim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VictimRegistration {
    pub victim: Victim,
    /// Assigned shelter as it stood after the occupancy increment
    pub shelter: Option<Shelter>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

/// Response for the nearest-shelter preview endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestShelterResponse {
    pub found: bool,
    pub shelter: Option<Shelter>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

impl From<ShelterDecision> for NearestShelterResponse {
    fn from(decision: ShelterDecision) -> Self {
        match decision.into_matched() {
            Some(ShelterMatch { shelter, distance_km }) => Self {
                found: true,
                shelter: Some(shelter),
                distance_km: Some(distance_km),
            },
            None => Self {
                found: false,
                shelter: None,
                distance_km: None,
            },
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
