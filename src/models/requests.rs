use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{Availability, Coordinate, Gender, ResourceType, SkillSet, TaskPriority};

fn validate_coordinate(location: &Coordinate) -> Result<(), ValidationError> {
    if location.is_valid() {
        Ok(())
    } else {
        let mut err = ValidationError::new("coordinate_range");
        err.message = Some("latitude must be in [-90, 90] and longitude in [-180, 180]".into());
        Err(err)
    }
}

/// Shelter registration by a coordinator
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewShelter {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[validate(custom(function = "validate_coordinate"))]
    pub location: Coordinate,
    pub total_capacity: u32,
    #[serde(default)]
    pub current_occupancy: u32,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub manager_name: String,
    #[serde(default)]
    pub manager_contact: String,
    #[serde(default)]
    pub coordinator_id: String,
}

/// Coordinator edit of an existing shelter. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShelterUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    #[validate(custom(function = "validate_coordinate"))]
    pub location: Option<Coordinate>,
    pub total_capacity: Option<u32>,
    pub current_occupancy: Option<u32>,
    pub contact_number: Option<String>,
    pub manager_name: Option<String>,
    pub manager_contact: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewVictim {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(max = 130))]
    pub age: u8,
    pub gender: Gender,
    #[serde(default)]
    pub medical_condition: Option<String>,
    #[validate(custom(function = "validate_coordinate"))]
    pub location: Coordinate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewVolunteer {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub skills: SkillSet,
    pub availability: Availability,
    #[validate(custom(function = "validate_coordinate"))]
    pub location: Coordinate,
    #[serde(default)]
    pub profile_completed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerUpdate {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub contact_number: Option<String>,
    pub city: Option<String>,
    pub skills: Option<SkillSet>,
    pub availability: Option<Availability>,
    #[validate(custom(function = "validate_coordinate"))]
    pub location: Option<Coordinate>,
    pub profile_completed: Option<bool>,
}

impl From<NewVolunteer> for VolunteerUpdate {
    fn from(profile: NewVolunteer) -> Self {
        Self {
            name: Some(profile.name),
            contact_number: Some(profile.contact_number),
            city: Some(profile.city),
            skills: Some(profile.skills),
            availability: Some(profile.availability),
            location: Some(profile.location),
            profile_completed: Some(profile.profile_completed),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: TaskPriority,
    #[validate(length(min = 1))]
    pub shelter_id: String,
    #[serde(default)]
    pub required_skills: SkillSet,
}

/// Manual assignment of a task to a named volunteer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignTaskRequest {
    #[validate(length(min = 1))]
    pub volunteer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewResource {
    #[validate(length(min = 1))]
    pub shelter_id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub quantity_available: u32,
    #[serde(default)]
    pub quantity_needed: u32,
    #[validate(length(min = 1))]
    pub unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdate {
    pub quantity_available: Option<u32>,
    pub quantity_needed: Option<u32>,
    #[validate(length(min = 1))]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewDonation {
    #[validate(length(min = 1))]
    pub shelter_id: String,
    pub resource_type: ResourceType,
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[serde(default)]
    pub donor_name: Option<String>,
    #[serde(default)]
    pub donor_contact: Option<String>,
}

/// Query string for the nearest-shelter preview
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearestShelterQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl NearestShelterQuery {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
