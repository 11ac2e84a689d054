use crate::models::{
    AssignmentDecision, Coordinate, Donation, NewDonation, NewResource, NewShelter, NewTask, NewVictim,
    NewVolunteer, Resource, ResourceUpdate, Shelter, ShelterDecision, ShelterUpdate, Task, TaskAction,
    TaskStatus, Victim, VictimRegistration, Volunteer, VolunteerUpdate,
};
use thiserror::Error;

/// Errors that can occur when reading or mutating the registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Cannot {action} a task in status {from}")]
    InvalidTransition { from: TaskStatus, action: TaskAction },

    #[error("Task {id} is {status} and cannot be assigned")]
    NotAssignable { id: String, status: TaskStatus },

    #[error("User {user_id} already has a volunteer profile")]
    DuplicateProfile { user_id: String },

    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl RegistryError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound { kind, id: id.to_string() }
    }
}

impl From<validator::ValidationErrors> for RegistryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Store of shelters, victims, volunteers, tasks, resources and donations
///
/// Reads return owned snapshots; the allocation core only ever sees those.
///
/// `register_victim` and `auto_assign_task` read a snapshot, run a matcher
/// and write the outcome back. Implementations must serialize each of these
/// sequences against other writers, otherwise two concurrent registrations
/// can both take the last place in a shelter. The same holds for the
/// one-profile-per-user check in `add_volunteer` and `save_volunteer_profile`.
pub trait Registry: Send + Sync {
    // Shelters
    fn shelters(&self) -> Vec<Shelter>;
    fn shelter(&self, id: &str) -> RegistryResult<Shelter>;
    fn add_shelter(&self, new: NewShelter) -> RegistryResult<Shelter>;
    fn update_shelter(&self, id: &str, update: ShelterUpdate) -> RegistryResult<Shelter>;
    /// Read-only preview of the shelter a victim at `location` would get
    fn nearest_available_shelter(&self, location: &Coordinate) -> RegistryResult<ShelterDecision>;

    // Victims
    fn victims(&self) -> Vec<Victim>;
    fn register_victim(&self, new: NewVictim) -> RegistryResult<VictimRegistration>;

    // Volunteers
    fn volunteers(&self) -> Vec<Volunteer>;
    fn volunteer(&self, id: &str) -> RegistryResult<Volunteer>;
    fn volunteer_by_user_id(&self, user_id: &str) -> Option<Volunteer>;
    /// Create a profile; fails with `DuplicateProfile` if the user already has one
    fn add_volunteer(&self, new: NewVolunteer) -> RegistryResult<Volunteer>;
    /// Create the user's profile, or overwrite the existing one, as one write.
    /// The flag is `true` when a new profile was created.
    fn save_volunteer_profile(&self, new: NewVolunteer) -> RegistryResult<(Volunteer, bool)>;
    fn update_volunteer(&self, id: &str, update: VolunteerUpdate) -> RegistryResult<Volunteer>;

    // Tasks
    fn tasks(&self) -> Vec<Task>;
    fn task(&self, id: &str) -> RegistryResult<Task>;
    fn tasks_by_volunteer(&self, volunteer_id: &str) -> Vec<Task>;
    fn tasks_by_shelter(&self, shelter_id: &str) -> Vec<Task>;
    fn add_task(&self, new: NewTask) -> RegistryResult<Task>;
    /// Run the task matcher and apply its decision to a `created` task
    fn auto_assign_task(&self, id: &str) -> RegistryResult<AssignmentDecision>;
    /// Coordinator assignment of a specific volunteer
    fn assign_task(&self, id: &str, volunteer_id: &str) -> RegistryResult<Task>;
    fn transition_task(&self, id: &str, action: TaskAction) -> RegistryResult<Task>;

    // Resources and donations
    fn resources_by_shelter(&self, shelter_id: &str) -> Vec<Resource>;
    fn add_resource(&self, new: NewResource) -> RegistryResult<Resource>;
    fn update_resource(&self, id: &str, update: ResourceUpdate) -> RegistryResult<Resource>;
    fn donations(&self) -> Vec<Donation>;
    /// Record a donation and credit it to the matching resource, if one exists
    fn add_donation(&self, new: NewDonation) -> RegistryResult<Donation>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RegistryError::not_found("shelter", "42");
        assert_eq!(err.to_string(), "shelter not found: 42");

        let err = RegistryError::InvalidTransition {
            from: TaskStatus::Created,
            action: TaskAction::Complete,
        };
        assert_eq!(err.to_string(), "Cannot complete a task in status created");

        let err = RegistryError::DuplicateProfile { user_id: "u1".to_string() };
        assert_eq!(err.to_string(), "User u1 already has a volunteer profile");
    }
}
