// Model exports
pub mod decisions;
pub mod domain;
pub mod requests;
pub mod responses;

pub use decisions::{AssignmentDecision, ShelterDecision, ShelterMatch, TaskAssignment};
pub use domain::{
    Availability, Coordinate, Donation, Gender, Resource, ResourceType, Shelter, SkillSet, SkillTag,
    Task, TaskAction, TaskPriority, TaskStatus, Victim, Volunteer,
};
pub use requests::{
    AssignTaskRequest, NearestShelterQuery, NewDonation, NewResource, NewShelter, NewTask, NewVictim,
    NewVolunteer, ResourceUpdate, ShelterUpdate, VolunteerUpdate,
};
pub use responses::{
    ErrorResponse, HealthResponse, NearestShelterResponse, VictimRegistration,
};
