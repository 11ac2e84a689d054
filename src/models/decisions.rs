use serde::{Deserialize, Serialize};
use crate::models::domain::{Shelter, SkillTag, Task, TaskStatus};

/// Shelter chosen for a coordinate, with its rounded distance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShelterMatch {
    pub shelter: Shelter,
    /// Great-circle distance in kilometers, rounded to one decimal place
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

/// Outcome of nearest-shelter selection
///
/// `NoShelterAvailable` is an expected result, not a fault: every shelter
/// is full or the collection was empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ShelterDecision {
    Matched(ShelterMatch),
    NoShelterAvailable,
}

impl ShelterDecision {
    pub fn matched(&self) -> Option<&ShelterMatch> {
        match self {
            Self::Matched(m) => Some(m),
            Self::NoShelterAvailable => None,
        }
    }

    pub fn into_matched(self) -> Option<ShelterMatch> {
        match self {
            Self::Matched(m) => Some(m),
            Self::NoShelterAvailable => None,
        }
    }
}

/// Volunteer picked for a task by skill overlap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignment {
    #[serde(rename = "taskId")]
    pub task_id: String,
    #[serde(rename = "volunteerId")]
    pub volunteer_id: String,
    #[serde(rename = "volunteerName")]
    pub volunteer_name: String,
    /// Number of required skills the volunteer holds
    pub score: usize,
    /// The required skills the volunteer holds, in tag order
    #[serde(rename = "matchedSkills", default)]
    pub matched_skills: Vec<SkillTag>,
}

impl TaskAssignment {
    /// Write this decision onto the task it was computed for.
    ///
    /// Callers invoke this after accepting the decision; the matcher itself
    /// never mutates tasks.
    pub fn apply_to(&self, task: &mut Task) {
        task.assigned_volunteer_id = Some(self.volunteer_id.clone());
        task.assigned_volunteer_name = Some(self.volunteer_name.clone());
        task.status = TaskStatus::Assigned;
        task.ai_assigned = true;
        task.updated_at = chrono::Utc::now();
    }
}

/// Outcome of automatic task assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignmentDecision {
    Assigned(TaskAssignment),
    /// No volunteer is available with a completed profile, or none holds a required skill
    NoEligibleVolunteer,
}

impl AssignmentDecision {
    pub fn assigned(&self) -> Option<&TaskAssignment> {
        match self {
            Self::Assigned(a) => Some(a),
            Self::NoEligibleVolunteer => None,
        }
    }
}
