use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Capability label shared by volunteers and task requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTag {
    FirstAid,
    Driving,
    Cooking,
    Rescue,
    Logistics,
    Medical,
    Counseling,
    Communication,
    Construction,
}

pub type SkillSet = BTreeSet<SkillTag>;

/// Relief shelter with a fixed headcount capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shelter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    pub location: Coordinate,
    #[serde(rename = "totalCapacity")]
    pub total_capacity: u32,
    #[serde(rename = "currentOccupancy", default)]
    pub current_occupancy: u32,
    #[serde(rename = "contactNumber", default)]
    pub contact_number: String,
    #[serde(rename = "managerName", default)]
    pub manager_name: String,
    #[serde(rename = "managerContact", default)]
    pub manager_contact: String,
    #[serde(rename = "coordinatorId", default)]
    pub coordinator_id: String,
    #[serde(rename = "createdAt", default = "chrono::Utc::now")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Shelter {
    /// Beds left before the shelter counts as full. Over-capacity reads as zero.
    pub fn spare_capacity(&self) -> u32 {
        self.total_capacity.saturating_sub(self.current_occupancy)
    }

    pub fn is_available(&self) -> bool {
        self.spare_capacity() > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Displaced person registered with the relief effort
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Victim {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "medicalCondition", default)]
    pub medical_condition: Option<String>,
    pub location: Coordinate,
    #[serde(rename = "assignedShelterId", default)]
    pub assigned_shelter_id: Option<String>,
    #[serde(rename = "createdAt", default = "chrono::Utc::now")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "contactNumber", default)]
    pub contact_number: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub skills: SkillSet,
    pub availability: Availability,
    pub location: Coordinate,
    #[serde(rename = "profileCompleted", default)]
    pub profile_completed: bool,
    #[serde(rename = "createdAt", default = "chrono::Utc::now")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Created,
    Assigned,
    Accepted,
    Completed,
    Declined,
}

impl TaskStatus {
    /// Statuses in which a task must name its volunteer
    pub fn holds_assignee(self) -> bool {
        matches!(self, Self::Assigned | Self::Accepted | Self::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Assigned => "assigned",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Declined => "declined",
        };
        f.write_str(s)
    }
}

/// Volunteer response to an assigned task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskAction {
    Accept,
    Decline,
    Complete,
}

impl TaskAction {
    /// Target status for this action, if it is legal from `from`
    pub fn next_status(self, from: TaskStatus) -> Option<TaskStatus> {
        match (self, from) {
            (Self::Accept, TaskStatus::Assigned) => Some(TaskStatus::Accepted),
            (Self::Decline, TaskStatus::Assigned) => Some(TaskStatus::Declined),
            (Self::Complete, TaskStatus::Accepted) => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
            Self::Complete => "complete",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(rename = "shelterId")]
    pub shelter_id: String,
    #[serde(rename = "shelterName", default)]
    pub shelter_name: String,
    #[serde(rename = "assignedVolunteerId", default)]
    pub assigned_volunteer_id: Option<String>,
    /// Snapshot of the volunteer's name taken at assignment time
    #[serde(rename = "assignedVolunteerName", default)]
    pub assigned_volunteer_name: Option<String>,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: SkillSet,
    #[serde(rename = "aiAssigned", default)]
    pub ai_assigned: bool,
    #[serde(rename = "createdAt", default = "chrono::Utc::now")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "updatedAt", default = "chrono::Utc::now")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Task {
    /// Verify that the assignee fields agree with the status
    pub fn check_invariant(&self) -> Result<(), String> {
        let has_id = self.assigned_volunteer_id.is_some();
        if has_id != self.status.holds_assignee() {
            return Err(format!(
                "task {} has status {} but assignedVolunteerId is {}",
                self.id,
                self.status,
                if has_id { "set" } else { "absent" }
            ));
        }
        if has_id != self.assigned_volunteer_name.is_some() {
            return Err(format!(
                "task {} has mismatched assignedVolunteerId and assignedVolunteerName",
                self.id
            ));
        }
        Ok(())
    }

    pub fn clear_assignee(&mut self) {
        self.assigned_volunteer_id = None;
        self.assigned_volunteer_name = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Food,
    Water,
    Medicine,
    Clothes,
    Blankets,
    Other,
}

/// Stock of one supply type held at a shelter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "shelterId")]
    pub shelter_id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(rename = "quantityAvailable")]
    pub quantity_available: u32,
    #[serde(rename = "quantityNeeded")]
    pub quantity_needed: u32,
    pub unit: String,
    #[serde(rename = "lastUpdated", default = "chrono::Utc::now")]
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

impl Resource {
    pub fn shortfall(&self) -> u32 {
        self.quantity_needed.saturating_sub(self.quantity_available)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    #[serde(rename = "shelterId")]
    pub shelter_id: String,
    #[serde(rename = "resourceType")]
    pub resource_type: ResourceType,
    pub quantity: u32,
    #[serde(rename = "donorName", default)]
    pub donor_name: Option<String>,
    #[serde(rename = "donorContact", default)]
    pub donor_contact: Option<String>,
    #[serde(rename = "createdAt", default = "chrono::Utc::now")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
