use crate::core::{find_nearest_available, select_assignee};
use crate::models::{
    AssignmentDecision, Coordinate, Donation, NewDonation, NewResource, NewShelter, NewTask, NewVictim,
    NewVolunteer, Resource, ResourceUpdate, Shelter, ShelterDecision, ShelterUpdate, Task, TaskAction,
    TaskStatus, Victim, VictimRegistration, Volunteer, VolunteerUpdate,
};
use crate::services::registry::{Registry, RegistryError, RegistryResult};
use crate::services::seed::SeedData;
use chrono::Utc;
use parking_lot::RwLock;
use validator::Validate;

#[derive(Debug, Default)]
struct RegistryState {
    shelters: Vec<Shelter>,
    victims: Vec<Victim>,
    volunteers: Vec<Volunteer>,
    tasks: Vec<Task>,
    resources: Vec<Resource>,
    donations: Vec<Donation>,
}

impl RegistryState {
    fn shelter_index(&self, id: &str) -> RegistryResult<usize> {
        self.shelters
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RegistryError::not_found("shelter", id))
    }

    fn volunteer_index(&self, id: &str) -> RegistryResult<usize> {
        self.volunteers
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| RegistryError::not_found("volunteer", id))
    }

    fn task_index(&self, id: &str) -> RegistryResult<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| RegistryError::not_found("task", id))
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn ensure_invariant(task: &Task) -> RegistryResult<()> {
    task.check_invariant().map_err(RegistryError::Invariant)
}

/// Write `next` over `slot` only if it keeps the assignee invariant
fn commit_task(slot: &mut Task, next: Task) -> RegistryResult<&Task> {
    ensure_invariant(&next)?;
    *slot = next;
    Ok(slot)
}

fn apply_volunteer_update(volunteer: &mut Volunteer, update: VolunteerUpdate) {
    // Tasks keep the name they snapshotted at assignment time.
    if let Some(name) = update.name {
        volunteer.name = name;
    }
    if let Some(contact) = update.contact_number {
        volunteer.contact_number = contact;
    }
    if let Some(city) = update.city {
        volunteer.city = city;
    }
    if let Some(skills) = update.skills {
        volunteer.skills = skills;
    }
    if let Some(availability) = update.availability {
        volunteer.availability = availability;
    }
    if let Some(location) = update.location {
        volunteer.location = location;
    }
    if let Some(completed) = update.profile_completed {
        volunteer.profile_completed = completed;
    }
}

fn volunteer_from(new: NewVolunteer) -> Volunteer {
    Volunteer {
        id: new_id(),
        user_id: new.user_id,
        name: new.name,
        contact_number: new.contact_number,
        city: new.city,
        skills: new.skills,
        availability: new.availability,
        location: new.location,
        profile_completed: new.profile_completed,
        created_at: Utc::now(),
    }
}

/// Reference registry keeping every collection in memory
///
/// A single lock guards all collections, so every write (including the
/// read-decide-write of victim registration and auto-assignment) runs
/// alone. Collections keep insertion order.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: RwLock<RegistryState>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated from a seed fixture
    ///
    /// Rejects seeds whose tasks break the assignee/status invariant or
    /// whose coordinates are out of range.
    pub fn from_seed(seed: SeedData) -> RegistryResult<Self> {
        for task in &seed.tasks {
            ensure_invariant(task)?;
        }
        for (i, volunteer) in seed.volunteers.iter().enumerate() {
            if seed.volunteers[..i].iter().any(|v| v.user_id == volunteer.user_id) {
                return Err(RegistryError::DuplicateProfile { user_id: volunteer.user_id.clone() });
            }
        }
        let locations = seed
            .shelters
            .iter()
            .map(|s| (&s.id, &s.location))
            .chain(seed.volunteers.iter().map(|v| (&v.id, &v.location)))
            .chain(seed.victims.iter().map(|v| (&v.id, &v.location)));
        for (id, location) in locations {
            if !location.is_valid() {
                return Err(RegistryError::Validation(format!(
                    "seed entry {} has an out-of-range location",
                    id
                )));
            }
        }

        tracing::info!(
            "Seeded registry: {} shelters, {} volunteers, {} tasks, {} resources",
            seed.shelters.len(),
            seed.volunteers.len(),
            seed.tasks.len(),
            seed.resources.len()
        );

        Ok(Self {
            state: RwLock::new(RegistryState {
                shelters: seed.shelters,
                victims: seed.victims,
                volunteers: seed.volunteers,
                tasks: seed.tasks,
                resources: seed.resources,
                donations: seed.donations,
            }),
        })
    }
}

impl Registry for InMemoryRegistry {
    fn shelters(&self) -> Vec<Shelter> {
        self.state.read().shelters.clone()
    }

    fn shelter(&self, id: &str) -> RegistryResult<Shelter> {
        let state = self.state.read();
        let idx = state.shelter_index(id)?;
        Ok(state.shelters[idx].clone())
    }

    fn add_shelter(&self, new: NewShelter) -> RegistryResult<Shelter> {
        new.validate()?;

        let shelter = Shelter {
            id: new_id(),
            name: new.name,
            address: new.address,
            city: new.city,
            state: new.state,
            pincode: new.pincode,
            location: new.location,
            total_capacity: new.total_capacity,
            current_occupancy: new.current_occupancy,
            contact_number: new.contact_number,
            manager_name: new.manager_name,
            manager_contact: new.manager_contact,
            coordinator_id: new.coordinator_id,
            created_at: Utc::now(),
        };

        self.state.write().shelters.push(shelter.clone());
        tracing::info!("Added shelter {} ({}) with capacity {}", shelter.id, shelter.name, shelter.total_capacity);
        Ok(shelter)
    }

    fn update_shelter(&self, id: &str, update: ShelterUpdate) -> RegistryResult<Shelter> {
        update.validate()?;

        let mut state = self.state.write();
        let idx = state.shelter_index(id)?;
        let shelter = &mut state.shelters[idx];

        if let Some(name) = update.name {
            shelter.name = name;
        }
        if let Some(address) = update.address {
            shelter.address = address;
        }
        if let Some(city) = update.city {
            shelter.city = city;
        }
        if let Some(st) = update.state {
            shelter.state = st;
        }
        if let Some(pincode) = update.pincode {
            shelter.pincode = pincode;
        }
        if let Some(location) = update.location {
            shelter.location = location;
        }
        if let Some(total) = update.total_capacity {
            shelter.total_capacity = total;
        }
        if let Some(occupancy) = update.current_occupancy {
            shelter.current_occupancy = occupancy;
        }
        if let Some(contact) = update.contact_number {
            shelter.contact_number = contact;
        }
        if let Some(manager) = update.manager_name {
            shelter.manager_name = manager;
        }
        if let Some(contact) = update.manager_contact {
            shelter.manager_contact = contact;
        }

        tracing::debug!(
            "Updated shelter {}: occupancy {}/{}",
            shelter.id,
            shelter.current_occupancy,
            shelter.total_capacity
        );
        Ok(shelter.clone())
    }

    fn nearest_available_shelter(&self, location: &Coordinate) -> RegistryResult<ShelterDecision> {
        if !location.is_valid() {
            return Err(RegistryError::Validation(format!(
                "coordinate ({}, {}) is out of range",
                location.latitude, location.longitude
            )));
        }
        let state = self.state.read();
        Ok(find_nearest_available(location, &state.shelters))
    }

    fn victims(&self) -> Vec<Victim> {
        self.state.read().victims.clone()
    }

    fn register_victim(&self, new: NewVictim) -> RegistryResult<VictimRegistration> {
        new.validate()?;

        // Held across match and increment so no other registration can
        // observe the pre-increment occupancy.
        let mut guard = self.state.write();
        let state = &mut *guard;

        let decision = find_nearest_available(&new.location, &state.shelters);
        tracing::debug!("Matched {} shelters for victim location {:?}", state.shelters.len(), new.location);

        let (shelter, distance_km) = match decision.into_matched() {
            Some(matched) => {
                let idx = state.shelter_index(&matched.shelter.id)?;
                let shelter = &mut state.shelters[idx];
                shelter.current_occupancy = shelter.current_occupancy.saturating_add(1);
                tracing::info!(
                    "Assigned victim {} to shelter {} ({} km, {} places left)",
                    new.name,
                    shelter.id,
                    matched.distance_km,
                    shelter.spare_capacity()
                );
                (Some(shelter.clone()), Some(matched.distance_km))
            }
            None => {
                tracing::warn!("No shelter with spare capacity for victim {}", new.name);
                (None, None)
            }
        };

        let victim = Victim {
            id: new_id(),
            user_id: new.user_id,
            name: new.name,
            age: new.age,
            gender: new.gender,
            medical_condition: new.medical_condition,
            location: new.location,
            assigned_shelter_id: shelter.as_ref().map(|s| s.id.clone()),
            created_at: Utc::now(),
        };
        state.victims.push(victim.clone());

        Ok(VictimRegistration {
            victim,
            shelter,
            distance_km,
        })
    }

    fn volunteers(&self) -> Vec<Volunteer> {
        self.state.read().volunteers.clone()
    }

    fn volunteer(&self, id: &str) -> RegistryResult<Volunteer> {
        let state = self.state.read();
        let idx = state.volunteer_index(id)?;
        Ok(state.volunteers[idx].clone())
    }

    fn volunteer_by_user_id(&self, user_id: &str) -> Option<Volunteer> {
        self.state
            .read()
            .volunteers
            .iter()
            .find(|v| v.user_id == user_id)
            .cloned()
    }

    fn add_volunteer(&self, new: NewVolunteer) -> RegistryResult<Volunteer> {
        new.validate()?;

        let mut state = self.state.write();
        if state.volunteers.iter().any(|v| v.user_id == new.user_id) {
            return Err(RegistryError::DuplicateProfile { user_id: new.user_id });
        }

        let volunteer = volunteer_from(new);
        state.volunteers.push(volunteer.clone());
        tracing::info!("Added volunteer {} with {} skills", volunteer.id, volunteer.skills.len());
        Ok(volunteer)
    }

    fn save_volunteer_profile(&self, new: NewVolunteer) -> RegistryResult<(Volunteer, bool)> {
        new.validate()?;

        let mut state = self.state.write();
        match state.volunteers.iter().position(|v| v.user_id == new.user_id) {
            Some(idx) => {
                let existing = &mut state.volunteers[idx];
                tracing::debug!("User {} already has volunteer profile {}", new.user_id, existing.id);
                apply_volunteer_update(existing, new.into());
                Ok((existing.clone(), false))
            }
            None => {
                let volunteer = volunteer_from(new);
                state.volunteers.push(volunteer.clone());
                tracing::info!("Added volunteer {} with {} skills", volunteer.id, volunteer.skills.len());
                Ok((volunteer, true))
            }
        }
    }

    fn update_volunteer(&self, id: &str, update: VolunteerUpdate) -> RegistryResult<Volunteer> {
        update.validate()?;

        let mut state = self.state.write();
        let idx = state.volunteer_index(id)?;
        let volunteer = &mut state.volunteers[idx];
        apply_volunteer_update(volunteer, update);

        Ok(volunteer.clone())
    }

    fn tasks(&self) -> Vec<Task> {
        self.state.read().tasks.clone()
    }

    fn task(&self, id: &str) -> RegistryResult<Task> {
        let state = self.state.read();
        let idx = state.task_index(id)?;
        Ok(state.tasks[idx].clone())
    }

    fn tasks_by_volunteer(&self, volunteer_id: &str) -> Vec<Task> {
        self.state
            .read()
            .tasks
            .iter()
            .filter(|t| t.assigned_volunteer_id.as_deref() == Some(volunteer_id))
            .cloned()
            .collect()
    }

    fn tasks_by_shelter(&self, shelter_id: &str) -> Vec<Task> {
        self.state
            .read()
            .tasks
            .iter()
            .filter(|t| t.shelter_id == shelter_id)
            .cloned()
            .collect()
    }

    fn add_task(&self, new: NewTask) -> RegistryResult<Task> {
        new.validate()?;

        let mut state = self.state.write();
        let shelter_idx = state.shelter_index(&new.shelter_id)?;
        let now = Utc::now();

        let task = Task {
            id: new_id(),
            title: new.title,
            description: new.description,
            priority: new.priority,
            status: TaskStatus::Created,
            shelter_id: new.shelter_id,
            shelter_name: state.shelters[shelter_idx].name.clone(),
            assigned_volunteer_id: None,
            assigned_volunteer_name: None,
            required_skills: new.required_skills,
            ai_assigned: false,
            created_at: now,
            updated_at: now,
        };

        state.tasks.push(task.clone());
        tracing::info!("Created task {} at shelter {}", task.id, task.shelter_id);
        Ok(task)
    }

    fn auto_assign_task(&self, id: &str) -> RegistryResult<AssignmentDecision> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let idx = state.task_index(id)?;

        let status = state.tasks[idx].status;
        if status != TaskStatus::Created {
            return Err(RegistryError::NotAssignable { id: id.to_string(), status });
        }

        let decision = select_assignee(&state.tasks[idx], &state.volunteers);
        match &decision {
            AssignmentDecision::Assigned(assignment) => {
                let mut next = state.tasks[idx].clone();
                assignment.apply_to(&mut next);
                let task = commit_task(&mut state.tasks[idx], next)?;
                tracing::info!(
                    "Auto-assigned task {} to volunteer {} (score {}, skills {:?})",
                    task.id,
                    assignment.volunteer_id,
                    assignment.score,
                    assignment.matched_skills
                );
            }
            AssignmentDecision::NoEligibleVolunteer => {
                tracing::info!("No eligible volunteer for task {}; left in created status", id);
            }
        }

        Ok(decision)
    }

    fn assign_task(&self, id: &str, volunteer_id: &str) -> RegistryResult<Task> {
        let mut guard = self.state.write();
        let state = &mut *guard;
        let task_idx = state.task_index(id)?;
        let volunteer_idx = state.volunteer_index(volunteer_id)?;

        let mut next = state.tasks[task_idx].clone();
        if !matches!(next.status, TaskStatus::Created | TaskStatus::Declined) {
            return Err(RegistryError::NotAssignable { id: id.to_string(), status: next.status });
        }

        let volunteer = &state.volunteers[volunteer_idx];
        next.assigned_volunteer_id = Some(volunteer.id.clone());
        next.assigned_volunteer_name = Some(volunteer.name.clone());
        next.status = TaskStatus::Assigned;
        next.ai_assigned = false;
        next.updated_at = Utc::now();

        let task = commit_task(&mut state.tasks[task_idx], next)?;
        tracing::info!("Manually assigned task {} to volunteer {}", task.id, volunteer_id);
        Ok(task.clone())
    }

    fn transition_task(&self, id: &str, action: TaskAction) -> RegistryResult<Task> {
        let mut state = self.state.write();
        let idx = state.task_index(id)?;
        let mut next = state.tasks[idx].clone();

        let status = action
            .next_status(next.status)
            .ok_or(RegistryError::InvalidTransition { from: next.status, action })?;

        next.status = status;
        if status == TaskStatus::Declined {
            next.clear_assignee();
        }
        next.updated_at = Utc::now();

        let task = commit_task(&mut state.tasks[idx], next)?;
        tracing::info!("Task {} is now {}", task.id, task.status);
        Ok(task.clone())
    }

    fn resources_by_shelter(&self, shelter_id: &str) -> Vec<Resource> {
        self.state
            .read()
            .resources
            .iter()
            .filter(|r| r.shelter_id == shelter_id)
            .cloned()
            .collect()
    }

    fn add_resource(&self, new: NewResource) -> RegistryResult<Resource> {
        new.validate()?;

        let mut state = self.state.write();
        state.shelter_index(&new.shelter_id)?;

        let resource = Resource {
            id: new_id(),
            shelter_id: new.shelter_id,
            resource_type: new.resource_type,
            quantity_available: new.quantity_available,
            quantity_needed: new.quantity_needed,
            unit: new.unit,
            last_updated: Utc::now(),
        };

        state.resources.push(resource.clone());
        Ok(resource)
    }

    fn update_resource(&self, id: &str, update: ResourceUpdate) -> RegistryResult<Resource> {
        update.validate()?;

        let mut state = self.state.write();
        let resource = state
            .resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RegistryError::not_found("resource", id))?;

        if let Some(available) = update.quantity_available {
            resource.quantity_available = available;
        }
        if let Some(needed) = update.quantity_needed {
            resource.quantity_needed = needed;
        }
        if let Some(unit) = update.unit {
            resource.unit = unit;
        }
        resource.last_updated = Utc::now();

        Ok(resource.clone())
    }

    fn donations(&self) -> Vec<Donation> {
        self.state.read().donations.clone()
    }

    fn add_donation(&self, new: NewDonation) -> RegistryResult<Donation> {
        new.validate()?;

        let mut state = self.state.write();
        state.shelter_index(&new.shelter_id)?;

        let donation = Donation {
            id: new_id(),
            shelter_id: new.shelter_id,
            resource_type: new.resource_type,
            quantity: new.quantity,
            donor_name: new.donor_name,
            donor_contact: new.donor_contact,
            created_at: Utc::now(),
        };

        let credited = state
            .resources
            .iter_mut()
            .find(|r| r.shelter_id == donation.shelter_id && r.resource_type == donation.resource_type);
        match credited {
            Some(resource) => {
                resource.quantity_available = resource.quantity_available.saturating_add(donation.quantity);
                resource.last_updated = Utc::now();
                tracing::info!(
                    "Donation {} credited {} {} to resource {} (shortfall now {})",
                    donation.id,
                    donation.quantity,
                    resource.unit,
                    resource.id,
                    resource.shortfall()
                );
            }
            None => {
                tracing::debug!("Donation {} has no matching resource at shelter {}", donation.id, donation.shelter_id);
            }
        }

        state.donations.push(donation.clone());
        Ok(donation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Availability, Gender, ResourceType, SkillSet, SkillTag, TaskPriority};

    fn new_shelter(name: &str, lat: f64, lon: f64, total: u32, occupied: u32) -> NewShelter {
        NewShelter {
            name: name.to_string(),
            address: String::new(),
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            pincode: String::new(),
            location: Coordinate::new(lat, lon),
            total_capacity: total,
            current_occupancy: occupied,
            contact_number: String::new(),
            manager_name: String::new(),
            manager_contact: String::new(),
            coordinator_id: "coord".to_string(),
        }
    }

    fn new_victim(name: &str, lat: f64, lon: f64) -> NewVictim {
        NewVictim {
            user_id: format!("user-{}", name),
            name: name.to_string(),
            age: 40,
            gender: Gender::Other,
            medical_condition: None,
            location: Coordinate::new(lat, lon),
        }
    }

    fn new_volunteer(name: &str, skills: &[SkillTag]) -> NewVolunteer {
        NewVolunteer {
            user_id: format!("user-{}", name),
            name: name.to_string(),
            contact_number: String::new(),
            city: "Mumbai".to_string(),
            skills: skills.iter().copied().collect(),
            availability: Availability::Available,
            location: Coordinate::new(19.07, 72.88),
            profile_completed: true,
        }
    }

    fn new_task(shelter_id: &str, skills: &[SkillTag]) -> NewTask {
        NewTask {
            title: "Kitchen shift".to_string(),
            description: String::new(),
            priority: TaskPriority::Medium,
            shelter_id: shelter_id.to_string(),
            required_skills: skills.iter().copied().collect::<SkillSet>(),
        }
    }

    #[test]
    fn test_registration_fills_last_place_once() {
        let registry = InMemoryRegistry::new();
        let shelter = registry.add_shelter(new_shelter("Tiny", 19.07, 72.87, 1, 0)).unwrap();

        let first = registry.register_victim(new_victim("a", 19.07, 72.87)).unwrap();
        assert_eq!(first.victim.assigned_shelter_id.as_deref(), Some(shelter.id.as_str()));
        assert_eq!(first.shelter.unwrap().current_occupancy, 1);

        let second = registry.register_victim(new_victim("b", 19.07, 72.87)).unwrap();
        assert!(second.victim.assigned_shelter_id.is_none());
        assert!(second.shelter.is_none());
        assert_eq!(registry.victims().len(), 2);
        assert_eq!(registry.shelter(&shelter.id).unwrap().current_occupancy, 1);
    }

    #[test]
    fn test_auto_assign_applies_decision() {
        let registry = InMemoryRegistry::new();
        let shelter = registry.add_shelter(new_shelter("Camp", 19.07, 72.87, 10, 0)).unwrap();
        let cook = registry.add_volunteer(new_volunteer("cook", &[SkillTag::Cooking])).unwrap();
        let task = registry.add_task(new_task(&shelter.id, &[SkillTag::Cooking])).unwrap();
        assert_eq!(task.shelter_name, "Camp");

        let decision = registry.auto_assign_task(&task.id).unwrap();
        assert_eq!(decision.assigned().unwrap().volunteer_id, cook.id);

        let stored = registry.task(&task.id).unwrap();
        assert_eq!(stored.status, TaskStatus::Assigned);
        assert!(stored.ai_assigned);
        assert_eq!(registry.tasks_by_volunteer(&cook.id).len(), 1);

        // Already assigned
        assert!(matches!(
            registry.auto_assign_task(&task.id),
            Err(RegistryError::NotAssignable { .. })
        ));
    }

    #[test]
    fn test_decline_clears_assignee_and_allows_reassignment() {
        let registry = InMemoryRegistry::new();
        let shelter = registry.add_shelter(new_shelter("Camp", 19.07, 72.87, 10, 0)).unwrap();
        let vol = registry.add_volunteer(new_volunteer("v", &[])).unwrap();
        let task = registry.add_task(new_task(&shelter.id, &[])).unwrap();

        let assigned = registry.assign_task(&task.id, &vol.id).unwrap();
        assert!(!assigned.ai_assigned);

        let declined = registry.transition_task(&task.id, TaskAction::Decline).unwrap();
        assert_eq!(declined.status, TaskStatus::Declined);
        assert!(declined.assigned_volunteer_id.is_none());
        assert!(declined.assigned_volunteer_name.is_none());

        assert!(registry.assign_task(&task.id, &vol.id).is_ok());
        assert!(registry.transition_task(&task.id, TaskAction::Accept).is_ok());
        assert!(registry.transition_task(&task.id, TaskAction::Complete).is_ok());
        assert!(matches!(
            registry.transition_task(&task.id, TaskAction::Accept),
            Err(RegistryError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_donation_credits_matching_resource() {
        let registry = InMemoryRegistry::new();
        let shelter = registry.add_shelter(new_shelter("Camp", 19.07, 72.87, 10, 0)).unwrap();
        let water = registry
            .add_resource(NewResource {
                shelter_id: shelter.id.clone(),
                resource_type: ResourceType::Water,
                quantity_available: 100,
                quantity_needed: 300,
                unit: "liters".to_string(),
            })
            .unwrap();

        registry
            .add_donation(NewDonation {
                shelter_id: shelter.id.clone(),
                resource_type: ResourceType::Water,
                quantity: 50,
                donor_name: Some("Anon".to_string()),
                donor_contact: None,
            })
            .unwrap();
        registry
            .add_donation(NewDonation {
                shelter_id: shelter.id.clone(),
                resource_type: ResourceType::Blankets,
                quantity: 5,
                donor_name: None,
                donor_contact: None,
            })
            .unwrap();

        let resources = registry.resources_by_shelter(&shelter.id);
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, water.id);
        assert_eq!(resources[0].quantity_available, 150);
        assert_eq!(resources[0].shortfall(), 150);
        assert_eq!(registry.donations().len(), 2);
    }

    #[test]
    fn test_unknown_shelter_rejected() {
        let registry = InMemoryRegistry::new();
        assert!(matches!(
            registry.add_task(new_task("missing", &[SkillTag::Rescue])),
            Err(RegistryError::NotFound { kind: "shelter", .. })
        ));
    }

    #[test]
    fn test_invalid_location_rejected() {
        let registry = InMemoryRegistry::new();
        assert!(matches!(
            registry.register_victim(new_victim("x", 91.0, 0.0)),
            Err(RegistryError::Validation(_))
        ));
        assert!(matches!(
            registry.nearest_available_shelter(&Coordinate::new(0.0, 200.0)),
            Err(RegistryError::Validation(_))
        ));
    }

    #[test]
    fn test_one_profile_per_user() {
        let registry = InMemoryRegistry::new();
        let first = registry.add_volunteer(new_volunteer("u1", &[SkillTag::Driving])).unwrap();

        assert!(matches!(
            registry.add_volunteer(new_volunteer("u1", &[SkillTag::Rescue])),
            Err(RegistryError::DuplicateProfile { .. })
        ));

        let (saved, created) = registry
            .save_volunteer_profile(new_volunteer("u1", &[SkillTag::Rescue]))
            .unwrap();
        assert!(!created);
        assert_eq!(saved.id, first.id);
        assert_eq!(registry.volunteers().len(), 1);

        let stored = registry.volunteer_by_user_id("user-u1").unwrap();
        assert_eq!(stored.skills, SkillSet::from([SkillTag::Rescue]));
    }

    #[test]
    fn test_concurrent_profile_saves_create_one() {
        let registry = InMemoryRegistry::new();

        let created = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..20)
                .map(|_| {
                    let registry = &registry;
                    scope.spawn(move || {
                        registry
                            .save_volunteer_profile(new_volunteer("u1", &[SkillTag::Cooking]))
                            .unwrap()
                            .1
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).filter(|c| *c).count()
        });

        assert_eq!(created, 1);
        assert_eq!(registry.volunteers().len(), 1);
    }

    #[test]
    fn test_rejected_commit_leaves_task_unchanged() {
        let registry = InMemoryRegistry::new();
        let shelter = registry.add_shelter(new_shelter("Camp", 19.07, 72.87, 10, 0)).unwrap();
        let mut slot = registry.add_task(new_task(&shelter.id, &[])).unwrap();

        let mut broken = slot.clone();
        broken.status = TaskStatus::Assigned;

        assert!(matches!(commit_task(&mut slot, broken), Err(RegistryError::Invariant(_))));
        assert_eq!(slot.status, TaskStatus::Created);
        assert!(slot.check_invariant().is_ok());
    }
}
