use crate::models::{Availability, Shelter, Volunteer};

/// Shelter has at least one free place.
///
/// Shelters at or over capacity are never candidates.
#[inline]
pub fn is_available_shelter(shelter: &Shelter) -> bool {
    shelter.is_available()
}

/// Volunteer may be considered by the task matcher at all.
///
/// Busy volunteers and volunteers who have not finished onboarding are
/// excluded before any scoring happens.
#[inline]
pub fn is_eligible_volunteer(volunteer: &Volunteer) -> bool {
    volunteer.availability == Availability::Available && volunteer.profile_completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, SkillSet, SkillTag};
    use chrono::Utc;

    fn create_test_volunteer(availability: Availability, profile_completed: bool) -> Volunteer {
        Volunteer {
            id: "vol".to_string(),
            user_id: "user".to_string(),
            name: "Test Volunteer".to_string(),
            contact_number: String::new(),
            city: "Mumbai".to_string(),
            skills: SkillSet::from([SkillTag::Cooking]),
            availability,
            location: Coordinate::new(19.07, 72.88),
            profile_completed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_available_and_complete_is_eligible() {
        assert!(is_eligible_volunteer(&create_test_volunteer(Availability::Available, true)));
    }

    #[test]
    fn test_busy_volunteer_filtered() {
        assert!(!is_eligible_volunteer(&create_test_volunteer(Availability::Busy, true)));
    }

    #[test]
    fn test_incomplete_profile_filtered() {
        assert!(!is_eligible_volunteer(&create_test_volunteer(Availability::Available, false)));
    }
}
