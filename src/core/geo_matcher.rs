use crate::core::{distance::{distance_between, round_to_tenth}, filters::is_available_shelter};
use crate::models::{Coordinate, Shelter, ShelterDecision, ShelterMatch};

/// Find the nearest shelter that still has a free place
///
/// Only shelters with `current_occupancy < total_capacity` are candidates;
/// a full shelter is never chosen, however close. Among candidates the one
/// with the strictly smallest great-circle distance wins, and equal distances
/// keep the shelter that appears first in `shelters`.
///
/// The returned distance is rounded to one decimal place. Comparison happens
/// on the unrounded distances.
///
/// This is a pure function over a snapshot. Applying the occupancy increment
/// is the caller's job and must be serialized with this read.
///
/// # Arguments
/// * `query` - Coordinate to measure from, assumed in range
/// * `shelters` - Current shelter snapshot, in caller order
pub fn find_nearest_available(query: &Coordinate, shelters: &[Shelter]) -> ShelterDecision {
    let mut nearest: Option<(&Shelter, f64)> = None;

    for shelter in shelters.iter().filter(|s| is_available_shelter(s)) {
        let distance = distance_between(query, &shelter.location);
        let closer = match nearest {
            Some((_, best)) => distance < best,
            None => !distance.is_nan(),
        };
        if closer {
            nearest = Some((shelter, distance));
        }
    }

    match nearest {
        Some((shelter, distance)) => ShelterDecision::Matched(ShelterMatch {
            shelter: shelter.clone(),
            distance_km: round_to_tenth(distance),
        }),
        None => ShelterDecision::NoShelterAvailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_shelter(id: &str, lat: f64, lon: f64, total: u32, occupied: u32) -> Shelter {
        Shelter {
            id: id.to_string(),
            name: format!("Shelter {}", id),
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
            coordinator_id: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_picks_nearest_available() {
        let query = Coordinate::new(19.0760, 72.8777);
        let shelters = vec![
            create_shelter("far", 19.0596, 72.8295, 300, 150),  // ~5.4km
            create_shelter("near", 19.1136, 72.8697, 400, 398), // ~4.3km
        ];

        let decision = find_nearest_available(&query, &shelters);
        let matched = decision.matched().expect("expected a shelter");

        assert_eq!(matched.shelter.id, "near");
        assert_eq!(matched.distance_km, 4.3);
    }

    #[test]
    fn test_full_shelter_never_chosen() {
        let query = Coordinate::new(19.0760, 72.8777);
        let shelters = vec![
            create_shelter("full", 19.0760, 72.8777, 100, 100),
            create_shelter("over", 19.0761, 72.8777, 100, 120),
            create_shelter("open", 19.0596, 72.8295, 300, 150),
        ];

        let decision = find_nearest_available(&query, &shelters);
        assert_eq!(decision.matched().unwrap().shelter.id, "open");
    }

    #[test]
    fn test_no_candidates() {
        let query = Coordinate::new(19.0760, 72.8777);
        assert!(matches!(
            find_nearest_available(&query, &[]),
            ShelterDecision::NoShelterAvailable
        ));

        let all_full = vec![create_shelter("a", 19.0, 72.8, 10, 10)];
        assert!(find_nearest_available(&query, &all_full).matched().is_none());
    }

    #[test]
    fn test_equal_distance_keeps_first() {
        let query = Coordinate::new(0.0, 0.0);
        let shelters = vec![
            create_shelter("east", 0.0, 1.0, 10, 0),
            create_shelter("west", 0.0, -1.0, 10, 0),
        ];

        let decision = find_nearest_available(&query, &shelters);
        assert_eq!(decision.matched().unwrap().shelter.id, "east");
    }

    #[test]
    fn test_zero_capacity_shelter_is_full() {
        let query = Coordinate::new(0.0, 0.0);
        let shelters = vec![create_shelter("empty", 0.0, 0.0, 0, 0)];
        assert!(find_nearest_available(&query, &shelters).matched().is_none());
    }

    #[test]
    fn test_antipodal_shelter_does_not_beat_nearby_one() {
        let query = Coordinate::new(-88.7864, -11.877);
        let shelters = vec![
            create_shelter("near", -88.7, -11.8, 50, 0),
            create_shelter("antipode", 88.7864, 168.123, 50, 0),
        ];

        let matched = find_nearest_available(&query, &shelters).into_matched().unwrap();
        assert_eq!(matched.shelter.id, "near");
        assert!(matched.distance_km.is_finite());
        assert!(matched.distance_km < 20.0);

        // Antipode listed first must still lose
        let reversed: Vec<Shelter> = shelters.into_iter().rev().collect();
        let matched = find_nearest_available(&query, &reversed).into_matched().unwrap();
        assert_eq!(matched.shelter.id, "near");
    }
}
