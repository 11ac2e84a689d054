// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod geo_matcher;
pub mod scoring;
pub mod task_matcher;

pub use distance::{distance_between, haversine_distance, round_to_tenth, EARTH_RADIUS_KM};
pub use filters::{is_available_shelter, is_eligible_volunteer};
pub use geo_matcher::find_nearest_available;
pub use scoring::{shared_skills, skill_overlap_score};
pub use task_matcher::{rank_candidates, select_assignee, ScoredVolunteer};
