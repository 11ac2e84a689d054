use crate::core::{
    filters::is_eligible_volunteer,
    scoring::{shared_skills, skill_overlap_score},
};
use crate::models::{AssignmentDecision, Task, TaskAssignment, Volunteer};

/// Eligible volunteer together with its skill-overlap score
#[derive(Debug, Clone, Copy)]
pub struct ScoredVolunteer<'a> {
    pub volunteer: &'a Volunteer,
    pub score: usize,
}

/// Score every eligible volunteer against the task, best first
///
/// Volunteers with no overlapping skill stay in the list with score 0.
/// The sort is stable, so equal scores keep their input order.
pub fn rank_candidates<'a>(task: &Task, volunteers: &'a [Volunteer]) -> Vec<ScoredVolunteer<'a>> {
    let mut scored: Vec<ScoredVolunteer<'a>> = volunteers
        .iter()
        .filter(|v| is_eligible_volunteer(v))
        .map(|volunteer| ScoredVolunteer {
            volunteer,
            score: skill_overlap_score(&task.required_skills, &volunteer.skills),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Pick the volunteer to auto-assign to a task, if any
///
/// The top-ranked candidate is chosen only when its score is above zero.
/// A task without required skills therefore never auto-assigns and is left
/// for manual assignment.
///
/// The task is not modified. On success the caller applies the returned
/// [`TaskAssignment`] with [`TaskAssignment::apply_to`]. Identical inputs
/// always give an identical decision.
pub fn select_assignee(task: &Task, volunteers: &[Volunteer]) -> AssignmentDecision {
    match rank_candidates(task, volunteers).first() {
        Some(best) if best.score > 0 => AssignmentDecision::Assigned(TaskAssignment {
            task_id: task.id.clone(),
            volunteer_id: best.volunteer.id.clone(),
            volunteer_name: best.volunteer.name.clone(),
            score: best.score,
            matched_skills: shared_skills(&task.required_skills, &best.volunteer.skills),
        }),
        _ => AssignmentDecision::NoEligibleVolunteer,
    }
}
