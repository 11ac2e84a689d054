use crate::models::{SkillSet, SkillTag};

/// Count the task's required skills that the volunteer holds
///
/// Score is the cardinality of the set intersection. Zero is a valid score;
/// the matcher decides what to do with it.
#[inline]
pub fn skill_overlap_score(required: &SkillSet, offered: &SkillSet) -> usize {
    required.intersection(offered).count()
}

/// The overlapping skills themselves, in tag order
pub fn shared_skills(required: &SkillSet, offered: &SkillSet) -> Vec<SkillTag> {
    required.intersection(offered).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_counts_shared_tags() {
        let required = SkillSet::from([SkillTag::Medical, SkillTag::Logistics]);
        let offered = SkillSet::from([SkillTag::FirstAid, SkillTag::Driving, SkillTag::Logistics]);

        assert_eq!(skill_overlap_score(&required, &offered), 1);
        assert_eq!(shared_skills(&required, &offered), vec![SkillTag::Logistics]);
    }

    #[test]
    fn test_empty_requirements_score_zero() {
        let offered = SkillSet::from([SkillTag::Cooking, SkillTag::Rescue]);
        assert_eq!(skill_overlap_score(&SkillSet::new(), &offered), 0);
    }

    #[test]
    fn test_full_overlap() {
        let skills = SkillSet::from([SkillTag::Cooking, SkillTag::Rescue, SkillTag::Medical]);
        assert_eq!(skill_overlap_score(&skills, &skills), 3);
    }
}
