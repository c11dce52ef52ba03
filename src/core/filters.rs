use crate::models::{CandidateSummary, Category, Learner, Loaded, Person, Tutor};

/// Check if a tutor can take on a learner
///
/// The tutor must be available and willing to teach the learner's level.
#[inline]
pub fn tutor_accepts(tutor: &Tutor, learner: &Learner) -> bool {
    tutor.available && tutor.preferences.accepts(learner.level)
}

/// Levels a tutor is willing to teach, in canonical category order
///
/// Built from the fixed category set, so bookkeeping fields stored next to
/// the preferences can never leak in.
pub fn preferred_levels(tutor: &Tutor) -> Vec<Category> {
    tutor.preferences.preferred().collect()
}

/// Tutors that could be matched with `learner`
///
/// An unloaded or failed learner yields no candidates. Pool order is kept.
pub fn eligible_tutors_for_learner<'a>(
    learner: &Loaded<Learner>,
    tutors: &'a [Tutor],
) -> Vec<&'a Tutor> {
    let Some(learner) = learner.value() else {
        return Vec::new();
    };

    tutors
        .iter()
        .filter(|tutor| tutor_accepts(tutor, learner))
        .collect()
}

/// Learners that could be matched with `tutor`
///
/// An unloaded tutor, or one with no accepted level, yields no candidates.
pub fn eligible_learners_for_tutor<'a>(
    tutor: &Loaded<Tutor>,
    learners: &'a [Learner],
) -> Vec<&'a Learner> {
    let Some(tutor) = tutor.value() else {
        return Vec::new();
    };

    let levels = preferred_levels(tutor);
    if levels.is_empty() {
        return Vec::new();
    }

    learners
        .iter()
        .filter(|learner| learner.available && levels.contains(&learner.level))
        .collect()
}

/// Every pool member, unfiltered, for manual selection
pub fn all_candidates<P: Person>(pool: &[P]) -> Vec<CandidateSummary> {
    pool.iter()
        .map(|person| CandidateSummary {
            id: person.id().to_string(),
            name: person.full_name(),
            gender: person.gender().to_string(),
            available: person.is_available(),
        })
        .collect()
}

/// The picker only offers people who are still available
pub fn selectable_candidates<P: Person>(pool: &[P]) -> Vec<CandidateSummary> {
    all_candidates(pool)
        .into_iter()
        .filter(|c| c.available)
        .collect()
}
