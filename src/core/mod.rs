// Core algorithm exports
pub mod availability;
pub mod filters;
pub mod intake;
pub mod lifecycle;

pub use availability::{active_slots, has_active_slot, schedule};
pub use filters::{
    all_candidates, eligible_learners_for_tutor, eligible_tutors_for_learner, preferred_levels,
    selectable_candidates, tutor_accepts,
};
pub use intake::{capitalize_name, register_learner, register_tutor, validate_learner, validate_tutor, FormErrors, IntakeError};
pub use lifecycle::{search_matches, MatchError, MatchLifecycle};
