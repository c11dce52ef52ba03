//! Tutor Match - eligibility matching for adult-literacy tutoring programs
//!
//! Finds which tutors can take a given learner (and which learners a given
//! tutor can take) from level preferences and the `available` flag, and
//! manages the match records that pair them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{active_slots, eligible_learners_for_tutor, eligible_tutors_for_learner, has_active_slot, search_matches, MatchLifecycle};
pub use models::{Availability, Category, DaySlot, Learner, Loaded, Match, Preferences, Tutor, Weekday};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let availability = Availability::default().with_slot(Weekday::Monday, DaySlot::new("9:00", "10:00"));
        assert!(has_active_slot(&availability, Weekday::Monday));
    }
}
