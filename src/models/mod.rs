// Model exports
pub mod catalog;
pub mod domain;
pub mod requests;
pub mod responses;

pub use catalog::{Category, Weekday};
pub use domain::{Availability, DaySlot, Learner, Loaded, Match, MatchParty, NewMatch, Person, Preferences, Tutor};
pub use requests::{CreateMatchRequest, NewLearner, NewTutor, SearchMatchesQuery, SelectCounterpartRequest};
pub use responses::{
    ActiveSlot, CandidateSummary, EligibleLearnersResponse, EligibleTutorsResponse, ErrorResponse,
    FormErrorResponse, HealthResponse, LearnerListing, MatchListResponse, TutorListing,
};
