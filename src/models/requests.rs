use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::catalog::Category;
use crate::models::domain::{Availability, Preferences};

/// Request to create a match from an explicit name snapshot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "tutorId")]
    pub tutor_id: String,
    #[serde(alias = "tutorFirstName")]
    pub tutor_first_name: String,
    #[serde(alias = "tutorLastName")]
    pub tutor_last_name: String,
    #[validate(length(min = 1))]
    #[serde(alias = "learnerId")]
    pub learner_id: String,
    #[serde(alias = "learnerFirstName")]
    pub learner_first_name: String,
    #[serde(alias = "learnerLastName")]
    pub learner_last_name: String,
}

/// Operator picked a counterpart from an eligibility or picker listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SelectCounterpartRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "counterpartId")]
    pub counterpart_id: String,
}

/// Query string for match search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMatchesQuery {
    #[serde(default)]
    pub q: String,
}

/// Tutor intake form, before the backend assigns an id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTutor {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub availability: Availability,
}

/// Learner intake form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLearner {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default = "default_available")]
    pub available: bool,
    pub level: Category,
    #[serde(default)]
    pub availability: Availability,
}

fn default_available() -> bool {
    true
}
