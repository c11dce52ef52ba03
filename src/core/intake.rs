use crate::models::{Availability, Learner, NewLearner, NewTutor, Tutor};
use crate::services::{RecordStore, StoreError};
use chrono::NaiveTime;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;

/// Field name -> message for a rejected intake form; a later check on the
/// same field replaces the earlier message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    fn add(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.0
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for FormErrors {}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Validation failed: {0}")]
    Invalid(FormErrors),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

fn require(errors: &mut FormErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

fn is_phone_number(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// `start < end`, comparing as clock times when both parse
fn starts_before_end(start: &str, end: &str) -> bool {
    match (
        NaiveTime::parse_from_str(start, "%H:%M"),
        NaiveTime::parse_from_str(end, "%H:%M"),
    ) {
        (Ok(start), Ok(end)) => start < end,
        _ => start < end,
    }
}

fn check_availability(errors: &mut FormErrors, availability: &Availability) {
    for (_, slot) in availability.iter() {
        let has_start = !slot.start_time.is_empty();
        let has_end = !slot.end_time.is_empty();

        if has_start && !has_end {
            errors.add("availability", "End time is required if a start time is selected");
        } else if !has_start && has_end {
            errors.add("availability", "Start time is required if an end time is selected");
        } else if has_start && has_end && !starts_before_end(&slot.start_time, &slot.end_time) {
            errors.add("availability", "Start time must be before end time");
        }
    }
}

/// Check a tutor form before it is stored
///
/// This is the only place half-filled days and empty preference sets are
/// rejected; the eligibility filters assume stored records already passed.
pub fn validate_tutor(form: &NewTutor) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    require(&mut errors, "first_name", &form.first_name, "First name is required");
    require(&mut errors, "last_name", &form.last_name, "Last name is required");
    require(&mut errors, "phone", &form.phone, "Phone number is required");
    require(&mut errors, "email", &form.email, "Email is required");
    require(&mut errors, "gender", &form.gender, "Gender is required");

    if !form.phone.is_empty() && !is_phone_number(&form.phone) {
        errors.add("phone", "Phone number is invalid");
    }
    if !form.email.is_empty() && !form.email.validate_email() {
        errors.add("email", "Email is invalid");
    }

    if !form.preferences.any() {
        errors.add("preferences", "At least one preference must be selected");
    }

    check_availability(&mut errors, &form.availability);
    errors.into_result()
}

/// Check a learner form before it is stored
pub fn validate_learner(form: &NewLearner) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    require(&mut errors, "first_name", &form.first_name, "First name is required");
    require(&mut errors, "last_name", &form.last_name, "Last name is required");
    require(&mut errors, "gender", &form.gender, "Gender is required");

    check_availability(&mut errors, &form.availability);
    errors.into_result()
}

/// "mARY  ann" -> "Mary Ann"
pub fn capitalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize names, validate, then store a new tutor
pub async fn register_tutor(store: &dyn RecordStore, form: NewTutor) -> Result<Tutor, IntakeError> {
    let form = NewTutor {
        first_name: capitalize_name(&form.first_name),
        last_name: capitalize_name(&form.last_name),
        ..form
    };
    validate_tutor(&form).map_err(IntakeError::Invalid)?;

    let created = store.create_tutor(form).await?;
    tracing::info!("Registered tutor {} ({} {})", created.id, created.first_name, created.last_name);
    Ok(created)
}

/// Normalize names, validate, then store a new learner
pub async fn register_learner(
    store: &dyn RecordStore,
    form: NewLearner,
) -> Result<Learner, IntakeError> {
    let form = NewLearner {
        first_name: capitalize_name(&form.first_name),
        last_name: capitalize_name(&form.last_name),
        ..form
    };
    validate_learner(&form).map_err(IntakeError::Invalid)?;

    let created = store.create_learner(form).await?;
    tracing::info!(
        "Registered learner {} ({} {}, {})",
        created.id,
        created.first_name,
        created.last_name,
        created.level
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, DaySlot, Preferences, Weekday};
    use crate::services::InMemoryStore;

    fn valid_tutor() -> NewTutor {
        NewTutor {
            first_name: "ann".to_string(),
            last_name: "lee".to_string(),
            gender: "female".to_string(),
            email: "ann.lee@example.org".to_string(),
            phone: "5551234567".to_string(),
            available: true,
            preferences: Preferences::from_categories([Category::EslBeginner]),
            availability: Availability::default()
                .with_slot(Weekday::Monday, DaySlot::new("09:00", "11:00")),
        }
    }

    #[test]
    fn test_valid_tutor_passes() {
        assert!(validate_tutor(&valid_tutor()).is_ok());
    }

    #[test]
    fn test_tutor_requires_a_preference() {
        let form = NewTutor {
            preferences: Preferences::default(),
            ..valid_tutor()
        };

        let errors = validate_tutor(&form).unwrap_err();
        assert_eq!(
            errors.get("preferences"),
            Some("At least one preference must be selected")
        );
    }

    #[test]
    fn test_tutor_contact_format() {
        let form = NewTutor {
            phone: "555-123-4567".to_string(),
            email: "not an email".to_string(),
            ..valid_tutor()
        };

        let errors = validate_tutor(&form).unwrap_err();
        assert_eq!(errors.get("phone"), Some("Phone number is invalid"));
        assert_eq!(errors.get("email"), Some("Email is invalid"));
    }

    #[test]
    fn test_missing_fields_reported_once() {
        let errors = validate_tutor(&NewTutor::default()).unwrap_err();

        assert_eq!(errors.get("first_name"), Some("First name is required"));
        assert_eq!(errors.get("phone"), Some("Phone number is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn test_blank_contact_reported_as_invalid() {
        let form = NewTutor {
            phone: "   ".to_string(),
            email: " ".to_string(),
            ..valid_tutor()
        };

        let errors = validate_tutor(&form).unwrap_err();
        assert_eq!(errors.get("phone"), Some("Phone number is invalid"));
        assert_eq!(errors.get("email"), Some("Email is invalid"));
    }

    #[test]
    fn test_last_failing_day_sets_availability_message() {
        let form = NewTutor {
            availability: Availability::default()
                .with_slot(Weekday::Monday, DaySlot::new("09:00", ""))
                .with_slot(Weekday::Thursday, DaySlot::new("14:00", "12:00")),
            ..valid_tutor()
        };

        assert_eq!(
            validate_tutor(&form).unwrap_err().get("availability"),
            Some("Start time must be before end time")
        );
    }

    #[test]
    fn test_half_filled_day_rejected() {
        let form = NewTutor {
            availability: Availability::default()
                .with_slot(Weekday::Wednesday, DaySlot::new("13:00", "")),
            ..valid_tutor()
        };

        assert_eq!(
            validate_tutor(&form).unwrap_err().get("availability"),
            Some("End time is required if a start time is selected")
        );
    }

    #[test]
    fn test_end_before_start_rejected() {
        let form = NewTutor {
            availability: Availability::default()
                .with_slot(Weekday::Friday, DaySlot::new("15:00", "9:30")),
            ..valid_tutor()
        };

        assert_eq!(
            validate_tutor(&form).unwrap_err().get("availability"),
            Some("Start time must be before end time")
        );
    }

    #[test]
    fn test_clock_times_compared_numerically() {
        assert!(starts_before_end("9:00", "10:00"));
        assert!(!starts_before_end("10:00", "10:00"));
    }

    #[test]
    fn test_learner_end_without_start() {
        let form = NewLearner {
            first_name: "Sam".to_string(),
            last_name: "Cole".to_string(),
            gender: "male".to_string(),
            available: true,
            level: Category::Citizenship,
            availability: Availability::default()
                .with_slot(Weekday::Saturday, DaySlot::new("", "12:00")),
        };

        assert_eq!(
            validate_learner(&form).unwrap_err().get("availability"),
            Some("Start time is required if an end time is selected")
        );
    }

    #[test]
    fn test_capitalize_name() {
        assert_eq!(capitalize_name("mARY  ann"), "Mary Ann");
        assert_eq!(capitalize_name("  o'neil "), "O'neil");
        assert_eq!(capitalize_name(""), "");
    }

    #[tokio::test]
    async fn test_register_tutor_capitalizes_and_stores() {
        let store = InMemoryStore::new();

        let tutor = register_tutor(&store, valid_tutor()).await.unwrap();

        assert_eq!(tutor.first_name, "Ann");
        assert_eq!(tutor.last_name, "Lee");
        assert_eq!(store.fetch_tutors().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_without_storing() {
        let store = InMemoryStore::new();
        let form = NewTutor {
            preferences: Preferences::default(),
            ..valid_tutor()
        };

        let result = register_tutor(&store, form).await;

        assert!(matches!(result, Err(IntakeError::Invalid(_))));
        assert!(store.fetch_tutors().await.unwrap().is_empty());
    }
}
