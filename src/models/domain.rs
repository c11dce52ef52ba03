use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::catalog::{Category, Weekday};

/// Meeting window for a single day
///
/// Times are kept as the raw `HH:MM` strings the records backend stores.
/// An empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl DaySlot {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Both ends present. A half-filled slot is never active.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.start_time.is_empty() && !self.end_time.is_empty()
    }
}

/// Weekly schedule with exactly one slot per [`Weekday`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AvailabilityDocument", into = "AvailabilityDocument")]
pub struct Availability {
    slots: [DaySlot; Weekday::COUNT],
}

impl Availability {
    pub fn slot(&self, day: Weekday) -> &DaySlot {
        &self.slots[day.index()]
    }

    /// Returns a copy with `day` replaced; `self` is left untouched
    #[must_use]
    pub fn with_slot(&self, day: Weekday, slot: DaySlot) -> Self {
        let mut slots = self.slots.clone();
        slots[day.index()] = slot;
        Self { slots }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DaySlot)> {
        Weekday::ALL.into_iter().map(move |day| (day, self.slot(day)))
    }
}

/// Wire shape of [`Availability`]: one object per weekday key
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AvailabilityDocument {
    #[serde(default)]
    monday: DaySlot,
    #[serde(default)]
    tuesday: DaySlot,
    #[serde(default)]
    wednesday: DaySlot,
    #[serde(default)]
    thursday: DaySlot,
    #[serde(default)]
    friday: DaySlot,
    #[serde(default)]
    saturday: DaySlot,
}

impl From<AvailabilityDocument> for Availability {
    fn from(doc: AvailabilityDocument) -> Self {
        Self {
            slots: [
                doc.monday,
                doc.tuesday,
                doc.wednesday,
                doc.thursday,
                doc.friday,
                doc.saturday,
            ],
        }
    }
}

impl From<Availability> for AvailabilityDocument {
    fn from(availability: Availability) -> Self {
        let [monday, tuesday, wednesday, thursday, friday, saturday] = availability.slots;
        Self {
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
        }
    }
}

/// Which categories a tutor is willing to teach
///
/// Fixed-size lookup indexed by [`Category`]. On the wire this is an object
/// keyed by category; keys outside the category set (the backend adds a
/// `tutor_id` field) are dropped and missing keys read as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, bool>"
)]
pub struct Preferences {
    flags: [bool; Category::COUNT],
}

impl Preferences {
    pub fn from_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        categories
            .into_iter()
            .fold(Self::default(), |prefs, c| prefs.with(c, true))
    }

    #[inline]
    pub fn accepts(&self, category: Category) -> bool {
        self.flags[category.index()]
    }

    #[must_use]
    pub fn with(&self, category: Category, willing: bool) -> Self {
        let mut flags = self.flags;
        flags[category.index()] = willing;
        Self { flags }
    }

    /// Accepted categories in canonical order
    pub fn preferred(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| self.accepts(*c))
    }

    pub fn any(&self) -> bool {
        self.flags.iter().any(|f| *f)
    }
}

impl From<BTreeMap<String, Value>> for Preferences {
    fn from(map: BTreeMap<String, Value>) -> Self {
        map.iter()
            .filter_map(|(key, value)| Some((Category::from_key(key)?, value.as_bool()?)))
            .fold(Self::default(), |prefs, (category, willing)| prefs.with(category, willing))
    }
}

impl From<Preferences> for BTreeMap<String, bool> {
    fn from(prefs: Preferences) -> Self {
        Category::ALL
            .into_iter()
            .map(|c| (c.key().to_string(), prefs.accepts(c)))
            .collect()
    }
}

/// Fields common to tutors and learners
pub trait Person {
    fn id(&self) -> &str;
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
    fn gender(&self) -> &str;
    /// Not currently matched
    fn is_available(&self) -> bool;

    fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }
}

/// Volunteer tutor record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferences: Preferences,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability: Availability,
}

/// Learner record; a learner has exactly one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Learner {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default = "default_true")]
    pub available: bool,
    pub level: Category,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability: Availability,
}

fn default_true() -> bool { true }

/// Stored records sometimes carry an explicit `null` instead of omitting the key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

macro_rules! impl_person {
    ($ty:ty) => {
        impl Person for $ty {
            fn id(&self) -> &str { &self.id }
            fn first_name(&self) -> &str { &self.first_name }
            fn last_name(&self) -> &str { &self.last_name }
            fn gender(&self) -> &str { &self.gender }
            fn is_available(&self) -> bool { self.available }
        }
    };
}

impl_person!(Tutor);
impl_person!(Learner);

/// Name snapshot of one side of a match, copied at creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchParty {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl MatchParty {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Match payload before the records backend assigns an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub tutor: MatchParty,
    pub learner: MatchParty,
}

/// Persisted tutor/learner pairing. Never edited, only deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub tutor: MatchParty,
    pub learner: MatchParty,
}

impl Match {
    pub fn from_new(id: impl Into<String>, new: NewMatch) -> Self {
        Self {
            id: id.into(),
            tutor: new.tutor,
            learner: new.learner,
        }
    }
}

/// Load state of a target entity
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    NotLoaded,
    Loaded(T),
    LoadFailed(String),
}

impl<T> Loaded<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Loaded::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Loaded<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Loaded::Loaded(value),
            Err(e) => Loaded::LoadFailed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preferences_ignore_bookkeeping_keys() {
        let prefs: Preferences = serde_json::from_value(json!({
            "tutor_id": "t-42",
            "basic_math": true,
            "esl_novice": false,
            "made_up": true,
        }))
        .unwrap();

        assert!(prefs.accepts(Category::BasicMath));
        assert!(!prefs.accepts(Category::EslNovice));
        assert!(!prefs.accepts(Category::Conversation));
        assert_eq!(prefs.preferred().collect::<Vec<_>>(), vec![Category::BasicMath]);
    }

    #[test]
    fn test_preferences_with_returns_new_value() {
        let original = Preferences::default();
        let updated = original.with(Category::Citizenship, true);

        assert!(!original.any());
        assert!(updated.accepts(Category::Citizenship));
    }

    #[test]
    fn test_availability_missing_days_are_empty() {
        let availability: Availability = serde_json::from_value(json!({
            "tuesday": { "start_time": "10:00", "end_time": "12:00" },
        }))
        .unwrap();

        assert_eq!(availability.slot(Weekday::Monday), &DaySlot::default());
        assert!(availability.slot(Weekday::Tuesday).is_active());
    }

    #[test]
    fn test_availability_serializes_every_day() {
        let availability = Availability::default()
            .with_slot(Weekday::Friday, DaySlot::new("09:00", "11:00"));
        let value = serde_json::to_value(&availability).unwrap();

        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), Weekday::COUNT);
        assert_eq!(obj["friday"]["start_time"], "09:00");
        assert_eq!(obj["monday"]["end_time"], "");
    }

    #[test]
    fn test_null_preferences_and_availability_read_as_empty() {
        let tutor: Tutor = serde_json::from_value(json!({
            "id": "t1",
            "first_name": "Ann",
            "last_name": "Lee",
            "preferences": null,
            "availability": null,
        }))
        .unwrap();
        let learner: Learner = serde_json::from_value(json!({
            "id": "l1",
            "first_name": "Sam",
            "last_name": "Cole",
            "level": "citizenship",
            "availability": null,
        }))
        .unwrap();

        assert!(!tutor.preferences.any());
        assert_eq!(tutor.availability, Availability::default());
        assert_eq!(learner.availability, Availability::default());
    }

    #[test]
    fn test_learner_rejects_unknown_level() {
        let result = serde_json::from_value::<Learner>(json!({
            "id": "l1",
            "first_name": "Sam",
            "last_name": "Cole",
            "level": "astrophysics",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_loaded_from_result() {
        let ok: Loaded<u8> = Ok::<u8, String>(3).into();
        let failed: Loaded<u8> = Err::<u8, String>("boom".into()).into();

        assert_eq!(ok.value(), Some(&3));
        assert_eq!(failed, Loaded::LoadFailed("boom".to_string()));
        assert_eq!(Loaded::<u8>::NotLoaded.value(), None);
    }
}
