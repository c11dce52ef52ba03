use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject/skill categories shared by tutor preferences and learner levels.
///
/// The set is closed and ordered; both sides of a match must agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Conversation,
    EslNovice,
    EslBeginner,
    EslIntermediate,
    Citizenship,
    SpedEla,
    BasicMath,
    HisetMath,
    BasicReading,
    HisetReading,
    BasicWriting,
    HisetWriting,
}

impl Category {
    pub const COUNT: usize = 12;

    /// Every category in canonical order
    pub const ALL: [Category; Category::COUNT] = [
        Category::Conversation,
        Category::EslNovice,
        Category::EslBeginner,
        Category::EslIntermediate,
        Category::Citizenship,
        Category::SpedEla,
        Category::BasicMath,
        Category::HisetMath,
        Category::BasicReading,
        Category::HisetReading,
        Category::BasicWriting,
        Category::HisetWriting,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Wire key, identical to the serde representation
    pub const fn key(self) -> &'static str {
        match self {
            Category::Conversation => "conversation",
            Category::EslNovice => "esl_novice",
            Category::EslBeginner => "esl_beginner",
            Category::EslIntermediate => "esl_intermediate",
            Category::Citizenship => "citizenship",
            Category::SpedEla => "sped_ela",
            Category::BasicMath => "basic_math",
            Category::HisetMath => "hiset_math",
            Category::BasicReading => "basic_reading",
            Category::HisetReading => "hiset_reading",
            Category::BasicWriting => "basic_writing",
            Category::HisetWriting => "hiset_writing",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Days a tutor or learner can meet. Sunday is intentionally absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const COUNT: usize = 6;

    pub const ALL: [Weekday; Weekday::COUNT] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
