use crate::models::{ActiveSlot, Availability, DaySlot, Weekday};

/// Check whether a person can meet on `day`
///
/// True only when both start and end are set. A day with exactly one end set
/// is malformed input and is treated as unavailable rather than rejected.
#[inline]
pub fn has_active_slot(availability: &Availability, day: Weekday) -> bool {
    availability.slot(day).is_active()
}

/// Active days in canonical order (Monday first), inactive days dropped
pub fn active_slots(availability: &Availability) -> Vec<(Weekday, &DaySlot)> {
    availability
        .iter()
        .filter(|(day, _)| has_active_slot(availability, *day))
        .collect()
}

/// Owned form of [`active_slots`] for responses
pub fn schedule(availability: &Availability) -> Vec<ActiveSlot> {
    active_slots(availability)
        .into_iter()
        .map(|(day, slot)| ActiveSlot {
            day,
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_filled_day_is_inactive() {
        let availability = Availability::default()
            .with_slot(Weekday::Monday, DaySlot::new("9:00", ""));

        assert!(!has_active_slot(&availability, Weekday::Monday));
        assert!(active_slots(&availability).is_empty());
    }

    #[test]
    fn test_end_only_day_is_inactive() {
        let availability = Availability::default()
            .with_slot(Weekday::Thursday, DaySlot::new("", "17:00"));

        assert!(!has_active_slot(&availability, Weekday::Thursday));
    }

    #[test]
    fn test_empty_availability_has_no_slots() {
        assert!(active_slots(&Availability::default()).is_empty());
        assert!(schedule(&Availability::default()).is_empty());
    }

    #[test]
    fn test_active_slots_in_weekday_order() {
        let availability = Availability::default()
            .with_slot(Weekday::Saturday, DaySlot::new("10:00", "12:00"))
            .with_slot(Weekday::Tuesday, DaySlot::new("13:00", "15:00"))
            .with_slot(Weekday::Wednesday, DaySlot::new("13:00", ""))
            .with_slot(Weekday::Monday, DaySlot::new("09:00", "10:00"));

        let days: Vec<Weekday> = active_slots(&availability)
            .into_iter()
            .map(|(day, _)| day)
            .collect();

        assert_eq!(days, vec![Weekday::Monday, Weekday::Tuesday, Weekday::Saturday]);
    }

    #[test]
    fn test_schedule_copies_times() {
        let availability = Availability::default()
            .with_slot(Weekday::Friday, DaySlot::new("16:00", "18:30"));

        assert_eq!(
            schedule(&availability),
            vec![ActiveSlot {
                day: Weekday::Friday,
                start_time: "16:00".to_string(),
                end_time: "18:30".to_string(),
            }]
        );
    }
}
