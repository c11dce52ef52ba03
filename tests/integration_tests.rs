// Integration tests for Tutor Match

use std::sync::Arc;
use serde_json::json;
use tutor_match::core::{
    active_slots, eligible_learners_for_tutor, eligible_tutors_for_learner, search_matches,
    MatchError, MatchLifecycle,
};
use tutor_match::models::{
    Availability, Category, DaySlot, Learner, Loaded, MatchParty, Preferences, Tutor, Weekday,
};
use tutor_match::services::{InMemoryStore, RecordStore, SeedData};

fn create_tutor(id: &str, available: bool, preferences: Preferences) -> Tutor {
    Tutor {
        id: id.to_string(),
        first_name: format!("Tutor{}", id),
        last_name: "Smith".to_string(),
        gender: "female".to_string(),
        email: format!("{}@example.org", id),
        phone: "5555555555".to_string(),
        available,
        preferences,
        availability: Availability::default(),
    }
}

fn create_learner(id: &str, available: bool, level: Category) -> Learner {
    Learner {
        id: id.to_string(),
        first_name: format!("Learner{}", id),
        last_name: "Jones".to_string(),
        gender: "male".to_string(),
        available,
        level,
        availability: Availability::default(),
    }
}

#[test]
fn test_only_available_tutor_with_level_is_eligible() {
    let learner = Loaded::Loaded(create_learner("L1", true, Category::BasicMath));
    let t1 = create_tutor(
        "T1",
        true,
        Preferences::default()
            .with(Category::BasicMath, true)
            .with(Category::EslNovice, false),
    );
    let t2 = create_tutor("T2", false, Preferences::from_categories([Category::BasicMath]));
    let tutors = vec![t1.clone(), t2];

    let eligible = eligible_tutors_for_learner(&learner, &tutors);

    assert_eq!(eligible, vec![&t1]);
}

#[test]
fn test_single_candidate_property_both_directions() {
    for level in Category::ALL {
        for tutor_available in [true, false] {
            for learner_available in [true, false] {
                let prefs = Preferences::from_categories([Category::Citizenship, Category::HisetReading]);
                let tutor = create_tutor("T", tutor_available, prefs);
                let learner = create_learner("L", learner_available, level);

                let tutors = [tutor.clone()];
                let forward = eligible_tutors_for_learner(&Loaded::Loaded(learner.clone()), &tutors);
                assert_eq!(!forward.is_empty(), tutor_available && prefs.accepts(level));

                let learners = [learner];
                let backward = eligible_learners_for_tutor(&Loaded::Loaded(tutor), &learners);
                assert_eq!(!backward.is_empty(), learner_available && prefs.accepts(level));
            }
        }
    }
}

#[test]
fn test_filters_keep_pool_order_and_inputs() {
    let learner = Loaded::Loaded(create_learner("L1", true, Category::Conversation));
    let tutors: Vec<Tutor> = (0..6)
        .map(|i| {
            create_tutor(
                &i.to_string(),
                i % 2 == 0,
                Preferences::from_categories([Category::Conversation]),
            )
        })
        .collect();
    let before = tutors.clone();

    let first: Vec<String> = eligible_tutors_for_learner(&learner, &tutors)
        .into_iter()
        .map(|t| t.id.clone())
        .collect();
    let second: Vec<String> = eligible_tutors_for_learner(&learner, &tutors)
        .into_iter()
        .map(|t| t.id.clone())
        .collect();

    assert_eq!(first, vec!["0", "2", "4"]);
    assert_eq!(first, second);
    assert_eq!(tutors, before);
}

#[test]
fn test_stored_preferences_with_bookkeeping_field() {
    let tutor: Tutor = serde_json::from_value(json!({
        "id": "t1",
        "first_name": "Ann",
        "last_name": "Lee",
        "available": true,
        "preferences": {"tutor_id": "t1", "esl_beginner": true, "hiset_math": true},
        "availability": {"monday": {"start_time": "9:00", "end_time": ""}}
    }))
    .unwrap();
    let learners = vec![
        create_learner("a", true, Category::HisetMath),
        create_learner("b", true, Category::BasicMath),
        create_learner("c", true, Category::EslBeginner),
    ];

    let ids: Vec<&str> = eligible_learners_for_tutor(&Loaded::Loaded(tutor.clone()), &learners)
        .into_iter()
        .map(|l| l.id.as_str())
        .collect();

    assert_eq!(ids, vec!["a", "c"]);
    assert!(active_slots(&tutor.availability).is_empty());
}

#[test]
fn test_active_slots_never_half_filled() {
    let availability = Availability::default()
        .with_slot(Weekday::Monday, DaySlot::new("9:00", ""))
        .with_slot(Weekday::Tuesday, DaySlot::new("", "10:00"))
        .with_slot(Weekday::Wednesday, DaySlot::new("13:00", "14:00"));

    let slots = active_slots(&availability);

    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].0, Weekday::Wednesday);
    for (_, slot) in slots {
        assert!(!slot.start_time.is_empty() && !slot.end_time.is_empty());
    }
}

#[tokio::test]
async fn test_match_snapshot_survives_record_changes() {
    let tutor = create_tutor("t1", true, Preferences::from_categories([Category::BasicMath]));
    let store = Arc::new(InMemoryStore::with_records(SeedData {
        tutors: vec![tutor],
        learners: vec![create_learner("l1", true, Category::BasicMath)],
        matches: vec![],
    }));
    let lifecycle = MatchLifecycle::new(store.clone());

    let created = lifecycle
        .create_match("t1", "Ann", "Lee", "l1", "Sam", "Cole")
        .await
        .unwrap();

    assert_eq!(created.tutor, MatchParty::new("t1", "Ann", "Lee"));
    assert_eq!(created.learner, MatchParty::new("l1", "Sam", "Cole"));

    // the stored tutor record is "Tutort1 Smith"; the match keeps the names it was given
    let tutor = store.fetch_tutor_by_id("t1").await.unwrap();
    assert_ne!(tutor.first_name, created.tutor.first_name);
    let stored = store.fetch_matches().await.unwrap();
    assert_eq!(stored, vec![created]);
}

#[tokio::test]
async fn test_same_people_can_be_matched_twice() {
    let lifecycle = MatchLifecycle::new(Arc::new(InMemoryStore::new()));
    let tutor = create_tutor("t1", true, Preferences::from_categories([Category::SpedEla]));
    let learner = create_learner("l1", true, Category::SpedEla);

    let first = lifecycle.match_pair(&tutor, &learner).await.unwrap();
    let second = lifecycle.match_pair(&tutor, &learner).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(lifecycle.list_matches().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_then_search() {
    let lifecycle = MatchLifecycle::new(Arc::new(InMemoryStore::new()));
    let kept = lifecycle
        .create_match("t1", "John", "Hale", "l1", "Ida", "Moss")
        .await
        .unwrap();
    let removed = lifecycle
        .create_match("t2", "Rae", "Cho", "l2", "Johanna", "Bell")
        .await
        .unwrap();

    lifecycle.delete_match(&removed.id).await.unwrap();
    let again = lifecycle.delete_match(&removed.id).await;

    assert!(matches!(again, Err(MatchError::NotFound(_))));
    let all = lifecycle.list_matches().await.unwrap();
    assert_eq!(search_matches(&all, "JOH"), vec![&kept]);
    assert_eq!(lifecycle.search("").await.unwrap(), vec![kept]);
}
