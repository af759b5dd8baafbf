//! Season service property tests
//!
//! - Reconciling any JSON value never fails and lands on a real period
//! - Neighbours are consistent around the whole cycle
//! - Reminders follow the period windows and priorities

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{json, Value};

use pranata_mangsa_backend::services::MangsaService;
use shared::{calendar, resolver, PredictionSource, ReminderKind, ReminderPriority};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=366).prop_filter_map("day of year", |(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal)
    })
}

/// Anything a misbehaving prediction service might send back
fn raw_prediction_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-100i64..100).prop_map(|n| json!(n)),
        (-100.0f64..100.0).prop_map(|f| json!(f)),
        "[a-z0-9 ]{0,8}".prop_map(|s| json!(s)),
        Just(Value::Null),
        Just(json!(true)),
        Just(json!([7])),
        Just(json!({"class": 7})),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: reconciling never fails, and the source tells which path ran
    #[test]
    fn prop_reconcile_is_total(value in raw_prediction_strategy(), date in date_strategy()) {
        let outcome = MangsaService::reconcile(&value, Some(date));
        prop_assert!((1..=12).contains(&outcome.mangsa.id));

        match outcome.source {
            PredictionSource::Model => {
                prop_assert_eq!(outcome.class_id, Some(outcome.mangsa.id));
                prop_assert!(outcome.fallback_reason.is_none());
            }
            PredictionSource::Calendar => {
                prop_assert_eq!(outcome.mangsa.id, resolver::resolve(date).id);
                prop_assert!(outcome.fallback_reason.is_some());
            }
        }
    }

    /// Property: integral class ids 1-12 always win over the date
    #[test]
    fn prop_valid_class_id_wins(class_id in 1u8..=12, date in date_strategy()) {
        let outcome = MangsaService::reconcile(&json!(class_id), Some(date));
        prop_assert_eq!(outcome.source, PredictionSource::Model);
        prop_assert_eq!(outcome.mangsa.id, class_id);
    }

    /// Property: `current` agrees with the resolver for every date
    #[test]
    fn prop_current_matches_resolver(date in date_strategy()) {
        prop_assert_eq!(MangsaService::current(Some(date)).id, resolver::resolve(date).id);
    }

    /// Property: the main activity reminder falls on the first day of the period
    /// and the preparation reminder on the first day of the next one
    #[test]
    fn prop_dated_reminders_resolve_to_periods(id in 1u8..=12, year in 1990i32..2100) {
        let reminders = MangsaService::reminders(id).unwrap();
        let main = reminders.iter().find(|r| r.kind == ReminderKind::Mangsa).unwrap();
        let prep = reminders.iter().find(|r| r.kind == ReminderKind::Preparation).unwrap();
        prop_assert_eq!(main.priority, ReminderPriority::High);
        prop_assert_eq!(prep.priority, ReminderPriority::Medium);

        let next_id = calendar::next(calendar::get_by_id(id).unwrap()).id;
        for (reminder, expected) in [(main, id), (prep, next_id)] {
            let day = reminder.date.unwrap();
            // Feb 29 only exists in leap years
            if let Some(date) = NaiveDate::from_ymd_opt(year, day.month, day.day) {
                prop_assert_eq!(resolver::resolve(date).id, expected);
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

mod cycle_tests {
    use super::*;

    #[test]
    fn test_neighbors_are_consistent() {
        for id in 1u8..=12 {
            let neighbors = MangsaService::neighbors(id).unwrap();
            assert_eq!(neighbors.current.id, id);
            assert_eq!(MangsaService::neighbors(neighbors.next.id).unwrap().previous.id, id);
        }
    }

    #[test]
    fn test_by_season_covers_every_period() {
        use shared::SeasonKind;
        let lists: Vec<Vec<u8>> = [SeasonKind::Rainy, SeasonKind::Dry, SeasonKind::Transitional]
            .into_iter()
            .map(|kind| MangsaService::by_season(kind).iter().map(|m| m.id).collect())
            .collect();

        for id in 1u8..=12 {
            assert!(lists.iter().any(|ids| ids.contains(&id)), "period {} unlisted", id);
        }
        // Katelu mentions both kemarau and hujan
        assert!(lists[0].contains(&3) && lists[1].contains(&3));
        assert!(!lists[2].contains(&3));
    }

    #[test]
    fn test_current_today_is_a_real_period() {
        let today = MangsaService::current(None);
        assert!((1..=12).contains(&today.id));
        let now = chrono::Local::now().date_naive();
        assert_eq!(today.id, resolver::resolve(now).id);
    }
}
