use super::*;
use std::sync::Arc;
use std::thread;

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

mod publish {
    use super::*;

    #[test]
    fn test_publish_opens_a_slot() {
        let ledger = AvailabilityLedger::new();
        ledger.publish("amy", day("2024-03-01")).unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.is_empty());
    }

    #[test]
    fn test_duplicate_pair_is_rejected() {
        let ledger = AvailabilityLedger::new();
        ledger.publish("amy", day("2024-03-01")).unwrap();
        let err = ledger.publish("amy", day("2024-03-01")).unwrap_err();
        assert_eq!(
            err,
            AvailabilityError::AlreadyExists {
                provider_id: "amy".to_string(),
                day: day("2024-03-01"),
            }
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_same_provider_different_days_are_distinct_slots() {
        let ledger = AvailabilityLedger::new();
        ledger.publish("amy", day("2024-03-01")).unwrap();
        ledger.publish("amy", day("2024-03-02")).unwrap();
        assert_eq!(ledger.len(), 2);
    }
}

mod find_providers {
    use super::*;

    #[test]
    fn test_returns_providers_ascending() {
        let ledger = AvailabilityLedger::new();
        ledger.publish("zed", day("2024-03-01")).unwrap();
        ledger.publish("amy", day("2024-03-01")).unwrap();
        ledger.publish("bob", day("2024-03-01")).unwrap();

        let providers = ledger.find_providers(day("2024-03-01")).unwrap();
        assert_eq!(providers, vec!["amy", "bob", "zed"]);
    }

    #[test]
    fn test_other_days_are_excluded() {
        let ledger = AvailabilityLedger::new();
        ledger.publish("amy", day("2024-03-01")).unwrap();
        ledger.publish("bob", day("2024-03-02")).unwrap();

        assert_eq!(ledger.find_providers(day("2024-03-01")).unwrap(), vec!["amy"]);
        assert_eq!(ledger.find_providers(day("2024-03-02")).unwrap(), vec!["bob"]);
        assert!(ledger.find_providers(day("2024-03-03")).unwrap().is_empty());
    }

    #[test]
    fn test_find_is_side_effect_free() {
        let ledger = AvailabilityLedger::new();
        ledger.publish("amy", day("2024-03-01")).unwrap();
        ledger.find_providers(day("2024-03-01")).unwrap();
        ledger.find_providers(day("2024-03-01")).unwrap();
        assert_eq!(ledger.len(), 1);
    }
}

mod try_consume_any {
    use super::*;

    #[test]
    fn test_picks_lexicographically_smallest_provider() {
        let ledger = AvailabilityLedger::new();
        ledger.publish("bob", day("2024-03-01")).unwrap();
        ledger.publish("amy", day("2024-03-01")).unwrap();
        ledger.publish("zed", day("2024-03-01")).unwrap();

        assert_eq!(
            ledger.try_consume_any(day("2024-03-01")).unwrap(),
            Some("amy".to_string())
        );
        assert_eq!(
            ledger.try_consume_any(day("2024-03-01")).unwrap(),
            Some("bob".to_string())
        );
        assert_eq!(
            ledger.try_consume_any(day("2024-03-01")).unwrap(),
            Some("zed".to_string())
        );
        assert_eq!(ledger.try_consume_any(day("2024-03-01")).unwrap(), None);
    }

    #[test]
    fn test_empty_day_returns_none_without_mutation() {
        let ledger = AvailabilityLedger::new();
        ledger.publish("amy", day("2024-03-02")).unwrap();

        assert_eq!(ledger.try_consume_any(day("2024-03-01")).unwrap(), None);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_consumed_slot_is_gone_from_search() {
        let ledger = AvailabilityLedger::new();
        ledger.publish("amy", day("2024-03-01")).unwrap();
        ledger.try_consume_any(day("2024-03-01")).unwrap();
        assert!(ledger.find_providers(day("2024-03-01")).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_consumers_each_win_a_distinct_slot() {
        let ledger = Arc::new(AvailabilityLedger::new());
        let d = day("2024-03-01");
        for name in ["a", "b", "c", "d", "e"] {
            ledger.publish(name, d).unwrap();
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || ledger.try_consume_any(d).unwrap())
            })
            .collect();

        let mut winners: Vec<String> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .collect();
        winners.sort();

        // 5 slots, 8 contenders: exactly 5 wins, all distinct providers.
        assert_eq!(winners, vec!["a", "b", "c", "d", "e"]);
        assert!(ledger.is_empty());
    }
}
