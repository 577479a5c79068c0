//! Property tests for the coalition analyzer.

use std::collections::HashSet;

use coalition_core::{
    rank_order, AggregationPolicy, AnalyzerConfig, CoalitionAnalyzer, MAX_SCORE, MIN_SCORE,
};
use electoral_rules::{IdeologyVector, PartyProfile};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Two to nine parties with a two-axis ideology; some may hold no seats.
fn arb_house() -> impl Strategy<Value = Vec<PartyProfile>> {
    prop::collection::vec((0u32..40, -10.0f64..=10.0, -10.0f64..=10.0), 2..9)
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(idx, (seats, x, y))| {
                    PartyProfile::new(format!("P{}", idx), seats, IdeologyVector::new(vec![x, y]))
                })
                .collect()
        })
        .prop_filter("house needs seats", |house: &Vec<PartyProfile>| {
            house.iter().any(|p| p.seats > 0)
        })
}

fn arb_aggregation() -> impl Strategy<Value = AggregationPolicy> {
    prop_oneof![Just(AggregationPolicy::Mean), Just(AggregationPolicy::WeakestLink)]
}

fn seat_total(house: &[PartyProfile]) -> u32 {
    house.iter().map(|p| p.seats).sum()
}

/// Brute-force count of seated subsets with a strict majority.
fn count_majorities(house: &[PartyProfile], max_size: usize) -> usize {
    let seated: Vec<u32> = house.iter().map(|p| p.seats).filter(|s| *s > 0).collect();
    let total = seat_total(house);
    (0u32..(1 << seated.len()))
        .filter(|mask| {
            let size = mask.count_ones() as usize;
            let seats: u32 = seated
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, s)| *s)
                .sum();
            (2..=max_size).contains(&size) && seats * 2 > total
        })
        .count()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Every reported coalition is a real majority of seated parties within
    /// the size limit.
    #[test]
    fn test_coalitions_are_viable(
        house in arb_house(),
        max_size in 2usize..6,
        aggregation in arb_aggregation(),
    ) {
        let total = seat_total(&house);
        let analyzer = CoalitionAnalyzer::new(
            AnalyzerConfig::default()
                .with_max_coalition_size(max_size)
                .with_aggregation(aggregation),
        );
        let coalitions = analyzer.find_viable_coalitions(&house, total).unwrap();

        for coalition in &coalitions {
            prop_assert!(coalition.is_viable());
            prop_assert!(u64::from(coalition.seats()) * 2 > u64::from(total));
            prop_assert!(coalition.size() >= 2 && coalition.size() <= max_size);

            let member_seats: u32 = house
                .iter()
                .filter(|p| coalition.contains(&p.party))
                .map(|p| p.seats)
                .sum();
            prop_assert_eq!(member_seats, coalition.seats());
            prop_assert!(house
                .iter()
                .filter(|p| coalition.contains(&p.party))
                .all(|p| p.seats > 0));
        }
    }

    /// Nothing is missed and nothing is reported twice.
    #[test]
    fn test_coalitions_are_complete_and_unique(house in arb_house(), max_size in 2usize..6) {
        let total = seat_total(&house);
        let analyzer = CoalitionAnalyzer::new(
            AnalyzerConfig::default().with_max_coalition_size(max_size),
        );
        let coalitions = analyzer.find_viable_coalitions(&house, total).unwrap();

        let keys: HashSet<_> = coalitions.iter().map(|c| c.canonical_key().to_vec()).collect();
        prop_assert_eq!(keys.len(), coalitions.len());
        prop_assert_eq!(coalitions.len(), count_majorities(&house, max_size));
    }

    /// Scores stay in range and the list is in ranking order.
    #[test]
    fn test_coalitions_are_scored_and_sorted(
        house in arb_house(),
        aggregation in arb_aggregation(),
    ) {
        let total = seat_total(&house);
        let analyzer = CoalitionAnalyzer::new(
            AnalyzerConfig::default().with_aggregation(aggregation),
        );
        let coalitions = analyzer.find_viable_coalitions(&house, total).unwrap();

        for coalition in &coalitions {
            let score = coalition.compatibility_score();
            prop_assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
            prop_assert!(coalition.weakest_pair_score() <= score + 1e-9);
        }
        for pair in coalitions.windows(2) {
            prop_assert!(rank_order(&pair[0], &pair[1]).is_le());
        }
    }

    /// Minimal winning coalitions are the viable coalitions in which every
    /// member is needed.
    #[test]
    fn test_minimal_winning_is_filtered_subset(house in arb_house()) {
        let total = seat_total(&house);
        let all = CoalitionAnalyzer::with_defaults()
            .find_viable_coalitions(&house, total)
            .unwrap();
        let minimal = CoalitionAnalyzer::new(
            AnalyzerConfig::default().with_minimal_winning_only(true),
        )
        .find_viable_coalitions(&house, total)
        .unwrap();

        let expected: Vec<_> = all
            .iter()
            .filter(|c| {
                house
                    .iter()
                    .filter(|p| c.contains(&p.party))
                    .all(|p| u64::from(c.seats() - p.seats) * 2 <= u64::from(total))
            })
            .collect();
        prop_assert_eq!(minimal.len(), expected.len());
        for (got, want) in minimal.iter().zip(expected) {
            prop_assert_eq!(got.members(), want.members());
        }
    }

    /// Same input, same output.
    #[test]
    fn test_analysis_is_deterministic(house in arb_house()) {
        let total = seat_total(&house);
        let analyzer = CoalitionAnalyzer::with_defaults();
        prop_assert_eq!(
            analyzer.analyze(&house, total).unwrap(),
            analyzer.analyze(&house, total).unwrap()
        );
    }
}
