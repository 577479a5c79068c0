//! Property tests for the D'Hondt allocator.

use electoral_rules::{
    allocate, Allocation, AllocationConfig, InvalidInputError, PartyVotes, TieBreak,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Between 1 and 15 parties with up to a million votes each.
fn arb_votes() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..1_000_000, 1..15)
}

fn arb_tie_break() -> impl Strategy<Value = TieBreak> {
    prop_oneof![
        Just(TieBreak::ListOrder),
        Just(TieBreak::MostVotes),
        any::<u64>().prop_map(|seed| TieBreak::Lot { seed }),
    ]
}

/// Thresholds up to 20%, with the kiesdeler and round shares mixed in.
fn arb_threshold() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(1.0 / 150.0),
        (1u32..20).prop_map(|pct| f64::from(pct) / 100.0),
        0.0f64..0.2,
    ]
}

fn to_parties(votes: &[u64]) -> Vec<PartyVotes> {
    votes
        .iter()
        .enumerate()
        .map(|(idx, v)| PartyVotes::new(format!("P{}", idx), *v))
        .collect()
}

fn votes_total(allocation: &Allocation) -> u64 {
    allocation.seats.iter().map(|s| s.votes).sum()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    /// Every valid allocation hands out exactly `total_seats` seats.
    #[test]
    fn test_seats_always_sum_to_total(
        votes in arb_votes(),
        total_seats in 1u32..200,
        tie_break in arb_tie_break(),
        threshold in arb_threshold(),
    ) {
        prop_assume!(votes.iter().any(|v| *v > 0));
        let config = AllocationConfig::default()
            .with_tie_break(tie_break)
            .with_threshold(threshold);

        let result = allocate(&to_parties(&votes), total_seats, &config);
        prop_assume!(!matches!(result, Err(InvalidInputError::NoEligibleParties { .. })));
        let allocation = result.unwrap();

        let total_votes = votes_total(&allocation) as f64;
        for seat in &allocation.seats {
            if allocation.excluded.contains(&seat.party) {
                prop_assert_eq!(seat.seats, 0);
                prop_assert!((seat.votes as f64 / total_votes) < threshold);
            }
        }

        prop_assert_eq!(allocation.seat_total(), u64::from(total_seats));
        prop_assert_eq!(allocation.rounds.len(), total_seats as usize);
    }

    /// Parties without votes never win a seat.
    #[test]
    fn test_zero_vote_parties_win_nothing(votes in arb_votes(), total_seats in 1u32..200) {
        prop_assume!(votes.iter().any(|v| *v > 0));

        let allocation = allocate(&to_parties(&votes), total_seats, &AllocationConfig::default()).unwrap();

        for seat in &allocation.seats {
            if seat.votes == 0 {
                prop_assert_eq!(seat.seats, 0);
            }
        }
    }

    /// Adding votes to one party never costs it a seat.
    #[test]
    fn test_more_votes_never_fewer_seats(
        votes in arb_votes(),
        pick in any::<prop::sample::Index>(),
        extra in 0u64..200_000,
        total_seats in 1u32..200,
        tie_break in arb_tie_break(),
        threshold in arb_threshold(),
    ) {
        prop_assume!(votes.iter().any(|v| *v > 0));
        let target = pick.index(votes.len());
        let config = AllocationConfig::default()
            .with_tie_break(tie_break)
            .with_threshold(threshold);

        let before = allocate(&to_parties(&votes), total_seats, &config);
        let mut boosted = votes.clone();
        boosted[target] += extra;
        let after = allocate(&to_parties(&boosted), total_seats, &config);

        // Extra votes can push every other party under the threshold.
        prop_assume!(before.is_ok() && after.is_ok());
        let (before, after) = (before.unwrap(), after.unwrap());

        prop_assert!(after.seats[target].seats >= before.seats[target].seats);
    }

    /// Identical input and configuration give identical output.
    #[test]
    fn test_allocation_is_deterministic(
        votes in arb_votes(),
        total_seats in 1u32..200,
        tie_break in arb_tie_break(),
        threshold in arb_threshold(),
    ) {
        prop_assume!(votes.iter().any(|v| *v > 0));
        let parties = to_parties(&votes);
        let config = AllocationConfig::default()
            .with_tie_break(tie_break)
            .with_threshold(threshold);

        let first = allocate(&parties, total_seats, &config);
        let second = allocate(&parties, total_seats, &config);

        prop_assert_eq!(first, second);
    }
}
