//! Property tests: combination and classification laws over the built-in
//! catalog and the full rating domain.

use std::sync::{Arc, LazyLock};

use hara_engine::{classify, classify_triple, ScenarioCombiner, SituationCatalog};
use hara_types::{
    AsilRating, ControllabilityLevel, ExposureLevel, HaraError, RatingTriple, SeverityLevel,
    MAX_COMBINATION_SIZE,
};
use proptest::prelude::*;
use proptest::sample::{select, subsequence};

static CATALOG: LazyLock<Arc<SituationCatalog>> =
    LazyLock::new(|| Arc::new(SituationCatalog::builtin().unwrap()));

static IDS: LazyLock<Vec<String>> =
    LazyLock::new(|| CATALOG.iter().map(|s| s.id.to_string()).collect());

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn combiner() -> ScenarioCombiner {
    ScenarioCombiner::new(Arc::clone(&CATALOG))
}

/// 1 to 3 distinct catalog ids, in random order.
fn arb_selection() -> impl Strategy<Value = Vec<String>> {
    subsequence(IDS.clone(), 1..=MAX_COMBINATION_SIZE).prop_shuffle()
}

fn arb_severity() -> impl Strategy<Value = SeverityLevel> {
    select(SeverityLevel::ALL)
}

fn arb_exposure() -> impl Strategy<Value = ExposureLevel> {
    select(ExposureLevel::ALL)
}

fn arb_controllability() -> impl Strategy<Value = ControllabilityLevel> {
    select(ControllabilityLevel::ALL)
}

fn arb_triple() -> impl Strategy<Value = RatingTriple> {
    (arb_severity(), arb_exposure(), arb_controllability())
        .prop_map(|(s, e, c)| RatingTriple::new(s, e, c))
}

// ---------------------------------------------------------------------------
// Combination
// ---------------------------------------------------------------------------

proptest! {
    /// Combined exposure is the minimum constituent exposure.
    #[test]
    fn combined_exposure_is_minimum(ids in arb_selection()) {
        let combined = combiner().combine_ids(&ids, None).unwrap();
        let min = ids
            .iter()
            .map(|id| CATALOG.find_by_id(id).unwrap().exposure)
            .min()
            .unwrap();
        prop_assert_eq!(combined.exposure, min);
        prop_assert!(combined.constituents.iter().all(|s| s.exposure >= combined.exposure));
    }

    /// Every limiting constituent has the combined exposure, and every
    /// constituent with that exposure is limiting.
    #[test]
    fn limiting_constituents_are_exactly_the_minimal_ones(ids in arb_selection()) {
        let combined = combiner().combine_ids(&ids, None).unwrap();
        let minimal: Vec<_> = combined
            .constituents
            .iter()
            .filter(|s| s.exposure == combined.exposure)
            .map(|s| s.id.clone())
            .collect();
        prop_assert!(!minimal.is_empty());
        prop_assert_eq!(&combined.limiting, &minimal);
    }

    /// A single situation combines to its own exposure.
    #[test]
    fn single_situation_is_identity(id in select(IDS.clone())) {
        let combined = combiner().combine_ids(&[&id], None).unwrap();
        prop_assert_eq!(combined.exposure, CATALOG.find_by_id(&id).unwrap().exposure);
        prop_assert_eq!(combined.constituents.len(), 1);
    }

    /// Input order never affects the combined exposure.
    #[test]
    fn combination_is_commutative(ids in arb_selection()) {
        let mut sorted = ids.clone();
        sorted.sort();
        let a = combiner().combine_ids(&ids, None).unwrap();
        let b = combiner().combine_ids(&sorted, None).unwrap();
        prop_assert_eq!(a.exposure, b.exposure);
    }

    /// Constituents keep the caller's order.
    #[test]
    fn constituents_keep_input_order(ids in arb_selection()) {
        let combined = combiner().combine_ids(&ids, None).unwrap();
        let order: Vec<String> = combined.constituent_ids().map(|id| id.to_string()).collect();
        prop_assert_eq!(order, ids);
    }

    /// More than three situations is always rejected.
    #[test]
    fn oversized_combinations_fail(
        ids in subsequence(IDS.clone(), (MAX_COMBINATION_SIZE + 1)..=8),
    ) {
        let err = combiner().combine_ids(&ids, None).unwrap_err();
        prop_assert_eq!(err, HaraError::InvalidCombinationSize { count: ids.len() });
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

proptest! {
    /// Classification is pure.
    #[test]
    fn classification_is_deterministic(triple in arb_triple()) {
        prop_assert_eq!(classify_triple(&triple), classify_triple(&triple));
    }

    /// S0, E0 or C0 always gives QM.
    #[test]
    fn lowest_level_in_any_dimension_is_qm(
        e in arb_exposure(),
        c in arb_controllability(),
        s in arb_severity(),
    ) {
        prop_assert_eq!(classify(SeverityLevel::S0, e, c), AsilRating::QM);
        prop_assert_eq!(classify(s, ExposureLevel::E0, c), AsilRating::QM);
        prop_assert_eq!(classify(s, e, ControllabilityLevel::C0), AsilRating::QM);
    }

    /// Raising any one input never lowers the rating.
    #[test]
    fn classification_is_monotonic(a in arb_triple(), b in arb_triple()) {
        if a.severity <= b.severity
            && a.exposure <= b.exposure
            && a.controllability <= b.controllability
        {
            prop_assert!(classify_triple(&a) <= classify_triple(&b), "{} vs {}", a, b);
        }
    }

    /// Classifying a combination depends only on its exposure.
    #[test]
    fn classification_of_combination_uses_min_exposure(
        ids in arb_selection(),
        s in arb_severity(),
        c in arb_controllability(),
    ) {
        let combined = combiner().combine_ids(&ids, None).unwrap();
        let worst_case = combined
            .constituents
            .iter()
            .map(|situation| classify(s, situation.exposure, c))
            .max()
            .unwrap();
        prop_assert!(classify(s, combined.exposure, c) <= worst_case);
    }
}
