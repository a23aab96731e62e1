//! End-to-end scenarios over the built-in catalog.

use std::sync::Arc;

use hara_engine::{
    classify, distribution, extract_ratings, AssessmentRequest, CategoryPairPolicy,
    CompatibilityEnforcement, CustomCombinationRegistry, EngineConfig, HaraEngine,
    ScenarioCombiner, SituationCatalog,
};
use hara_types::{
    AsilRating, ControllabilityLevel, ExposureLevel, HaraError, SeverityLevel, SituationCategory,
    SituationId,
};

fn engine() -> HaraEngine {
    HaraEngine::builtin().unwrap()
}

#[test]
fn urban_traffic_in_light_rain() {
    let combined = engine().combine_ids(&["URB-001", "ENV-001"], None).unwrap();
    assert_eq!(combined.exposure, ExposureLevel::E3);
    assert_eq!(combined.limiting, vec![SituationId::new("ENV-001")]);
    assert!(combined.rationale.contains("MIN(E4, E3) = E3"));
}

#[test]
fn highway_cruising_at_night() {
    let combined = engine().combine_ids(&["HWY-001", "ENV-006"], None).unwrap();
    assert_eq!(combined.exposure, ExposureLevel::E3);
}

#[test]
fn parking_on_ice() {
    let combined = engine().combine_ids(&["URB-005", "ENV-005"], None).unwrap();
    assert_eq!(combined.exposure, ExposureLevel::E1);
    assert_eq!(combined.limiting, vec![SituationId::new("ENV-005")]);
}

#[test]
fn worked_classifications() {
    assert_eq!(
        classify(SeverityLevel::S3, ExposureLevel::E2, ControllabilityLevel::C3),
        AsilRating::D
    );
    assert_eq!(
        classify(SeverityLevel::S2, ExposureLevel::E4, ControllabilityLevel::C2),
        AsilRating::B
    );
}

#[test]
fn combination_size_bounds() {
    let engine = engine();
    let none: [&str; 0] = [];
    assert_eq!(
        engine.combine_ids(&none, None).unwrap_err(),
        HaraError::InvalidCombinationSize { count: 0 }
    );
    assert_eq!(
        engine
            .combine_ids(&["URB-001", "ENV-001", "ENV-006", "CRT-001"], None)
            .unwrap_err(),
        HaraError::InvalidCombinationSize { count: 4 }
    );
}

#[test]
fn catalog_examples_reproduce() {
    let catalog = Arc::new(SituationCatalog::builtin().unwrap());
    let combiner = ScenarioCombiner::new(Arc::clone(&catalog));

    assert!(!catalog.examples().is_empty());
    for example in catalog.examples() {
        let combined = combiner
            .combine_ids(&example.scenario_ids, Some(&example.name))
            .unwrap();
        assert_eq!(combined.exposure, example.combined_exposure, "{}", example.name);
        assert_eq!(combined.name, example.name);
    }
}

#[test]
fn registry_is_last_write_wins() {
    let registry = CustomCombinationRegistry::new();
    let combiner = ScenarioCombiner::new(Arc::new(SituationCatalog::builtin().unwrap()));

    registry
        .register(&combiner, "Delivery route", &["URB-002", "VST-007"])
        .unwrap();
    registry
        .register(&combiner, "Delivery route", &["URB-002", "ENV-009"])
        .unwrap();

    let resolved = registry.resolve("Delivery route").unwrap();
    assert_eq!(resolved.exposure, ExposureLevel::E1);
    assert_eq!(registry.names().unwrap(), vec!["Delivery route"]);
}

#[test]
fn full_assessment_flow() {
    let engine = engine();
    let upstream = "Hazard: unintended braking on the highway at night.\n\
                    Severity (S): S3\nExposure (E): E4\nControllability (C): C3";
    let ratings = extract_ratings(upstream).unwrap();

    let assessment = engine
        .assess(AssessmentRequest::new(
            "Unintended braking",
            ["HWY-001", "ENV-006"],
            ratings.severity,
            ratings.controllability,
        ))
        .unwrap();

    // Exposure comes from the combination, not from the upstream text
    assert_eq!(assessment.exposure(), ExposureLevel::E3);
    assert_eq!(assessment.asil, AsilRating::D);
    assert!(assessment.requires_safety_goal());

    let second = engine
        .assess(AssessmentRequest::new(
            "Dashboard flicker",
            ["URB-001"],
            SeverityLevel::S1,
            ControllabilityLevel::C1,
        ))
        .unwrap();

    let summary = distribution([&assessment, &second]);
    assert_eq!(summary.total(), 2);
    assert_eq!(summary.safety_relevant(), 1);
    assert_eq!(summary.count(AsilRating::QM), 1);
}

#[test]
fn rejecting_engine_from_config() {
    let mut config = EngineConfig::default();
    config.compatibility.enforcement = CompatibilityEnforcement::Reject;
    config.compatibility.incompatible_pairs =
        vec![(SituationCategory::Urban, SituationCategory::Highway)];

    let engine = HaraEngine::from_config(&config).unwrap();
    let err = engine.combine_ids(&["URB-005", "HWY-001"], None).unwrap_err();
    assert!(matches!(err, HaraError::IncompatibleSituations { .. }));

    let advisory = HaraEngine::builtin().unwrap().with_policy(
        CategoryPairPolicy::from_pairs(config.compatibility.incompatible_pairs.clone()),
        CompatibilityEnforcement::Advisory,
    );
    let combined = advisory.combine_ids(&["URB-005", "HWY-001"], None).unwrap();
    assert!(combined.has_advisories());
}

#[test]
fn catalog_from_file_with_integrity_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"{
            "basic_scenarios": {
                "urban_driving": [
                    {"id": "U-1", "name": "Town", "exposure": "E4", "rationale": "daily"},
                    {"id": "U-1", "name": "Town again", "exposure": "E3", "rationale": "dup"}
                ]
            }
        }"#,
    )
    .unwrap();

    let mut config = EngineConfig::default();
    config.catalog.path = Some(path);
    let err = HaraEngine::from_config(&config).unwrap_err();
    assert!(err.to_string().contains("U-1"), "{err}");
}
