use super::*;
use serde_json::json;

#[test]
fn size_parses_case_insensitively() {
    assert_eq!("small".parse::<SizeCategory>().unwrap(), SizeCategory::Small);
    assert_eq!(" Large ".parse::<SizeCategory>().unwrap(), SizeCategory::Large);
    assert!("huge".parse::<SizeCategory>().is_err());
}

#[test]
fn analysis_deserializes_remote_schema() {
    let a: BreedAnalysis = serde_json::from_value(json!({
        "size": "SMALL",
        "reasoning": "Tiny and mighty.",
        "typicalHeightCm": 20
    }))
    .unwrap();
    assert_eq!(a.size_category, SizeCategory::Small);
    assert_eq!(a.typical_height_cm, 20.0);
    a.validate().unwrap();
}

#[test]
fn analysis_rejects_unknown_empty_and_nonpositive() {
    assert!(BreedAnalysis::new(SizeCategory::Unknown, "x", 10.0).is_err());
    assert!(BreedAnalysis::new(SizeCategory::Small, "  ", 10.0).is_err());
    assert!(BreedAnalysis::new(SizeCategory::Small, "x", 0.0).is_err());
    assert!(BreedAnalysis::new(SizeCategory::Small, "x", f64::NAN).is_err());
}

#[test]
fn fallback_is_medium_forty() {
    let f = BreedAnalysis::fallback();
    assert_eq!(f.size_category, SizeCategory::Medium);
    assert_eq!(f.typical_height_cm, 40.0);
    assert_eq!(f.reasoning, BreedAnalysis::FALLBACK_REASONING);
    f.validate().unwrap();
}
