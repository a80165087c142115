use super::*;
use crate::{ai::client::ScriptedBackend, model::SizeCategory};

#[test]
fn prompt_names_the_breed_and_examples() {
    let p = classification_prompt("Shiba Inu");
    assert!(p.starts_with("Determine the typical size category for a \"Shiba Inu\" dog."));
    assert!(p.contains("SMALL (e.g., Chihuahua, Pug)"));
    assert!(p.contains("shoulder height in cm"));
}

#[test]
fn request_asks_for_schema_json() {
    let req = classification_request("Pug");
    let schema = req.response_schema.unwrap();
    assert_eq!(
        schema["properties"]["size"]["enum"],
        json!(["SMALL", "MEDIUM", "LARGE"])
    );
    assert_eq!(schema["required"].as_array().unwrap().len(), 3);
}

#[test]
fn parse_accepts_valid_answer() {
    let a = parse_analysis(r#"{"size":"SMALL","reasoning":"Tiny.","typicalHeightCm":20}"#).unwrap();
    assert_eq!(a.size_category, SizeCategory::Small);
    assert_eq!(a.typical_height_cm, 20.0);
}

#[test]
fn parse_rejects_bad_answers() {
    for text in [
        "not json",
        r#"{"size":"HUGE","reasoning":"x","typicalHeightCm":20}"#,
        r#"{"size":"UNKNOWN","reasoning":"x","typicalHeightCm":20}"#,
        r#"{"size":"SMALL","reasoning":"","typicalHeightCm":20}"#,
        r#"{"size":"SMALL","reasoning":"x","typicalHeightCm":0}"#,
        r#"{"size":"SMALL","reasoning":"x","typicalHeightCm":-3}"#,
        r#"{"size":"SMALL","reasoning":"x"}"#,
    ] {
        assert!(matches!(parse_analysis(text), Err(DogViewError::Remote(_))), "{text}");
    }
}

#[tokio::test]
async fn classify_returns_model_answer() {
    let backend = ScriptedBackend::new([Ok(
        r#"{"size":"LARGE","reasoning":"Big herder.","typicalHeightCm":62}"#.to_owned(),
    )]);
    let a = classify(&backend, "German Shepherd").await;
    assert_eq!(a.size_category, SizeCategory::Large);
    assert_eq!(backend.requests().len(), 1);
}

#[tokio::test]
async fn classify_falls_back_on_any_failure() {
    let backend = ScriptedBackend::new([
        Err(DogViewError::remote("timeout")),
        Ok(r#"{"size":"TINY","reasoning":"?","typicalHeightCm":5}"#.to_owned()),
    ]);
    assert_eq!(classify(&backend, "Pug").await, BreedAnalysis::fallback());
    assert_eq!(classify(&backend, "Pug").await, BreedAnalysis::fallback());

    let fb = BreedAnalysis::fallback();
    assert_eq!(fb.size_category, SizeCategory::Medium);
    assert_eq!(fb.typical_height_cm, 40.0);
}
