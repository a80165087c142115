use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DogViewError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(DogViewError::media("x").to_string().contains("media error:"));
    assert!(DogViewError::render("x").to_string().contains("render error:"));
    assert!(DogViewError::remote("x").to_string().contains("remote error:"));
    assert!(
        DogViewError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DogViewError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: DogViewError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, DogViewError::Serde(_)));
}
