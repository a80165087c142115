//! Breed name to size class, via one structured model call.

use serde_json::{Value, json};

use crate::{
    ai::client::{GenerateRequest, GenerativeBackend},
    foundation::error::{DogViewError, DogViewResult},
    model::BreedAnalysis,
};

pub fn classification_prompt(breed: &str) -> String {
    format!(
        "Determine the typical size category for a \"{breed}\" dog. \
         Classify as SMALL (e.g., Chihuahua, Pug), MEDIUM (e.g., Beagle, Border Collie), \
         or LARGE (e.g., German Shepherd, Great Dane). \
         Also estimate typical shoulder height in cm."
    )
}

/// Schema the model must answer with.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "size": { "type": "STRING", "enum": ["SMALL", "MEDIUM", "LARGE"] },
            "reasoning": { "type": "STRING" },
            "typicalHeightCm": { "type": "NUMBER" }
        },
        "required": ["size", "reasoning", "typicalHeightCm"]
    })
}

pub fn classification_request(breed: &str) -> GenerateRequest {
    GenerateRequest {
        response_schema: Some(response_schema()),
        ..GenerateRequest::text(classification_prompt(breed))
    }
}

/// Parse and validate the model's JSON answer.
pub fn parse_analysis(text: &str) -> DogViewResult<BreedAnalysis> {
    let analysis: BreedAnalysis = serde_json::from_str(text.trim())
        .map_err(|e| DogViewError::remote(format!("malformed classification: {e}")))?;
    analysis
        .validate()
        .map_err(|e| DogViewError::remote(format!("invalid classification: {e}")))?;
    Ok(analysis)
}

/// Classify a breed. Never fails: any remote or validation problem yields
/// [`BreedAnalysis::fallback`].
#[tracing::instrument(skip(backend), fields(backend = backend.name()))]
pub async fn classify(backend: &dyn GenerativeBackend, breed: &str) -> BreedAnalysis {
    let outcome = match backend.generate(&classification_request(breed)).await {
        Ok(text) => parse_analysis(&text),
        Err(e) => Err(e),
    };
    match outcome {
        Ok(analysis) => {
            tracing::info!(size = %analysis.size_category, height_cm = analysis.typical_height_cm, "breed classified");
            analysis
        }
        Err(e) => {
            tracing::warn!(error = %e, "breed classification failed; assuming medium");
            BreedAnalysis::fallback()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ai/breed.rs"]
mod tests;
