use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{DogViewError, DogViewResult};

/// Size class of a dog breed. Drives both the perspective zoom and the acuity blur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
    #[default]
    Unknown,
}

impl SizeCategory {
    /// The categories a classifier is allowed to answer with.
    pub const CLASSIFIABLE: [SizeCategory; 3] = [Self::Small, Self::Medium, Self::Large];

    pub fn name(self) -> &'static str {
        match self {
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::Large => "LARGE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SizeCategory {
    type Err = DogViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SMALL" => Ok(Self::Small),
            "MEDIUM" => Ok(Self::Medium),
            "LARGE" => Ok(Self::Large),
            "UNKNOWN" => Ok(Self::Unknown),
            other => Err(DogViewError::validation(format!(
                "unknown size category '{other}'"
            ))),
        }
    }
}

/// Result of classifying a breed. Always valid once constructed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedAnalysis {
    #[serde(rename = "size")]
    pub size_category: SizeCategory,
    pub reasoning: String,
    pub typical_height_cm: f64,
}

impl BreedAnalysis {
    pub const FALLBACK_REASONING: &'static str =
        "We couldn't reach our dog database, so we're assuming a happy medium!";
    pub const FALLBACK_HEIGHT_CM: f64 = 40.0;

    pub fn new(
        size_category: SizeCategory,
        reasoning: impl Into<String>,
        typical_height_cm: f64,
    ) -> DogViewResult<Self> {
        let analysis = Self {
            size_category,
            reasoning: reasoning.into(),
            typical_height_cm,
        };
        analysis.validate()?;
        Ok(analysis)
    }

    /// Used whenever the classifier cannot produce a usable answer.
    pub fn fallback() -> Self {
        Self {
            size_category: SizeCategory::Medium,
            reasoning: Self::FALLBACK_REASONING.to_owned(),
            typical_height_cm: Self::FALLBACK_HEIGHT_CM,
        }
    }

    pub fn validate(&self) -> DogViewResult<()> {
        if !SizeCategory::CLASSIFIABLE.contains(&self.size_category) {
            return Err(DogViewError::validation(
                "size must be one of SMALL, MEDIUM, LARGE",
            ));
        }
        if self.reasoning.trim().is_empty() {
            return Err(DogViewError::validation("reasoning must be non-empty"));
        }
        if !self.typical_height_cm.is_finite() || self.typical_height_cm <= 0.0 {
            return Err(DogViewError::validation(
                "typicalHeightCm must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
