use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// Brew methods, serialized under the exact variant names the review schema
/// uses on the wire and in the database.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Brew {
    Coldbrew,
    Espresso,
    Frenchpress,
    MokaPot,
}

impl Brew {
    pub fn as_str(&self) -> &'static str {
        match self {
            Brew::Coldbrew => "Coldbrew",
            Brew::Espresso => "Espresso",
            Brew::Frenchpress => "Frenchpress",
            Brew::MokaPot => "MokaPot",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ReviewError> {
        match value {
            "Coldbrew" => Ok(Brew::Coldbrew),
            "Espresso" => Ok(Brew::Espresso),
            "Frenchpress" => Ok(Brew::Frenchpress),
            "MokaPot" => Ok(Brew::MokaPot),
            other => Err(ReviewError::Validation(format!(
                "unknown brew method '{other}'"
            ))),
        }
    }
}

impl Default for Brew {
    fn default() -> Self {
        Brew::Coldbrew
    }
}

/// The flattened score fields shared by both submission variants. Field
/// names stay snake_case to match the persisted review schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewScores {
    pub aroma_quality: u8,
    pub aroma_intensity: u8,

    pub acidity_quality: u8,
    pub acidity_intensity: u8,

    pub sweetness_quality: u8,
    pub sweetness_intensity: u8,

    pub body_quality: u8,
    pub body_intensity: u8,

    pub finish_quality: u8,
    pub finish_intensity: u8,

    pub overall_score: u8,

    pub brew: Brew,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_notes: Option<String>,
}

impl ReviewScores {
    /// Every rating with its wire name, for range validation and messages.
    pub fn rating_fields(&self) -> [(&'static str, u8); 11] {
        [
            ("aroma_quality", self.aroma_quality),
            ("aroma_intensity", self.aroma_intensity),
            ("acidity_quality", self.acidity_quality),
            ("acidity_intensity", self.acidity_intensity),
            ("sweetness_quality", self.sweetness_quality),
            ("sweetness_intensity", self.sweetness_intensity),
            ("body_quality", self.body_quality),
            ("body_intensity", self.body_intensity),
            ("finish_quality", self.finish_quality),
            ("finish_intensity", self.finish_intensity),
            ("overall_score", self.overall_score),
        ]
    }
}

/// A completed review ready for persistence, discriminated by where the
/// coffee was brewed. Exactly one of `coffeeId`/`cafeId` exists per variant;
/// the other is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ReviewSubmission {
    #[serde(rename = "home")]
    Home {
        #[serde(rename = "coffeeId")]
        coffee_id: String,
        #[serde(flatten)]
        scores: ReviewScores,
    },
    #[serde(rename = "cafe")]
    Cafe {
        #[serde(rename = "cafeId")]
        cafe_id: String,
        #[serde(flatten)]
        scores: ReviewScores,
    },
}

impl ReviewSubmission {
    pub fn scores(&self) -> &ReviewScores {
        match self {
            ReviewSubmission::Home { scores, .. } => scores,
            ReviewSubmission::Cafe { scores, .. } => scores,
        }
    }

    pub fn type_str(&self) -> &'static str {
        match self {
            ReviewSubmission::Home { .. } => "home",
            ReviewSubmission::Cafe { .. } => "cafe",
        }
    }

    pub fn coffee_id(&self) -> Option<&str> {
        match self {
            ReviewSubmission::Home { coffee_id, .. } => Some(coffee_id),
            ReviewSubmission::Cafe { .. } => None,
        }
    }

    pub fn cafe_id(&self) -> Option<&str> {
        match self {
            ReviewSubmission::Cafe { cafe_id, .. } => Some(cafe_id),
            ReviewSubmission::Home { .. } => None,
        }
    }
}

/// A persisted review as the browser lists it. `location_name` is the
/// referenced coffee or café name, joined in by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    #[serde(flatten)]
    pub submission: ReviewSubmission,
    pub location_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> ReviewScores {
        ReviewScores {
            aroma_quality: 5,
            aroma_intensity: 5,
            acidity_quality: 5,
            acidity_intensity: 5,
            sweetness_quality: 5,
            sweetness_intensity: 5,
            body_quality: 5,
            body_intensity: 5,
            finish_quality: 5,
            finish_intensity: 5,
            overall_score: 5,
            brew: Brew::Espresso,
            flavor_notes: None,
        }
    }

    #[test]
    fn home_submission_serializes_without_cafe_id() {
        let submission = ReviewSubmission::Home {
            coffee_id: "coffee-123".to_string(),
            scores: scores(),
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["type"], "home");
        assert_eq!(value["coffeeId"], "coffee-123");
        assert_eq!(value["brew"], "Espresso");
        assert_eq!(value["aroma_quality"], 5);
        assert_eq!(value["aroma_intensity"], 5);
        assert_eq!(value["overall_score"], 5);
        assert!(value.get("cafeId").is_none());
        assert!(value.get("flavor_notes").is_none());
    }

    #[test]
    fn cafe_submission_serializes_without_coffee_id() {
        let submission = ReviewSubmission::Cafe {
            cafe_id: "cafe-42".to_string(),
            scores: ReviewScores {
                brew: Brew::Coldbrew,
                flavor_notes: Some("stone fruit".to_string()),
                ..scores()
            },
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["type"], "cafe");
        assert_eq!(value["cafeId"], "cafe-42");
        assert_eq!(value["brew"], "Coldbrew");
        assert_eq!(value["flavor_notes"], "stone fruit");
        assert!(value.get("coffeeId").is_none());
    }

    #[test]
    fn brew_round_trips_through_strings() {
        for brew in [
            Brew::Coldbrew,
            Brew::Espresso,
            Brew::Frenchpress,
            Brew::MokaPot,
        ] {
            assert_eq!(Brew::parse(brew.as_str()).unwrap(), brew);
        }
        assert!(Brew::parse("Percolator").is_err());
    }
}
