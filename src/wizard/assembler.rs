use serde::{Deserialize, Serialize};

use crate::{
    db::models::{Brew, ReviewScores, ReviewSubmission},
    error::ReviewError,
    wizard::store::{AnswerStore, Section},
};

/// Where the reviewed coffee was brewed, as selected on the terminal step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum ReviewLocation {
    Home(String),
    Cafe(String),
}

impl ReviewLocation {
    pub fn parse(kind: &str, id: &str) -> Result<Self, ReviewError> {
        match kind {
            "home" => Ok(ReviewLocation::Home(id.to_string())),
            "cafe" => Ok(ReviewLocation::Cafe(id.to_string())),
            other => Err(ReviewError::Validation(format!(
                "unknown review location type '{other}'"
            ))),
        }
    }
}

/// Flattens a complete answer store plus brew/location metadata into one
/// immutable submission record.
///
/// Requires every section to have been explicitly set at least once; default
/// slider values left untouched do not count. Ranges are not re-checked here,
/// the persistence layer validates them before insert. The overall section
/// contributes its quality as `overall_score` and its notes as the review's
/// flavor notes.
pub fn assemble(
    location: ReviewLocation,
    brew: Brew,
    answers: &AnswerStore,
) -> Result<ReviewSubmission, ReviewError> {
    let missing = answers.missing_sections();
    if !missing.is_empty() {
        return Err(ReviewError::IncompleteReview(
            missing.iter().map(|s| s.as_str().to_string()).collect(),
        ));
    }

    let aroma = answers.get_answer(Section::Aroma);
    let acidity = answers.get_answer(Section::Acidity);
    let sweetness = answers.get_answer(Section::Sweetness);
    let body = answers.get_answer(Section::Body);
    let finish = answers.get_answer(Section::Finish);
    let overall = answers.get_answer(Section::Overall);

    let flavor_notes = if overall.notes.trim().is_empty() {
        None
    } else {
        Some(overall.notes.clone())
    };

    let scores = ReviewScores {
        aroma_quality: aroma.quality,
        aroma_intensity: aroma.intensity,
        acidity_quality: acidity.quality,
        acidity_intensity: acidity.intensity,
        sweetness_quality: sweetness.quality,
        sweetness_intensity: sweetness.intensity,
        body_quality: body.quality,
        body_intensity: body.intensity,
        finish_quality: finish.quality,
        finish_intensity: finish.intensity,
        overall_score: overall.quality,
        brew,
        flavor_notes,
    };

    Ok(match location {
        ReviewLocation::Home(coffee_id) => ReviewSubmission::Home { coffee_id, scores },
        ReviewLocation::Cafe(cafe_id) => ReviewSubmission::Cafe { cafe_id, scores },
    })
}
