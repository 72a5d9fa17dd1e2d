use serde::{Deserialize, Serialize};

use crate::error::ReviewError;

/// The six scored sections, in step order.
pub const SECTIONS: [Section; 6] = [
    Section::Aroma,
    Section::Acidity,
    Section::Sweetness,
    Section::Body,
    Section::Finish,
    Section::Overall,
];

/// Default slider position for quality and intensity.
pub const DEFAULT_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Aroma,
    Acidity,
    Sweetness,
    Body,
    Finish,
    Overall,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Aroma => "aroma",
            Section::Acidity => "acidity",
            Section::Sweetness => "sweetness",
            Section::Body => "body",
            Section::Finish => "finish",
            Section::Overall => "overall",
        }
    }

    /// Parse a section key coming over IPC. Unknown keys are a programmer
    /// error on the frontend side and fail without touching any state.
    pub fn parse(value: &str) -> Result<Self, ReviewError> {
        match value {
            "aroma" => Ok(Section::Aroma),
            "acidity" => Ok(Section::Acidity),
            "sweetness" => Ok(Section::Sweetness),
            "body" => Ok(Section::Body),
            "finish" => Ok(Section::Finish),
            "overall" => Ok(Section::Overall),
            other => Err(ReviewError::InvalidSection(other.to_string())),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One section's answer. For the overall section `quality` holds the overall
/// score and `intensity` is ignored downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SectionAnswer {
    pub quality: u8,
    pub intensity: u8,
    pub notes: String,
}

impl Default for SectionAnswer {
    fn default() -> Self {
        Self {
            quality: DEFAULT_RATING,
            intensity: DEFAULT_RATING,
            notes: String::new(),
        }
    }
}

/// Per-wizard answer state. Tracks which sections were explicitly set so a
/// default rating is never mistaken for a recorded answer.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    answers: [Option<SectionAnswer>; 6],
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the stored answer for `section` and marks it as set.
    pub fn set_answer(&mut self, section: Section, answer: SectionAnswer) {
        self.answers[section.index()] = Some(answer);
    }

    /// The stored answer, or the documented defaults (5/5/"") if the section
    /// was never set.
    pub fn get_answer(&self, section: Section) -> SectionAnswer {
        self.answers[section.index()]
            .clone()
            .unwrap_or_default()
    }

    pub fn is_set(&self, section: Section) -> bool {
        self.answers[section.index()].is_some()
    }

    /// Sections never explicitly set, in step order.
    pub fn missing_sections(&self) -> Vec<Section> {
        SECTIONS
            .into_iter()
            .filter(|section| !self.is_set(*section))
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
