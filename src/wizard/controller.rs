use std::sync::Arc;

use anyhow::{bail, Result};
use log::{info, warn};
use serde::Serialize;
use tauri::{AppHandle, Emitter};
use tokio::sync::Mutex;

use crate::{
    db::{
        models::{Brew, Review, ReviewSubmission},
        Database,
    },
    error::ReviewError,
    settings::SettingsStore,
    wizard::{
        assembler::{assemble, ReviewLocation},
        state::{StepDirection, WizardPosition, WizardStep, STEPS},
        store::{AnswerStore, Section, SectionAnswer, SECTIONS},
    },
};

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SectionSnapshot {
    pub section: Section,
    pub answer: SectionAnswer,
    pub is_set: bool,
}

/// Read view of one wizard instance, handed to the presentation layer.
/// `direction` is only there to pick the entry-animation slide.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub step_index: usize,
    pub step: WizardStep,
    pub direction: StepDirection,
    pub total_steps: usize,
    pub sections: Vec<SectionSnapshot>,
    pub brew: Brew,
    pub location: Option<ReviewLocation>,
    pub submitting: bool,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct ReviewSubmittedEvent {
    review_id: String,
    review: Review,
}

#[derive(Debug, Clone)]
struct WizardState {
    position: WizardPosition,
    answers: AnswerStore,
    brew: Brew,
    location: Option<ReviewLocation>,
    submitting: bool,
}

impl WizardState {
    fn fresh(brew: Brew) -> Self {
        Self {
            position: WizardPosition::new(),
            answers: AnswerStore::new(),
            brew,
            location: None,
            submitting: false,
        }
    }

    /// Assemble the submission and mark it in flight. Fails without touching
    /// any state if a submission is already pending, the wizard is not on the
    /// final step, no location is selected, or sections are missing.
    fn begin_submit(&mut self) -> Result<ReviewSubmission> {
        if self.submitting {
            bail!("a submission is already in flight");
        }
        if !self.position.is_terminal() {
            bail!("submit is only available on the final step");
        }

        let location = self
            .location
            .clone()
            .ok_or_else(|| ReviewError::Validation("no review location selected".to_string()))?;

        let submission = assemble(location, self.brew, &self.answers)?;
        self.submitting = true;
        Ok(submission)
    }

    /// Persistence rejected the submission: clear the in-flight flag and keep
    /// everything else as it was so the user can correct and resubmit.
    fn submit_failed(&mut self) {
        self.submitting = false;
    }

    fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            step_index: self.position.step_index,
            step: self.position.current_step(),
            direction: self.position.direction,
            total_steps: STEPS.len(),
            sections: SECTIONS
                .into_iter()
                .map(|section| SectionSnapshot {
                    section,
                    answer: self.answers.get_answer(section),
                    is_set: self.answers.is_set(section),
                })
                .collect(),
            brew: self.brew,
            location: self.location.clone(),
            submitting: self.submitting,
        }
    }
}

/// One review wizard. Owns its answer store and position; constructed at app
/// setup and injected into the command layer, never a process-global.
#[derive(Clone)]
pub struct WizardController {
    state: Arc<Mutex<WizardState>>,
    db: Database,
    app_handle: AppHandle,
    settings: Arc<SettingsStore>,
}

impl WizardController {
    pub fn new(app_handle: AppHandle, db: Database, settings: Arc<SettingsStore>) -> Self {
        let brew = settings.preferred_brew();
        Self {
            state: Arc::new(Mutex::new(WizardState::fresh(brew))),
            db,
            app_handle,
            settings,
        }
    }

    pub async fn get_snapshot(&self) -> WizardSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn advance(&self) -> WizardSnapshot {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.position.advance();
            state.snapshot()
        };
        self.emit_state_changed(&snapshot);
        snapshot
    }

    pub async fn retreat(&self) -> WizardSnapshot {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.position.retreat();
            state.snapshot()
        };
        self.emit_state_changed(&snapshot);
        snapshot
    }

    pub async fn set_answer(&self, section: Section, answer: SectionAnswer) -> WizardSnapshot {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.answers.set_answer(section, answer);
            state.snapshot()
        };
        self.emit_state_changed(&snapshot);
        snapshot
    }

    pub async fn set_brew(&self, brew: Brew) -> WizardSnapshot {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.brew = brew;
            state.snapshot()
        };
        self.emit_state_changed(&snapshot);
        snapshot
    }

    pub async fn set_location(&self, location: ReviewLocation) -> WizardSnapshot {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.location = Some(location);
            state.snapshot()
        };
        self.emit_state_changed(&snapshot);
        snapshot
    }

    /// Assemble and persist the review. On any failure the wizard state is
    /// left exactly as it was so the user can correct and resubmit.
    pub async fn submit(&self) -> Result<Review> {
        let submission = {
            let mut state = self.state.lock().await;
            state.begin_submit()?
        };

        let result = self.db.create_review(submission).await;

        let review = match result {
            Ok(review) => review,
            Err(err) => {
                warn!("Review submission failed: {err}");
                let snapshot = {
                    let mut state = self.state.lock().await;
                    state.submit_failed();
                    state.snapshot()
                };
                self.emit_state_changed(&snapshot);
                return Err(err);
            }
        };

        info!("Review {} submitted", review.id);

        let brew = review.submission.scores().brew;
        if let Err(err) = self.settings.update_preferred_brew(brew) {
            warn!("Failed to persist preferred brew: {err}");
        }

        let snapshot = {
            let mut state = self.state.lock().await;
            *state = WizardState::fresh(brew);
            state.snapshot()
        };
        self.emit_state_changed(&snapshot);
        self.emit_review_submitted(&review);

        Ok(review)
    }

    /// Discard all in-progress answers and start over from step 0.
    pub async fn reset(&self) -> WizardSnapshot {
        let brew = self.settings.preferred_brew();
        let snapshot = {
            let mut state = self.state.lock().await;
            *state = WizardState::fresh(brew);
            state.snapshot()
        };
        self.emit_state_changed(&snapshot);
        snapshot
    }

    fn emit_state_changed(&self, snapshot: &WizardSnapshot) {
        let _ = self.app_handle.emit("wizard-state-changed", snapshot.clone());
    }

    fn emit_review_submitted(&self, review: &Review) {
        let payload = ReviewSubmittedEvent {
            review_id: review.id.clone(),
            review: review.clone(),
        };
        let _ = self.app_handle.emit("review-submitted", payload);
    }
}
