use serde::{Deserialize, Serialize};

/// The fixed step list: five sensory sections, the overall summary, then the
/// brew and location steps. The location step is the terminal, submit-only
/// step.
pub const STEPS: [WizardStep; 8] = [
    WizardStep::Aroma,
    WizardStep::Acidity,
    WizardStep::Sweetness,
    WizardStep::Body,
    WizardStep::Finish,
    WizardStep::Overall,
    WizardStep::Brew,
    WizardStep::Location,
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    Aroma,
    Acidity,
    Sweetness,
    Body,
    Finish,
    Overall,
    Brew,
    Location,
}

/// Which way the last step change moved. Read by the presentation layer to
/// pick the entry-animation slide direction; never gates any transition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StepDirection {
    Forward,
    Backward,
}

impl Default for StepDirection {
    fn default() -> Self {
        StepDirection::Forward
    }
}

/// Current position in the wizard. Transitions saturate at both ends: there
/// is no wrap-around and no error path, matching the Previous/Next buttons
/// being always enabled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WizardPosition {
    pub step_index: usize,
    pub direction: StepDirection,
}

impl Default for WizardPosition {
    fn default() -> Self {
        Self {
            step_index: 0,
            direction: StepDirection::Forward,
        }
    }
}

impl WizardPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        if self.step_index + 1 < STEPS.len() {
            self.step_index += 1;
            self.direction = StepDirection::Forward;
        }
    }

    pub fn retreat(&mut self) {
        if self.step_index > 0 {
            self.step_index -= 1;
            self.direction = StepDirection::Backward;
        }
    }

    pub fn current_step(&self) -> WizardStep {
        STEPS[self.step_index]
    }

    pub fn is_terminal(&self) -> bool {
        self.step_index == STEPS.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_first_step() {
        let position = WizardPosition::new();
        assert_eq!(position.step_index, 0);
        assert_eq!(position.current_step(), WizardStep::Aroma);
    }

    #[test]
    fn advance_walks_the_full_sequence() {
        let mut position = WizardPosition::new();
        let mut visited = vec![position.current_step()];
        for _ in 0..STEPS.len() - 1 {
            position.advance();
            visited.push(position.current_step());
        }
        assert_eq!(visited, STEPS);
        assert!(position.is_terminal());
    }

    #[test]
    fn advance_saturates_at_terminal_step() {
        let mut position = WizardPosition::new();
        for _ in 0..STEPS.len() - 1 {
            position.advance();
        }
        assert_eq!(position.step_index, STEPS.len() - 1);

        position.advance();
        position.advance();
        assert_eq!(position.step_index, STEPS.len() - 1);
        assert_eq!(position.current_step(), WizardStep::Location);
    }

    #[test]
    fn retreat_saturates_at_first_step() {
        let mut position = WizardPosition::new();
        position.retreat();
        position.retreat();
        assert_eq!(position.step_index, 0);
    }

    #[test]
    fn index_stays_in_bounds_under_mixed_moves() {
        let mut position = WizardPosition::new();
        let moves = [
            true, true, false, true, true, true, true, true, true, true, false, false, false,
            false, false, false, false, false, true,
        ];
        for forward in moves {
            if forward {
                position.advance();
            } else {
                position.retreat();
            }
            assert!(position.step_index < STEPS.len());
        }
    }

    #[test]
    fn direction_tracks_last_move() {
        let mut position = WizardPosition::new();
        position.advance();
        assert_eq!(position.direction, StepDirection::Forward);
        position.retreat();
        assert_eq!(position.direction, StepDirection::Backward);

        // A saturated retreat at step 0 is a no-op, including the direction.
        position.retreat();
        assert_eq!(position.direction, StepDirection::Backward);
        position.advance();
        assert_eq!(position.direction, StepDirection::Forward);
    }
}
