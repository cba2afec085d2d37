use serde::{Deserialize, Serialize};

/// One manually advanced prompt of a guided exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidedStep {
    pub prompt: String,
    /// How many items the user is asked to name.
    pub slots: u32,
}

impl GuidedStep {
    pub fn new(prompt: impl Into<String>, slots: u32) -> Self {
        Self {
            prompt: prompt.into(),
            slots,
        }
    }
}

/// Step-by-step exercise advanced by the user rather than by a clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidedExercise {
    steps: Vec<GuidedStep>,
    step_index: usize,
    finished: bool,
    skipped: bool,
}

impl GuidedExercise {
    pub fn new(steps: Vec<GuidedStep>) -> Self {
        let finished = steps.is_empty();
        Self {
            steps,
            step_index: 0,
            finished,
            skipped: false,
        }
    }

    pub fn current(&self) -> Option<&GuidedStep> {
        if self.finished {
            return None;
        }
        self.steps.get(self.step_index)
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn was_skipped(&self) -> bool {
        self.skipped
    }

    /// Move past the current step. Returns `true` exactly once, on the call
    /// that finishes the exercise.
    pub fn advance(&mut self) -> bool {
        if self.finished {
            return false;
        }
        if self.step_index + 1 < self.steps.len() {
            self.step_index += 1;
            false
        } else {
            self.finished = true;
            true
        }
    }

    /// Finish early. Returns `true` if this call ended the exercise.
    pub fn skip(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        self.skipped = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> GuidedExercise {
        GuidedExercise::new(vec![
            GuidedStep::new("one", 1),
            GuidedStep::new("two", 2),
            GuidedStep::new("three", 3),
        ])
    }

    #[test]
    fn advance_finishes_after_last_step() {
        let mut exercise = three_steps();
        assert_eq!(exercise.current().map(|s| s.slots), Some(1));
        assert!(!exercise.advance());
        assert!(!exercise.advance());
        assert_eq!(exercise.current().map(|s| s.prompt.as_str()), Some("three"));
        assert!(exercise.advance());
        assert!(exercise.is_finished());
        assert!(exercise.current().is_none());
        assert!(!exercise.advance());
    }

    #[test]
    fn skip_reports_once() {
        let mut exercise = three_steps();
        assert!(exercise.skip());
        assert!(!exercise.skip());
        assert!(exercise.was_skipped());
        assert!(!exercise.advance());
    }
}
