use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::guided::GuidedStep;
use super::plan::PhasePlan;
use crate::error::ValidationError;

/// Every exercise the therapy screen can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// 5-4-3-2-1 sensory grounding.
    Grounding,
    PacedBreathing,
    BoxBreathing,
    EmotionalLabelExpansion,
    CognitiveReframing,
    PositiveRecall,
}

/// What drives an exercise forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ExerciseProgram {
    /// Clock-driven phases.
    Timed { plan: PhasePlan },
    /// User-advanced prompts.
    Guided { steps: Vec<GuidedStep> },
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 6] = [
        ExerciseKind::Grounding,
        ExerciseKind::PacedBreathing,
        ExerciseKind::BoxBreathing,
        ExerciseKind::EmotionalLabelExpansion,
        ExerciseKind::CognitiveReframing,
        ExerciseKind::PositiveRecall,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ExerciseKind::Grounding => "5-4-3-2-1 Grounding",
            ExerciseKind::PacedBreathing => "Paced Breathing",
            ExerciseKind::BoxBreathing => "Box Breathing",
            ExerciseKind::EmotionalLabelExpansion => "Emotional Label Expansion",
            ExerciseKind::CognitiveReframing => "Cool-Down Cognitive Reframing",
            ExerciseKind::PositiveRecall => "Positive Recall Exercise",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ExerciseKind::Grounding => "grounding",
            ExerciseKind::PacedBreathing => "paced_breathing",
            ExerciseKind::BoxBreathing => "box_breathing",
            ExerciseKind::EmotionalLabelExpansion => "emotional_label_expansion",
            ExerciseKind::CognitiveReframing => "cognitive_reframing",
            ExerciseKind::PositiveRecall => "positive_recall",
        }
    }

    pub fn is_timed(self) -> bool {
        matches!(self, ExerciseKind::PacedBreathing | ExerciseKind::BoxBreathing)
    }

    pub fn program(self) -> ExerciseProgram {
        match self {
            ExerciseKind::PacedBreathing => ExerciseProgram::Timed {
                plan: PhasePlan::paced_breathing(),
            },
            ExerciseKind::BoxBreathing => ExerciseProgram::Timed {
                plan: PhasePlan::box_breathing(),
            },
            ExerciseKind::Grounding => ExerciseProgram::Guided {
                steps: vec![
                    GuidedStep::new("Name 5 things you can see around you", 5),
                    GuidedStep::new("Name 4 things you can touch", 4),
                    GuidedStep::new("Name 3 things you can hear", 3),
                    GuidedStep::new("Name 2 things you can smell", 2),
                    GuidedStep::new("Name 1 thing you can taste", 1),
                ],
            },
            ExerciseKind::EmotionalLabelExpansion => ExerciseProgram::Guided {
                steps: vec![GuidedStep::new(
                    "Name 3 emotions you might be feeling under the surface",
                    3,
                )],
            },
            ExerciseKind::CognitiveReframing => ExerciseProgram::Guided {
                steps: vec![GuidedStep::new(
                    "Instead of \"This always happens to me\", try \"This is challenging, but temporary\"",
                    1,
                )],
            },
            ExerciseKind::PositiveRecall => ExerciseProgram::Guided {
                steps: vec![GuidedStep::new("List two things that went right today", 2)],
            },
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for ExerciseKind {
    type Err = ValidationError;

    /// Accepts the slug (`box_breathing`, `box-breathing`) or the title.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_").to_lowercase();
        ExerciseKind::ALL
            .into_iter()
            .find(|k| k.slug() == wanted || k.title().to_lowercase() == s.trim().to_lowercase())
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "exercise".into(),
                message: format!("unknown exercise '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breathing_kinds_are_timed() {
        for kind in ExerciseKind::ALL {
            let timed = matches!(kind.program(), ExerciseProgram::Timed { .. });
            assert_eq!(timed, kind.is_timed(), "{kind:?}");
        }
    }

    #[test]
    fn grounding_counts_down_senses() {
        match ExerciseKind::Grounding.program() {
            ExerciseProgram::Guided { steps } => {
                let slots: Vec<u32> = steps.iter().map(|s| s.slots).collect();
                assert_eq!(slots, [5, 4, 3, 2, 1]);
            }
            other => panic!("expected guided program, got {other:?}"),
        }
    }

    #[test]
    fn parses_slugs_and_titles() {
        assert_eq!("box-breathing".parse::<ExerciseKind>().unwrap(), ExerciseKind::BoxBreathing);
        assert_eq!("paced_breathing".parse::<ExerciseKind>().unwrap(), ExerciseKind::PacedBreathing);
        assert_eq!(
            "5-4-3-2-1 Grounding".parse::<ExerciseKind>().unwrap(),
            ExerciseKind::Grounding
        );
        assert!("yoga".parse::<ExerciseKind>().is_err());
    }
}
