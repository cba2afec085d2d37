//! Mock voice analysis.
//!
//! There is no signal processing. A fixed delay stands in for the model, then
//! a calmness score and one of five hardcoded emotion profiles are drawn
//! uniformly and independently. No history or smoothing is applied, so scores
//! do not trend across days.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::exercise::ExerciseKind;
use crate::random::RandomSource;
use crate::storage::AnalysisConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CognitiveLoad {
    Low,
    Med,
    High,
}

impl CognitiveLoad {
    pub const ALL: [CognitiveLoad; 3] = [CognitiveLoad::Low, CognitiveLoad::Med, CognitiveLoad::High];
}

impl fmt::Display for CognitiveLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CognitiveLoad::Low => "LOW",
            CognitiveLoad::Med => "MED",
            CognitiveLoad::High => "HIGH",
        })
    }
}

/// A fixed stand-in for real analysis output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmotionProfile {
    pub emotion: &'static str,
    pub load: CognitiveLoad,
    pub exercise: ExerciseKind,
    pub tags: &'static [&'static str],
}

pub const PROFILES: [EmotionProfile; 5] = [
    EmotionProfile {
        emotion: "Overwhelm / Anxiety",
        load: CognitiveLoad::High,
        exercise: ExerciseKind::Grounding,
        tags: &["overwhelm", "anxiety", "stress"],
    },
    EmotionProfile {
        emotion: "Agitation / Frustration",
        load: CognitiveLoad::High,
        exercise: ExerciseKind::PacedBreathing,
        tags: &["agitation", "frustration", "irritation"],
    },
    EmotionProfile {
        emotion: "Numbness / Dissociation",
        load: CognitiveLoad::Med,
        exercise: ExerciseKind::EmotionalLabelExpansion,
        tags: &["numbness", "disconnection", "emptiness"],
    },
    EmotionProfile {
        emotion: "Anger / Resentment",
        load: CognitiveLoad::High,
        exercise: ExerciseKind::CognitiveReframing,
        tags: &["anger", "resentment", "bitterness"],
    },
    EmotionProfile {
        emotion: "Sadness / Grief",
        load: CognitiveLoad::Med,
        exercise: ExerciseKind::PositiveRecall,
        tags: &["sadness", "grief", "melancholy"],
    },
];

pub const PLACEHOLDER_TRANSCRIPT: &str =
    "I have so much going on right now and everything feels overwhelming...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub cognitive_load: CognitiveLoad,
    pub emotion: String,
    pub primary_emotions: Vec<String>,
    pub recommended_exercise: ExerciseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

impl AnalysisResult {
    fn from_profile(profile: &EmotionProfile, transcript: Option<String>) -> Self {
        Self {
            cognitive_load: profile.load,
            emotion: profile.emotion.to_string(),
            primary_emotions: profile.tags.iter().map(|t| t.to_string()).collect(),
            recommended_exercise: profile.exercise,
            transcript,
        }
    }
}

/// One finished draw: the result record plus its calmness score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub calmness_score: u32,
    pub result: AnalysisResult,
}

/// Produces fabricated analyses.
#[derive(Debug, Clone)]
pub struct MockAnalyzer {
    delay: Duration,
    calmness_min: u32,
    calmness_max: u32,
    transcript: String,
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl MockAnalyzer {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let calmness_min = config.calmness_min.min(100);
        let calmness_max = config.calmness_max.clamp(calmness_min + 1, 101);
        Self {
            delay: Duration::from_millis(config.delay_ms()),
            calmness_min,
            calmness_max,
            transcript: config.transcript.clone(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Simulated latency before a result is available.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Half-open calmness range.
    pub fn calmness_range(&self) -> std::ops::Range<u32> {
        self.calmness_min..self.calmness_max
    }

    /// Draw a score and a profile. Independent of any previous draw.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> Analysis {
        let calmness_score = rng.range(self.calmness_min, self.calmness_max);
        let index = rng.below(PROFILES.len() as u32) as usize;
        let transcript = if self.transcript.is_empty() {
            None
        } else {
            Some(self.transcript.clone())
        };
        Analysis {
            calmness_score,
            result: AnalysisResult::from_profile(&PROFILES[index], transcript),
        }
    }

    /// Wait out the simulated latency, then return the prepared draw.
    pub async fn settle(delay: Duration, analysis: Analysis) -> Analysis {
        tokio::time::sleep(delay).await;
        analysis
    }
}
