//! Stress-assessment quiz.
//!
//! Three fixed questions, five options each. Answers are option indices and
//! the score is their sum (0..=12).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub text: &'static str,
    pub options: [&'static str; 5],
}

pub static QUESTIONS: [Question; 3] = [
    Question {
        text: "In the past week, how often have you felt overwhelmed?",
        options: ["Never", "Rarely", "Sometimes", "Often", "Always"],
    },
    Question {
        text: "How difficult has it been to manage your emotions lately?",
        options: ["Very Easy", "Somewhat Easy", "Neutral", "Somewhat Hard", "Very Hard"],
    },
    Question {
        text: "How would you rate your current stress level?",
        options: ["Very Low", "Low", "Moderate", "High", "Very High"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Manageable,
    Moderate,
    High,
}

impl StressLevel {
    pub fn classify(score: u32) -> Self {
        if score >= 10 {
            StressLevel::High
        } else if score >= 6 {
            StressLevel::Moderate
        } else {
            StressLevel::Manageable
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StressLevel::Manageable => "manageable",
            StressLevel::Moderate => "moderate",
            StressLevel::High => "high",
        })
    }
}

/// Quiz in progress.
#[derive(Debug, Clone, Default)]
pub struct Assessment {
    answers: Vec<u32>,
}

impl Assessment {
    pub fn new() -> Self {
        Self::default()
    }

    /// The question awaiting an answer, if any.
    pub fn current(&self) -> Option<&'static Question> {
        QUESTIONS.get(self.answers.len())
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Record the option index for the current question. Returns the total
    /// score once the last question has been answered.
    pub fn answer(&mut self, option: u32) -> Result<Option<u32>, ValidationError> {
        let question = self.current().ok_or_else(|| ValidationError::OutOfBounds {
            collection: "questions".into(),
            index: self.answers.len(),
            len: QUESTIONS.len(),
        })?;
        if option as usize >= question.options.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "options".into(),
                index: option as usize,
                len: question.options.len(),
            });
        }
        self.answers.push(option);
        if self.answers.len() == QUESTIONS.len() {
            Ok(Some(self.answers.iter().sum()))
        } else {
            Ok(None)
        }
    }

    /// Answer every question at once.
    pub fn score_all(options: &[u32]) -> Result<u32, ValidationError> {
        if options.len() != QUESTIONS.len() {
            return Err(ValidationError::InvalidValue {
                field: "answers".into(),
                message: format!("expected {} answers, got {}", QUESTIONS.len(), options.len()),
            });
        }
        let mut assessment = Self::new();
        let mut score = 0;
        for &option in options {
            if let Some(total) = assessment.answer(option)? {
                score = total;
            }
        }
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_answer_indices() {
        let mut assessment = Assessment::new();
        assert_eq!(assessment.answer(2).unwrap(), None);
        assert_eq!(assessment.answer(3).unwrap(), None);
        assert_eq!(assessment.answer(4).unwrap(), Some(9));
        assert!(assessment.current().is_none());
        assert!(assessment.answer(0).is_err());
    }

    #[test]
    fn rejects_out_of_range_option() {
        let mut assessment = Assessment::new();
        assert!(matches!(
            assessment.answer(5),
            Err(ValidationError::OutOfBounds { index: 5, .. })
        ));
        assert_eq!(assessment.answered(), 0);
    }

    #[test]
    fn classify_thresholds() {
        assert_eq!(StressLevel::classify(0), StressLevel::Manageable);
        assert_eq!(StressLevel::classify(5), StressLevel::Manageable);
        assert_eq!(StressLevel::classify(6), StressLevel::Moderate);
        assert_eq!(StressLevel::classify(9), StressLevel::Moderate);
        assert_eq!(StressLevel::classify(10), StressLevel::High);
        assert_eq!(StressLevel::classify(12), StressLevel::High);
    }

    #[test]
    fn score_all_requires_every_answer() {
        assert_eq!(Assessment::score_all(&[2, 3, 4]).unwrap(), 9);
        assert!(Assessment::score_all(&[1, 1]).is_err());
        assert!(Assessment::score_all(&[1, 1, 9]).is_err());
    }
}
