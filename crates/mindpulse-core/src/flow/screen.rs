use std::fmt;

use serde::{Deserialize, Serialize};

/// One named step of the journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Landing,
    Assessment,
    Email,
    Voice,
    Results,
    Therapy,
    Calendar,
    Subscription,
}

impl Screen {
    pub const ALL: [Screen; 8] = [
        Screen::Landing,
        Screen::Assessment,
        Screen::Email,
        Screen::Voice,
        Screen::Results,
        Screen::Therapy,
        Screen::Calendar,
        Screen::Subscription,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Assessment => "assessment",
            Screen::Email => "email",
            Screen::Voice => "voice",
            Screen::Results => "results",
            Screen::Therapy => "therapy",
            Screen::Calendar => "calendar",
            Screen::Subscription => "subscription",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
