use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default number of cycles for every breathing preset.
pub const DEFAULT_CYCLES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    /// Duration in whole seconds.
    pub duration_secs: u32,
    /// Text shown while the phase runs.
    #[serde(default)]
    pub cue: String,
}

impl Phase {
    pub fn new(name: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            name: name.into(),
            duration_secs,
            cue: String::new(),
        }
    }

    pub fn with_cue(mut self, cue: impl Into<String>) -> Self {
        self.cue = cue.into();
        self
    }
}

/// An ordered list of phases repeated for a fixed number of cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasePlan {
    phases: Vec<Phase>,
    total_cycles: u32,
}

impl PhasePlan {
    /// Build a plan, rejecting empty phase lists, zero-length phases and
    /// zero cycles.
    pub fn new(phases: Vec<Phase>, total_cycles: u32) -> Result<Self, ValidationError> {
        if phases.is_empty() {
            return Err(ValidationError::EmptyCollection("phases".into()));
        }
        if let Some(phase) = phases.iter().find(|p| p.duration_secs == 0) {
            return Err(ValidationError::InvalidValue {
                field: format!("phases.{}.duration_secs", phase.name),
                message: "duration must be at least one second".into(),
            });
        }
        if total_cycles == 0 {
            return Err(ValidationError::InvalidValue {
                field: "total_cycles".into(),
                message: "at least one cycle is required".into(),
            });
        }
        Ok(Self {
            phases,
            total_cycles,
        })
    }

    /// Box breathing: inhale, hold, exhale, hold at four seconds each.
    pub fn box_breathing() -> Self {
        Self {
            phases: vec![
                Phase::new("inhale", 4).with_cue("Breathe In"),
                Phase::new("hold", 4).with_cue("Hold"),
                Phase::new("exhale", 4).with_cue("Breathe Out"),
                Phase::new("hold", 4).with_cue("Hold"),
            ],
            total_cycles: DEFAULT_CYCLES,
        }
    }

    /// Paced breathing: four seconds in, six seconds out.
    pub fn paced_breathing() -> Self {
        Self {
            phases: vec![
                Phase::new("inhale", 4).with_cue("Breathe In"),
                Phase::new("exhale", 6).with_cue("Breathe Out"),
            ],
            total_cycles: DEFAULT_CYCLES,
        }
    }

    /// Same phases, different cycle count.
    pub fn with_cycles(mut self, total_cycles: u32) -> Result<Self, ValidationError> {
        if total_cycles == 0 {
            return Err(ValidationError::InvalidValue {
                field: "total_cycles".into(),
                message: "at least one cycle is required".into(),
            });
        }
        self.total_cycles = total_cycles;
        Ok(self)
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    pub fn cycle_secs(&self) -> u64 {
        self.phases.iter().map(|p| u64::from(p.duration_secs)).sum()
    }

    pub fn total_secs(&self) -> u64 {
        self.cycle_secs() * u64::from(self.total_cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_preset_shape() {
        let plan = PhasePlan::box_breathing();
        let names: Vec<&str> = plan.phases().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["inhale", "hold", "exhale", "hold"]);
        assert_eq!(plan.total_cycles(), 5);
        assert_eq!(plan.total_secs(), 80);
    }

    #[test]
    fn paced_preset_shape() {
        let plan = PhasePlan::paced_breathing();
        assert_eq!(plan.phases().len(), 2);
        assert_eq!(plan.cycle_secs(), 10);
        assert_eq!(plan.total_secs(), 50);
    }

    #[test]
    fn rejects_invalid_plans() {
        assert!(matches!(
            PhasePlan::new(Vec::new(), 3),
            Err(ValidationError::EmptyCollection(_))
        ));
        assert!(PhasePlan::new(vec![Phase::new("inhale", 0)], 3).is_err());
        assert!(PhasePlan::new(vec![Phase::new("inhale", 4)], 0).is_err());
        assert!(PhasePlan::box_breathing().with_cycles(0).is_err());
    }
}
