use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{SessionPlan, WORK_INTERVALS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    Focus,
    Break,
    LongBreak,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub step_type: StepType,
    pub duration: Duration,
    pub label: String,
}

impl Step {
    pub fn duration_secs(&self) -> u64 {
        self.duration.as_secs()
    }
}

/// The ordered steps of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    steps: Vec<Step>,
}

impl Schedule {
    /// Four focus steps, a short break between consecutive ones, then the
    /// long break.
    pub fn from_plan(plan: &SessionPlan) -> Self {
        let mut steps = Vec::new();
        for i in 0..WORK_INTERVALS {
            steps.push(Step {
                step_type: StepType::Focus,
                duration: plan.work,
                label: format!("Work session {}", i + 1),
            });
            if i + 1 < WORK_INTERVALS {
                steps.push(Step {
                    step_type: StepType::Break,
                    duration: plan.short_break,
                    label: "Short Break".into(),
                });
            }
        }
        steps.push(Step {
            step_type: StepType::LongBreak,
            duration: plan.long_break,
            label: "Long Break".into(),
        });
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    pub fn count(&self, step_type: StepType) -> usize {
        self.steps
            .iter()
            .filter(|s| s.step_type == step_type)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_has_8_steps() {
        let s = Schedule::from_plan(&SessionPlan::default());
        assert_eq!(s.steps().len(), 8);
        assert_eq!(s.count(StepType::Focus), 4);
        assert_eq!(s.count(StepType::Break), 3);
        assert_eq!(s.count(StepType::LongBreak), 1);
    }

    #[test]
    fn last_focus_goes_straight_to_long_break() {
        let s = Schedule::from_plan(&SessionPlan::default());
        let types: Vec<_> = s.steps().iter().map(|step| step.step_type).collect();
        assert_eq!(types[6], StepType::Focus);
        assert_eq!(types[7], StepType::LongBreak);
    }

    #[test]
    fn total_duration() {
        let s = Schedule::from_plan(&SessionPlan::default());
        assert_eq!(
            s.total_duration(),
            Duration::from_secs((4 * 25 + 3 * 5 + 20) * 60)
        );
    }
}
