//! Step badges for the pipeline status panel.
//!
//! The board holds one badge per known pipeline stage. The visual highlight
//! and the status label are separate: an update moves the highlight (at most
//! one badge carries it) but never rewrites another badge's label, so a badge
//! the highlight left keeps reading "In Progress".

use crate::wire::PipelineStep;

/// Badge keys and titles, in panel order.
pub const PIPELINE_STAGES: [(&str, &str); 5] = [
    ("agent", "Agent"),
    ("retrieve", "Retrieve"),
    ("grade", "Grade Documents"),
    ("rewrite", "Rewrite Query"),
    ("generate", "Generate Answer"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Error,
}

impl StepStatus {
    pub fn label(self) -> &'static str {
        match self {
            StepStatus::Pending => "Pending",
            StepStatus::Active => "In Progress",
            StepStatus::Completed => "Completed",
            StepStatus::Error => "Error",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            StepStatus::Pending => "step-status pending",
            StepStatus::Active => "step-status active",
            StepStatus::Completed => "step-status completed",
            StepStatus::Error => "step-status error",
        }
    }
}

/// Badge key for a step name reported by the server.
pub fn badge_key(step: &str) -> &str {
    match step {
        "grade_documents" => "grade",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepBadge {
    pub key: &'static str,
    pub title: &'static str,
    pub status: StepStatus,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepBoard {
    badges: Vec<StepBadge>,
}

impl Default for StepBoard {
    fn default() -> Self {
        Self {
            badges: PIPELINE_STAGES
                .iter()
                .map(|&(key, title)| StepBadge {
                    key,
                    title,
                    status: StepStatus::Pending,
                    highlighted: false,
                })
                .collect(),
        }
    }
}

impl StepBoard {
    pub fn badges(&self) -> &[StepBadge] {
        &self.badges
    }

    pub fn status_of(&self, step: &str) -> Option<StepStatus> {
        let key = badge_key(step);
        self.badges.iter().find(|b| b.key == key).map(|b| b.status)
    }

    /// The badge carrying the active highlight, if any.
    pub fn active(&self) -> Option<&StepBadge> {
        self.badges.iter().find(|b| b.highlighted)
    }

    pub fn reset(&mut self) {
        for badge in &mut self.badges {
            badge.status = StepStatus::Pending;
            badge.highlighted = false;
        }
    }

    /// Set one badge's status. Any update of a known badge drops the current
    /// highlight; setting Active puts it on this badge. Other labels are left
    /// alone. Returns false, touching nothing, when the step has no badge.
    pub fn update(&mut self, step: &str, status: StepStatus) -> bool {
        let key = badge_key(step);
        let Some(index) = self.badges.iter().position(|b| b.key == key) else {
            return false;
        };

        for badge in &mut self.badges {
            badge.highlighted = false;
        }
        let badge = &mut self.badges[index];
        badge.status = status;
        badge.highlighted = status == StepStatus::Active;
        true
    }

    /// Replay a query's step trace: all but the last Completed, the last
    /// Active.
    pub fn apply_trace(&mut self, steps: &[PipelineStep]) {
        let last = steps.len().saturating_sub(1);
        for (i, step) in steps.iter().enumerate() {
            let status = if i == last {
                StepStatus::Active
            } else {
                StepStatus::Completed
            };
            self.update(&step.step, status);
        }
    }
}
