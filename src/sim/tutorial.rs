//! Tutorial overlay progression
//!
//! Purely presentational; never touches the simulation.

use super::state::TutorialStep;

#[derive(Debug, Clone, Default)]
pub struct TutorialProgress {
    steps: Vec<TutorialStep>,
    step: usize,
    open: bool,
}

impl TutorialProgress {
    /// Opens at the first step when the level has any
    pub fn new(steps: &[TutorialStep]) -> Self {
        Self {
            steps: steps.to_vec(),
            step: 0,
            open: !steps.is_empty(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn current(&self) -> Option<&TutorialStep> {
        if self.open {
            self.steps.get(self.step)
        } else {
            None
        }
    }

    pub fn is_last_step(&self) -> bool {
        self.step + 1 >= self.steps.len()
    }

    /// Advance to the next step, closing after the last one
    pub fn dismiss(&mut self) {
        if !self.open {
            return;
        }
        if self.is_last_step() {
            self.open = false;
        } else {
            self.step += 1;
        }
    }

    /// Vector ids to highlight in the vector bay
    pub fn highlighted_ids(&self) -> &[String] {
        self.current()
            .map(|step| step.highlight_ids.as_slice())
            .unwrap_or(&[])
    }
}
