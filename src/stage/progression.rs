//! Stage tracking across a session.

use serde::{Deserialize, Serialize};

use super::encounter::is_boss_stage;

/// Current stage plus run statistics. The stage only moves forward on
/// victory and drops back to 1 on a party wipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProgression {
    pub stage: u32,
    /// Highest stage reached in any run this session.
    pub highest_stage: u32,
    pub stages_cleared: u32,
    pub bosses_defeated: u32,
    pub defeats: u32,
}

impl Default for StageProgression {
    fn default() -> Self {
        Self::new()
    }
}

impl StageProgression {
    pub fn new() -> Self {
        Self {
            stage: 1,
            highest_stage: 1,
            stages_cleared: 0,
            bosses_defeated: 0,
            defeats: 0,
        }
    }

    /// Records a cleared stage and moves to the next one.
    pub fn advance(&mut self) -> u32 {
        if is_boss_stage(self.stage) {
            self.bosses_defeated += 1;
        }
        self.stages_cleared += 1;
        self.stage += 1;
        self.highest_stage = self.highest_stage.max(self.stage);
        self.stage
    }

    /// Back to stage 1 after a party wipe. Session statistics survive.
    pub fn reset(&mut self) {
        self.stage = 1;
        self.defeats += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_counts_bosses() {
        let mut p = StageProgression::new();
        p.advance();
        p.advance();
        assert_eq!(p.stage, 3);
        assert_eq!(p.bosses_defeated, 0);
        p.advance();
        assert_eq!(p.stage, 4);
        assert_eq!(p.bosses_defeated, 1);
        assert_eq!(p.stages_cleared, 3);
    }

    #[test]
    fn test_reset_keeps_highest() {
        let mut p = StageProgression::new();
        p.advance();
        p.advance();
        p.reset();
        assert_eq!(p.stage, 1);
        assert_eq!(p.highest_stage, 3);
        assert_eq!(p.defeats, 1);
    }
}
