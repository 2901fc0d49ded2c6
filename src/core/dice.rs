//! Random draws used by combat and loot.
//!
//! Every chance-based roll in the engine goes through [`Dice`], so callers can
//! thread any `rand::Rng` (seeded or not) or a scripted sequence in tests.

use rand::Rng;

pub trait Dice {
    /// Uniform integer in `[1, 100]`.
    fn roll_percent(&mut self) -> i32;

    /// Uniform float in `[0, 1)`.
    fn roll_unit(&mut self) -> f64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng> Dice for R {
    fn roll_percent(&mut self) -> i32 {
        self.gen_range(1..=100)
    }

    fn roll_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Returns true when `chance` (0.0..=1.0) succeeds.
pub fn roll_chance(chance: f64, dice: &mut impl Dice) -> bool {
    dice.roll_unit() < chance
}

/// Deterministic dice for scenario tests and replays.
pub mod scripted {
    use super::Dice;
    use std::collections::VecDeque;

    /// Dice that replay fixed values. When a queue runs dry it falls back to
    /// "no luck": percent 100, unit 0.99, index 0.
    #[derive(Debug, Default)]
    pub struct ScriptedDice {
        percents: VecDeque<i32>,
        units: VecDeque<f64>,
        indices: VecDeque<usize>,
    }

    impl ScriptedDice {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn percents(mut self, values: &[i32]) -> Self {
            self.percents.extend(values.iter().copied());
            self
        }

        pub fn units(mut self, values: &[f64]) -> Self {
            self.units.extend(values.iter().copied());
            self
        }

        pub fn indices(mut self, values: &[usize]) -> Self {
            self.indices.extend(values.iter().copied());
            self
        }
    }

    impl Dice for ScriptedDice {
        fn roll_percent(&mut self) -> i32 {
            self.percents.pop_front().unwrap_or(100)
        }

        fn roll_unit(&mut self) -> f64 {
            self.units.pop_front().unwrap_or(0.99)
        }

        fn pick_index(&mut self, len: usize) -> usize {
            self.indices.pop_front().unwrap_or(0).min(len - 1)
        }
    }
}
