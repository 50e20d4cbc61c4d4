use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assert_interval;
use crate::env::GridAction;

/// Seeded ε-greedy action selection. Every learner owns one instance, and
/// all of its random decisions (exploration and any extra coin flips) draw
/// from the same source, so a seed fully determines a run.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
    rng: StdRng,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64, seed: u64) -> Self {
        assert_interval!(epsilon, 0.0, 1.0);
        Self {
            epsilon,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn should_explore(&mut self) -> bool {
        self.epsilon != 0.0 && self.rng.gen::<f64>() < self.epsilon
    }

    /// With probability ε a uniformly random action, otherwise `greedy`.
    pub fn choose(&mut self, greedy: GridAction) -> GridAction {
        if self.should_explore() {
            GridAction::from(self.rng.gen_range(0..GridAction::COUNT))
        } else {
            greedy
        }
    }

    /// Probability the ε-soft policy assigns to `action` when `greedy` is
    /// the current greedy action: `1 - ε + ε/|A|` for the greedy action,
    /// `ε/|A|` for the rest.
    pub fn action_prob(&self, action: GridAction, greedy: GridAction) -> f64 {
        let n = GridAction::COUNT as f64;
        if action == greedy {
            1.0 - self.epsilon + self.epsilon / n
        } else {
            self.epsilon / n
        }
    }

    /// Unbiased coin from the learner's single random source.
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen::<f64>() < 0.5
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}
