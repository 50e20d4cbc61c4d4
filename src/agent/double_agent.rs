use ndarray::Array1;

use super::Agent;
use crate::action_selection::EpsilonGreedy;
use crate::assert_interval;
use crate::env::{GridAction, GridPos};
use crate::policy::{GreedyPolicy, QTable, StateSpace};
use crate::utils::argmax;

/// Double Q-learning: two independent tables, one picked by an unbiased
/// coin on every transition. The coin's table selects the best next action,
/// the other table evaluates it, which decouples action selection from
/// action evaluation and damps the maximization bias of a single noisy
/// table. Behavior and the exposed policy are always greedy over the sum.
pub struct DoubleQAgent {
    alpha_q: QTable,
    beta_q: QTable,
    action_selection: EpsilonGreedy,
    learning_rate: f64,
    discount_factor: f64,
}

impl DoubleQAgent {
    pub fn new(
        space: StateSpace,
        learning_rate: f64,
        discount_factor: f64,
        epsilon: f64,
        seed: u64,
    ) -> Self {
        assert_interval!(learning_rate, 0.0, 1.0);
        assert!(
            (0.0..1.0).contains(&discount_factor),
            "Invalid value for `discount_factor`. Must be in the interval [0, 1)."
        );
        Self {
            alpha_q: QTable::new(space),
            beta_q: QTable::new(space),
            action_selection: EpsilonGreedy::new(epsilon, seed),
            learning_rate,
            discount_factor,
        }
    }

    pub fn get_q_values(&self) -> (&QTable, &QTable) {
        (&self.alpha_q, &self.beta_q)
    }

    fn combined_row(&self, obs: GridPos) -> Array1<f64> {
        &self.alpha_q.row(obs) + &self.beta_q.row(obs)
    }

    fn combined_greedy_action(&self, obs: GridPos) -> GridAction {
        GridAction::from(argmax(self.combined_row(obs).iter()))
    }
}

impl Agent for DoubleQAgent {
    fn get_action(&mut self, obs: GridPos) -> GridAction {
        let greedy = self.combined_greedy_action(obs);
        self.action_selection.choose(greedy)
    }

    fn update(
        &mut self,
        curr_obs: GridPos,
        curr_action: GridAction,
        reward: f64,
        _terminated: bool,
        next_obs: GridPos,
        _next_action: GridAction,
    ) {
        let (selector, evaluator) = if self.action_selection.coin_flip() {
            (&mut self.alpha_q, &self.beta_q)
        } else {
            (&mut self.beta_q, &self.alpha_q)
        };
        let best_next = selector.greedy_action(next_obs);
        let estimate = evaluator.get(next_obs, best_next);
        let temporal_difference =
            reward + self.discount_factor * estimate - selector.get(curr_obs, curr_action);
        selector.add(curr_obs, curr_action, self.learning_rate * temporal_difference);
    }

    fn reset(&mut self) {
        self.alpha_q.reset();
        self.beta_q.reset();
    }

    fn get_policy(&self) -> GreedyPolicy {
        self.alpha_q
            .space()
            .iter()
            .map(|pos| (pos, self.combined_greedy_action(pos)))
            .collect()
    }
}
