use super::{Agent, GetNextQValue};
use crate::action_selection::EpsilonGreedy;
use crate::assert_interval;
use crate::env::{GridAction, GridPos};
use crate::policy::{GreedyPolicy, QTable, StateSpace};

/// One-step temporal-difference control over a single Q-table. The
/// `GetNextQValue` function picks the bootstrap target: [`super::sarsa`]
/// keeps the update on-policy, [`super::qlearning`] makes it off-policy.
pub struct OneStepAgent {
    q: QTable,
    action_selection: EpsilonGreedy,
    learning_rate: f64,
    discount_factor: f64,
    get_next_q_value: GetNextQValue,
}

impl OneStepAgent {
    pub fn new(
        space: StateSpace,
        learning_rate: f64,
        discount_factor: f64,
        epsilon: f64,
        seed: u64,
        get_next_q_value: GetNextQValue,
    ) -> Self {
        assert_interval!(learning_rate, 0.0, 1.0);
        assert!(
            (0.0..1.0).contains(&discount_factor),
            "Invalid value for `discount_factor`. Must be in the interval [0, 1)."
        );
        Self {
            q: QTable::new(space),
            action_selection: EpsilonGreedy::new(epsilon, seed),
            learning_rate,
            discount_factor,
            get_next_q_value,
        }
    }

    pub fn get_q_values(&self) -> &QTable {
        &self.q
    }
}

impl Agent for OneStepAgent {
    fn get_action(&mut self, obs: GridPos) -> GridAction {
        let greedy = self.q.greedy_action(obs);
        self.action_selection.choose(greedy)
    }

    fn update(
        &mut self,
        curr_obs: GridPos,
        curr_action: GridAction,
        reward: f64,
        _terminated: bool,
        next_obs: GridPos,
        next_action: GridAction,
    ) {
        let future_q_value = (self.get_next_q_value)(self.q.row(next_obs), next_action);
        let temporal_difference =
            reward + self.discount_factor * future_q_value - self.q.get(curr_obs, curr_action);
        self.q
            .add(curr_obs, curr_action, self.learning_rate * temporal_difference);
    }

    fn reset(&mut self) {
        self.q.reset();
    }

    fn get_policy(&self) -> GreedyPolicy {
        self.q.greedy_policy()
    }
}
