use kdam::tqdm;

use super::TrainResults;
use crate::action_selection::EpsilonGreedy;
use crate::env::{Env, GridAction, GridPos};
use crate::policy::{GreedyPolicy, QTable, StateSpace};

/// One `(state, action, reward)` transition of a sampled episode.
pub type EpisodeStep = (GridPos, GridAction, f64);

/// Off-policy Monte Carlo control with weighted importance sampling. The
/// behavior policy is ε-soft around the greedy target policy; updates walk
/// each episode backwards and stop at the first step where the behavior
/// action departs from the freshly improved target policy, since the
/// importance weight of everything before it would be zero.
pub struct MonteCarloAgent {
    q: QTable,
    c: QTable,
    target_policy: Vec<GridAction>,
    action_selection: EpsilonGreedy,
    discount_factor: f64,
}

impl MonteCarloAgent {
    pub fn new(space: StateSpace, discount_factor: f64, epsilon: f64, seed: u64) -> Self {
        assert!(
            (0.0..1.0).contains(&discount_factor),
            "Invalid value for `discount_factor`. Must be in the interval [0, 1)."
        );
        Self {
            q: QTable::new(space),
            c: QTable::new(space),
            target_policy: vec![GridAction::North; space.len()],
            action_selection: EpsilonGreedy::new(epsilon, seed),
            discount_factor,
        }
    }

    pub fn get_action(&mut self, obs: GridPos) -> GridAction {
        let greedy = self.target_policy[self.q.space().index_of(obs)];
        self.action_selection.choose(greedy)
    }

    /// Runs the behavior policy until a terminal state or `max_steps`.
    pub fn generate_episode(&mut self, env: &mut dyn Env, max_steps: u128) -> Vec<EpisodeStep> {
        let mut episode: Vec<EpisodeStep> = vec![];
        let mut curr_obs = env.reset();
        let mut steps: u128 = 0;
        while steps < max_steps {
            steps += 1;
            let curr_action = self.get_action(curr_obs);
            let (next_obs, reward, terminated) = env.step(curr_action).unwrap();
            episode.push((curr_obs, curr_action, reward));
            curr_obs = next_obs;
            if terminated {
                break;
            }
        }
        episode
    }

    /// Backward pass over one episode. The cumulative weight is incremented
    /// before the step size is taken from it, so the very first visit of a
    /// pair already divides by a non-zero weight.
    pub fn update(&mut self, episode: &[EpisodeStep]) {
        let mut g: f64 = 0.0;
        let mut w: f64 = 1.0;
        for &(obs, action, reward) in episode.iter().rev() {
            g = self.discount_factor * g + reward;
            self.c.add(obs, action, w);
            let step_size = w / self.c.get(obs, action);
            let q_value = self.q.get(obs, action);
            self.q.add(obs, action, step_size * (g - q_value));
            let greedy = self.q.greedy_action(obs);
            self.target_policy[self.q.space().index_of(obs)] = greedy;
            if action != greedy {
                break;
            }
            w /= self.action_selection.action_prob(action, greedy);
        }
    }

    pub fn train(&mut self, env: &mut dyn Env, n_episodes: u128, max_steps: u128) -> TrainResults {
        let mut training_reward: Vec<f64> = vec![];
        let mut training_length: Vec<u128> = vec![];
        for _episode in tqdm!(0..n_episodes) {
            let episode = self.generate_episode(env, max_steps);
            training_reward.push(episode.iter().map(|&(_, _, reward)| reward).sum());
            training_length.push(episode.len() as u128);
            self.update(&episode);
        }
        (training_reward, training_length)
    }

    pub fn get_policy(&self) -> GreedyPolicy {
        self.q
            .space()
            .iter()
            .map(|pos| (pos, self.target_policy[self.q.space().index_of(pos)]))
            .collect()
    }

    pub fn get_q_values(&self) -> &QTable {
        &self.q
    }

    pub fn cumulative_weights(&self) -> &QTable {
        &self.c
    }

    pub fn reset(&mut self) {
        self.q.reset();
        self.c.reset();
        self.target_policy.fill(GridAction::North);
    }
}
