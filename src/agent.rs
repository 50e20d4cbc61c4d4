mod double_agent;
mod monte_carlo_agent;
mod one_step_agent;
mod value_iteration_agent;

pub use double_agent::DoubleQAgent;
pub use monte_carlo_agent::MonteCarloAgent;
pub use one_step_agent::OneStepAgent;
pub use value_iteration_agent::ValueIterationAgent;

use kdam::{tqdm, BarExt};
use ndarray::ArrayView1;

use crate::env::{Env, GridAction, GridPos};
use crate::policy::GreedyPolicy;
use crate::utils::max;

/// Bootstrap value of the next state, from its action values and the action
/// the agent will actually take there.
pub type GetNextQValue = fn(ArrayView1<f64>, GridAction) -> f64;

/// On-policy target: the value of the action actually selected next.
pub fn sarsa(next_q_values: ArrayView1<f64>, next_action: GridAction) -> f64 {
    next_q_values[usize::from(next_action)]
}

/// Off-policy target: the maximal next-state action value, regardless of
/// the action actually taken next.
pub fn qlearning(next_q_values: ArrayView1<f64>, _next_action: GridAction) -> f64 {
    max(next_q_values.iter().copied())
}

/// Per-episode reward totals and lengths of one training run.
pub type TrainResults = (Vec<f64>, Vec<u128>);

pub trait Agent {
    fn get_action(&mut self, obs: GridPos) -> GridAction;

    fn update(
        &mut self,
        curr_obs: GridPos,
        curr_action: GridAction,
        reward: f64,
        terminated: bool,
        next_obs: GridPos,
        next_action: GridAction,
    );

    fn reset(&mut self);

    fn get_policy(&self) -> GreedyPolicy;

    /// One-step training loop: every episode runs until a terminal state or
    /// `max_steps`, whichever comes first. The next action is selected
    /// before the update so on-policy learners bootstrap on the action that
    /// will actually be taken.
    fn train(&mut self, env: &mut dyn Env, n_episodes: u128, max_steps: u128) -> TrainResults {
        let mut training_reward: Vec<f64> = vec![];
        let mut training_length: Vec<u128> = vec![];
        let mut pb = tqdm!(total = n_episodes as usize);
        for _episode in 0..n_episodes {
            let mut steps: u128 = 0;
            let mut epi_reward: f64 = 0.0;
            let mut curr_obs = env.reset();
            let mut curr_action = self.get_action(curr_obs);
            while steps < max_steps {
                steps += 1;
                let (next_obs, reward, terminated) = env.step(curr_action).unwrap();
                let next_action = self.get_action(next_obs);
                self.update(
                    curr_obs,
                    curr_action,
                    reward,
                    terminated,
                    next_obs,
                    next_action,
                );
                curr_obs = next_obs;
                curr_action = next_action;
                epi_reward += reward;
                if terminated {
                    break;
                }
            }
            training_reward.push(epi_reward);
            training_length.push(steps);
            match pb.update(1) {
                Ok(_) => (),
                Err(e) => panic!("{}", e),
            };
        }
        (training_reward, training_length)
    }
}
