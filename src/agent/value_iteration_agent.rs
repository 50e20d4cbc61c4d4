use crate::env::{GridAction, GridPos, TransitionModel};
use crate::policy::{GreedyPolicy, StateSpace, ValueTable};
use crate::utils::{argmax, max};

/// Value iteration over a known transition model. Each sweep applies the
/// Bellman optimality backup to every state against the values of the
/// previous sweep, and planning stops once the largest per-state change
/// drops below the convergence threshold.
pub struct ValueIterationAgent {
    v: ValueTable,
    policy: Vec<GridAction>,
    discount_factor: f64,
    convergence_threshold: f64,
}

impl ValueIterationAgent {
    pub fn new(space: StateSpace, discount_factor: f64, convergence_threshold: f64) -> Self {
        assert!(
            (0.0..1.0).contains(&discount_factor),
            "Invalid value for `discount_factor`. Must be in the interval [0, 1)."
        );
        assert!(
            convergence_threshold > 0.0,
            "Invalid value for `convergence_threshold`. Must be positive."
        );
        Self {
            v: ValueTable::new(space),
            policy: vec![GridAction::North; space.len()],
            discount_factor,
            convergence_threshold,
        }
    }

    fn expected_return(&self, model: &dyn TransitionModel, state: GridPos, action: GridAction) -> f64 {
        model
            .transitions(state, action)
            .into_iter()
            .map(|(next, prob, reward)| prob * (reward + self.discount_factor * self.v.get(next)))
            .sum()
    }

    /// Runs sweeps until convergence, extracts the greedy policy and returns
    /// the number of sweeps taken.
    pub fn plan(&mut self, model: &dyn TransitionModel) -> u32 {
        let space = self.v.space();
        let mut sweeps: u32 = 0;
        loop {
            sweeps += 1;
            let mut next_v = ValueTable::new(space);
            let mut delta: f64 = 0.0;
            for state in space.iter() {
                let best = max(
                    GridAction::ALL
                        .iter()
                        .map(|&action| self.expected_return(model, state, action)),
                );
                delta = delta.max((best - self.v.get(state)).abs());
                next_v.set(state, best);
            }
            self.v = next_v;
            if delta < self.convergence_threshold {
                break;
            }
        }
        self.extract_policy(model);
        sweeps
    }

    fn extract_policy(&mut self, model: &dyn TransitionModel) {
        let space = self.v.space();
        for state in space.iter() {
            let returns: Vec<f64> = GridAction::ALL
                .iter()
                .map(|&action| self.expected_return(model, state, action))
                .collect();
            self.policy[space.index_of(state)] = GridAction::from(argmax(returns.iter()));
        }
    }

    pub fn get_values(&self) -> &ValueTable {
        &self.v
    }

    pub fn policy_action(&self, state: GridPos) -> GridAction {
        self.policy[self.v.space().index_of(state)]
    }

    pub fn get_policy(&self) -> GreedyPolicy {
        self.v
            .space()
            .iter()
            .map(|state| (state, self.policy_action(state)))
            .collect()
    }

    pub fn reset(&mut self) {
        let space = self.v.space();
        self.v = ValueTable::new(space);
        self.policy.fill(GridAction::North);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::RewardGridEnv;

    fn planned_agent() -> ValueIterationAgent {
        let env = RewardGridEnv::new();
        let (width, height) = (5, 5);
        let mut agent = ValueIterationAgent::new(StateSpace::new(width, height), 0.9, 0.0001);
        agent.plan(&env);
        agent
    }

    #[test]
    fn high_reward_cell_converges_to_its_self_loop_value() {
        let agent = planned_agent();
        // Entering (0, 1) pays 10; bouncing North off the wall re-enters it
        // every step, so V = 10 / (1 - 0.9) = 100.
        assert!((agent.get_values().get(GridPos::new(0, 1)) - 100.0).abs() < 0.01);
        assert!((agent.get_values().get(GridPos::new(0, 0)) - 100.0).abs() < 0.01);
        assert!((agent.get_values().get(GridPos::new(1, 1)) - 100.0).abs() < 0.01);
        assert!((agent.get_values().get(GridPos::new(0, 2)) - 100.0).abs() < 0.01);
        assert!((agent.get_values().get(GridPos::new(2, 1)) - 90.0).abs() < 0.01);
        assert!((agent.get_values().get(GridPos::new(1, 2)) - 90.0).abs() < 0.01);
    }

    #[test]
    fn policy_steers_into_the_high_reward_cell() {
        let agent = planned_agent();
        assert_eq!(agent.policy_action(GridPos::new(0, 0)), GridAction::East);
        assert_eq!(agent.policy_action(GridPos::new(0, 1)), GridAction::North);
        assert_eq!(agent.policy_action(GridPos::new(0, 3)), GridAction::West);
    }

    #[test]
    fn planning_converges_in_a_bounded_number_of_sweeps() {
        let env = RewardGridEnv::new();
        let mut agent = ValueIterationAgent::new(StateSpace::new(5, 5), 0.9, 0.0001);
        let sweeps = agent.plan(&env);
        assert!(sweeps > 1);
        assert!(sweeps < 200);
    }
}
