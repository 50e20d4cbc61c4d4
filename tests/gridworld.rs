use gridworld_rl::agent::{qlearning, sarsa, Agent, MonteCarloAgent, OneStepAgent};
use gridworld_rl::env::{Env, ObstacleGridEnv};
use gridworld_rl::policy::StateSpace;

fn easy_space() -> StateSpace {
    let (width, height) = ObstacleGridEnv::easy().dimensions();
    StateSpace::new(width, height)
}

#[test]
fn sarsa_and_qlearning_learn_different_tables() {
    let space = easy_space();
    let mut on_policy = OneStepAgent::new(space, 0.1, 0.9, 0.1, 42, sarsa);
    let mut off_policy = OneStepAgent::new(space, 0.1, 0.9, 0.1, 42, qlearning);
    let mut env = ObstacleGridEnv::easy();
    on_policy.train(&mut env, 200, 100);
    off_policy.train(&mut env, 200, 100);
    // Same seed and environment, different bootstrap targets.
    assert_ne!(
        on_policy.get_q_values().as_array(),
        off_policy.get_q_values().as_array()
    );
}

#[test]
fn episodes_respect_the_step_cap() {
    let space = easy_space();
    let mut env = ObstacleGridEnv::easy();

    let mut agent = OneStepAgent::new(space, 0.1, 0.9, 0.5, 7, qlearning);
    let (_, lengths) = agent.train(&mut env, 50, 30);
    assert_eq!(lengths.len(), 50);
    assert!(lengths.iter().all(|&len| len >= 1 && len <= 30));

    let mut mc_agent = MonteCarloAgent::new(space, 0.9, 0.5, 7);
    let (_, lengths) = mc_agent.train(&mut env, 50, 30);
    assert_eq!(lengths.len(), 50);
    assert!(lengths.iter().all(|&len| len >= 1 && len <= 30));
}

#[test]
fn monte_carlo_episode_ends_at_the_cap_or_the_goal() {
    let space = easy_space();
    let mut env = ObstacleGridEnv::easy();
    let mut agent = MonteCarloAgent::new(space, 0.9, 1.0, 3);
    for _ in 0..20 {
        let episode = agent.generate_episode(&mut env, 25);
        assert!(!episode.is_empty());
        assert!(episode.len() <= 25);
    }
}

#[test]
fn qlearning_solves_the_easy_grid() {
    let space = easy_space();
    let mut env = ObstacleGridEnv::easy();
    let mut agent = OneStepAgent::new(space, 0.1, 0.9, 0.2, 42, qlearning);
    agent.train(&mut env, 10_000, 200);

    let policy = agent.get_policy();
    let mut obs = env.reset();
    let mut solved = false;
    for _ in 0..100 {
        let (next_obs, _, terminated) = env.step(policy[&obs]).unwrap();
        obs = next_obs;
        if terminated {
            solved = true;
            break;
        }
    }
    assert!(solved, "greedy rollout never reached the goal");
    assert_eq!(obs, env.goal());
}
