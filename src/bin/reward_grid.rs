use structopt::StructOpt;

use gridworld_rl::agent::ValueIterationAgent;
use gridworld_rl::env::{clamped_target, GridPos, RewardGridEnv};
use gridworld_rl::policy::StateSpace;
use gridworld_rl::render::{render_policy, render_values};

#[derive(StructOpt, Debug)]
#[structopt(name = "reward_grid")]
/// Solves the reward grid by value iteration and prints the converged
/// state values and greedy policy.
struct Cli {
    /// Discount factor
    #[structopt(long, default_value = "0.9")]
    discount_factor: f64,
    /// Convergence threshold on the largest per-sweep value change
    #[structopt(long, default_value = "0.0001")]
    phi: f64,
}

fn main() {
    let cli = Cli::from_args();
    let env = RewardGridEnv::new();
    let (width, height) = env.dimensions();
    let space = StateSpace::new(width, height);

    let mut agent = ValueIterationAgent::new(space, cli.discount_factor, cli.phi);
    let sweeps = agent.plan(&env);
    println!("Converged after {} sweeps\n", sweeps);
    println!("State values:\n{}\n", render_values(space, agent.get_values()));
    println!(
        "Greedy policy:\n{}\n",
        render_policy(space, &agent.get_policy(), &env.reward_positions())
    );

    // Follow the greedy policy from the bottom area until a paying cell.
    let reward_positions = env.reward_positions();
    let mut pos = GridPos::new(4, 2);
    let mut steps = 0;
    while !reward_positions.contains(&pos) && steps < 100 {
        let action = agent.policy_action(pos);
        println!("{:?} {}", pos, action.label());
        pos = clamped_target(pos, action, width, height);
        steps += 1;
    }
    println!("Solved in {} steps", steps);
}
