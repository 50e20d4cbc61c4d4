use std::thread;
use std::time::{Duration, Instant};

use plotters::prelude::*;
use structopt::StructOpt;

use gridworld_rl::agent::{
    qlearning, sarsa, Agent, DoubleQAgent, MonteCarloAgent, OneStepAgent,
};
use gridworld_rl::env::{Env, ObstacleGridEnv};
use gridworld_rl::policy::{GreedyPolicy, StateSpace};
use gridworld_rl::render::render_policy;
use gridworld_rl::utils::{moving_average, plot_moving_average};

#[derive(StructOpt, Debug)]
#[structopt(name = "obstacle_grid")]
/// Trains the model-free learners on the obstacle grid and plots their
/// per-episode rewards and lengths.
struct Cli {
    /// Use the 20x20 maze instead of the 10x10 grid
    #[structopt(long)]
    hard: bool,
    /// Animate a greedy rollout of each learned policy
    #[structopt(long)]
    show_example: bool,
    /// Number of training episodes per agent
    #[structopt(long, default_value = "15000")]
    n_episodes: u128,
    /// Step cap per episode for the one-step learners
    #[structopt(long, default_value = "500")]
    max_steps: u128,
    /// Step cap per episode for the Monte Carlo learner
    #[structopt(long, default_value = "5000")]
    mc_max_steps: u128,
    /// Learning rate of the one-step learners
    #[structopt(long, default_value = "0.1")]
    learning_rate: f64,
    /// Exploration rate of the one-step learners
    #[structopt(long, default_value = "0.1")]
    epsilon: f64,
    /// Exploration rate of the Monte Carlo behavior policy
    #[structopt(long, default_value = "0.2")]
    mc_epsilon: f64,
    /// Discount factor
    #[structopt(long, default_value = "0.9")]
    discount_factor: f64,
    /// Seed for every learner's random source
    #[structopt(long, default_value = "42")]
    seed: u64,
    /// Number of windows the reward and length curves are averaged into
    #[structopt(long, default_value = "100")]
    moving_average_window: usize,
}

fn main() {
    let cli = Cli::from_args();
    let mut env = if cli.hard {
        ObstacleGridEnv::hard()
    } else {
        ObstacleGridEnv::easy()
    };
    let (width, height) = env.dimensions();
    let space = StateSpace::new(width, height);
    println!("{}\n", env.render());

    let window = (cli.n_episodes as usize / cli.moving_average_window).max(1);
    let mut rewards: Vec<Vec<f64>> = vec![];
    let mut lengths: Vec<Vec<f64>> = vec![];
    let mut policies: Vec<(&str, GreedyPolicy)> = vec![];

    let mut mc_agent =
        MonteCarloAgent::new(space, cli.discount_factor, cli.mc_epsilon, cli.seed);
    let now = Instant::now();
    let (reward, length) = mc_agent.train(&mut env, cli.n_episodes, cli.mc_max_steps);
    println!("Monte Carlo took {:.2?}", now.elapsed());
    rewards.push(moving_average(window, &reward));
    lengths.push(moving_average(
        window,
        &length.iter().map(|&x| x as f64).collect::<Vec<f64>>(),
    ));
    policies.push(("Monte Carlo", mc_agent.get_policy()));

    let mut agents: Vec<(&str, Box<dyn Agent>)> = vec![
        (
            "Sarsa",
            Box::new(OneStepAgent::new(
                space,
                cli.learning_rate,
                cli.discount_factor,
                cli.epsilon,
                cli.seed,
                sarsa,
            )),
        ),
        (
            "Q-learning",
            Box::new(OneStepAgent::new(
                space,
                cli.learning_rate,
                cli.discount_factor,
                cli.epsilon,
                cli.seed,
                qlearning,
            )),
        ),
        (
            "Double Q-learning",
            Box::new(DoubleQAgent::new(
                space,
                cli.learning_rate,
                cli.discount_factor,
                cli.epsilon,
                cli.seed,
            )),
        ),
    ];
    for (name, agent) in agents.iter_mut() {
        let now = Instant::now();
        let (reward, length) = agent.train(&mut env, cli.n_episodes, cli.max_steps);
        println!("{} took {:.2?}", name, now.elapsed());
        rewards.push(moving_average(window, &reward));
        lengths.push(moving_average(
            window,
            &length.iter().map(|&x| x as f64).collect::<Vec<f64>>(),
        ));
        policies.push((*name, agent.get_policy()));
    }

    let colors: [&RGBColor; 4] = [&BLUE, &GREEN, &RED, &YELLOW];
    let legends: [&str; 4] = ["Monte Carlo", "Sarsa", "Q-learning", "Double Q-learning"];
    plot_moving_average(&rewards, &colors, &legends, "Rewards");
    plot_moving_average(&lengths, &colors, &legends, "Episodes Length");

    for (name, policy) in &policies {
        println!("\n{} policy:", name);
        println!("{}", render_policy(space, policy, &[env.goal()]));
    }

    if cli.show_example {
        for (name, policy) in &policies {
            let mut obs = env.reset();
            let mut steps = 0;
            loop {
                print!("\x1B[2J\x1B[1;1H");
                println!("{} policy\n{}", name, env.render());
                thread::sleep(Duration::from_millis(500));
                let (next_obs, _, terminated) = env.step(policy[&obs]).unwrap();
                obs = next_obs;
                steps += 1;
                if terminated || steps >= 200 {
                    break;
                }
            }
            println!("{}\n{} finished after {} steps", env.render(), name, steps);
        }
    }
}
