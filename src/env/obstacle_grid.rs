use fxhash::FxHashSet;

use super::{target, Env, EnvError, GridAction, GridPos};
use crate::render::render_grid;

/// Grid world with static obstacles: start at the top-left corner, goal at
/// the bottom-right one. Moving into a wall or an obstacle keeps the agent
/// in place and costs an extra penalty on top of the step reward.
#[derive(Debug, Clone)]
pub struct ObstacleGridEnv {
    ready: bool,
    width: usize,
    height: usize,
    start_pos: GridPos,
    goal_pos: GridPos,
    obstacles: FxHashSet<GridPos>,
    agent_pos: GridPos,
}

impl ObstacleGridEnv {
    pub const STEP_REWARD: f64 = -0.1;
    pub const INVALID_MOVE_PENALTY: f64 = -2.0;
    pub const GOAL_REWARD: f64 = 10.0;

    /// 10x10 grid with a few obstacle walls. Shortest solution: 18 steps.
    pub fn easy() -> Self {
        let obstacles: FxHashSet<GridPos> = [
            (1, 3),
            (2, 3),
            (3, 3),
            (4, 3),
            (6, 1),
            (6, 2),
            (6, 3),
            (6, 5),
            (6, 6),
            (6, 7),
            (6, 8),
            (4, 6),
            (5, 6),
            (8, 2),
            (9, 2),
        ]
        .iter()
        .map(|&(y, x)| GridPos::new(y, x))
        .collect();
        Self::new(10, 10, obstacles)
    }

    /// 20x20 maze variant. Shortest solution: 40 steps.
    pub fn hard() -> Self {
        let width = 20;
        let height = 20;
        let mut obstacles: FxHashSet<GridPos> = FxHashSet::default();

        // Horizontal shelves every 3rd row, with gaps at columns divisible
        // by 5 for connectivity.
        for y in (2..height).step_by(3) {
            for x in 0..width {
                if x % 5 != 0 {
                    obstacles.insert(GridPos::new(y, x));
                }
            }
        }
        // Vertical aisles every 4th column, with gaps at rows divisible by 5.
        for x in (3..width).step_by(4) {
            for y in 0..height {
                if y % 5 != 0 {
                    obstacles.insert(GridPos::new(y, x));
                }
            }
        }
        // Dead-end spurs off the main corridors.
        for &(y, x) in &[
            (1, 2),
            (1, 3),
            (4, 6),
            (5, 6),
            (6, 8),
            (7, 8),
            (9, 12),
            (10, 12),
            (12, 14),
            (13, 14),
            (15, 16),
            (16, 16),
            (17, 1),
            (18, 1),
        ] {
            obstacles.insert(GridPos::new(y, x));
        }
        // Keep the start, the goal and a handful of passages open.
        obstacles.remove(&GridPos::new(0, 0));
        obstacles.remove(&GridPos::new(height - 1, width - 1));
        for &(y, x) in &[
            (19, 4),
            (2, 18),
            (2, 14),
            (2, 13),
            (5, 13),
            (5, 14),
            (6, 14),
            (17, 16),
            (18, 16),
            (8, 16),
            (5, 16),
            (11, 18),
            (14, 17),
            (17, 17),
        ] {
            obstacles.remove(&GridPos::new(y, x));
        }
        obstacles.insert(GridPos::new(14, 0));

        Self::new(width, height, obstacles)
    }

    fn new(width: usize, height: usize, obstacles: FxHashSet<GridPos>) -> Self {
        let start_pos = GridPos::new(0, 0);
        let goal_pos = GridPos::new(height - 1, width - 1);
        Self {
            ready: false,
            width,
            height,
            start_pos,
            goal_pos,
            obstacles,
            agent_pos: start_pos,
        }
    }

    pub fn start(&self) -> GridPos {
        self.start_pos
    }

    pub fn goal(&self) -> GridPos {
        self.goal_pos
    }

    pub fn obstacles(&self) -> &FxHashSet<GridPos> {
        &self.obstacles
    }

    fn is_terminal(&self, pos: GridPos) -> bool {
        pos == self.goal_pos
    }
}

impl Env for ObstacleGridEnv {
    fn reset(&mut self) -> GridPos {
        self.agent_pos = self.start_pos;
        self.ready = true;
        self.agent_pos
    }

    fn step(&mut self, action: GridAction) -> Result<(GridPos, f64, bool), EnvError> {
        if !self.ready {
            return Err(EnvError::EnvNotReady);
        }
        let valid_move = match target(self.agent_pos, action, self.width, self.height) {
            Some(next) if !self.obstacles.contains(&next) => {
                self.agent_pos = next;
                true
            }
            _ => false,
        };
        let done = self.is_terminal(self.agent_pos);
        let mut reward = if done {
            Self::GOAL_REWARD
        } else {
            Self::STEP_REWARD
        };
        if !valid_move {
            reward += Self::INVALID_MOVE_PENALTY;
        }
        if done {
            self.ready = false;
        }
        Ok((self.agent_pos, reward, done))
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn get_valid_actions(&self, pos: GridPos) -> Vec<GridAction> {
        GridAction::ALL
            .iter()
            .copied()
            .filter(|&action| {
                matches!(
                    target(pos, action, self.width, self.height),
                    Some(next) if !self.obstacles.contains(&next)
                )
            })
            .collect()
    }

    fn render(&self) -> String {
        render_grid(
            self.width,
            self.height,
            &self.obstacles,
            self.start_pos,
            self.goal_pos,
            Some(self.agent_pos),
        )
    }
}
