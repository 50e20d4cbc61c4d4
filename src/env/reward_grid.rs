use super::{clamped_target, GridAction, GridPos, TransitionModel};

/// 5x5 reward grid for the dynamic-programming solver. Each cell holds the
/// reward collected when moving onto it; two cells on the top row pay out,
/// the rest pay nothing. There is no terminal state and no interaction:
/// the full transition model is known in advance.
#[derive(Debug, Clone)]
pub struct RewardGridEnv {
    grid: [[f64; Self::WIDTH]; Self::HEIGHT],
}

impl RewardGridEnv {
    pub const WIDTH: usize = 5;
    pub const HEIGHT: usize = 5;

    pub fn new() -> Self {
        let mut grid = [[0.0; Self::WIDTH]; Self::HEIGHT];
        grid[0][1] = 10.0;
        grid[0][3] = 5.0;
        Self { grid }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (Self::WIDTH, Self::HEIGHT)
    }

    pub fn reward_at(&self, pos: GridPos) -> f64 {
        self.grid[pos.y][pos.x]
    }

    /// The cells paying a positive reward, useful as rollout stop set.
    pub fn reward_positions(&self) -> Vec<GridPos> {
        let mut positions = vec![];
        for y in 0..Self::HEIGHT {
            for x in 0..Self::WIDTH {
                if self.grid[y][x] > 0.0 {
                    positions.push(GridPos::new(y, x));
                }
            }
        }
        positions
    }
}

impl Default for RewardGridEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionModel for RewardGridEnv {
    fn transitions(&self, state: GridPos, action: GridAction) -> Vec<(GridPos, f64, f64)> {
        // Deterministic dynamics, moves over the edge stay in place.
        let next = clamped_target(state, action, Self::WIDTH, Self::HEIGHT);
        vec![(next, 1.0, self.reward_at(next))]
    }
}
