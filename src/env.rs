mod obstacle_grid;
mod reward_grid;

pub use obstacle_grid::ObstacleGridEnv;
pub use reward_grid::RewardGridEnv;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    EnvNotReady,
}

/// Grid coordinate, row-major: `y` grows downwards, `x` grows to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub y: usize,
    pub x: usize,
}

impl GridPos {
    pub fn new(y: usize, x: usize) -> Self {
        Self { y, x }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridAction {
    North,
    South,
    West,
    East,
}

impl GridAction {
    pub const COUNT: usize = 4;
    pub const ALL: [GridAction; 4] = [
        GridAction::North,
        GridAction::South,
        GridAction::West,
        GridAction::East,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GridAction::North => "NORTH",
            GridAction::South => "SOUTH",
            GridAction::West => "WEST",
            GridAction::East => "EAST",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            GridAction::North => '↑',
            GridAction::South => '↓',
            GridAction::West => '←',
            GridAction::East => '→',
        }
    }
}

impl From<GridAction> for usize {
    fn from(action: GridAction) -> usize {
        match action {
            GridAction::North => 0,
            GridAction::South => 1,
            GridAction::West => 2,
            GridAction::East => 3,
        }
    }
}

impl From<usize> for GridAction {
    fn from(index: usize) -> GridAction {
        match index {
            0 => GridAction::North,
            1 => GridAction::South,
            2 => GridAction::West,
            3 => GridAction::East,
            _ => panic!("no grid action with index {}", index),
        }
    }
}

/// Target of `action` from `pos`, or `None` when it would leave the grid.
pub fn target(pos: GridPos, action: GridAction, width: usize, height: usize) -> Option<GridPos> {
    let GridPos { y, x } = pos;
    let (ny, nx) = match action {
        GridAction::North => (y.checked_sub(1)?, x),
        GridAction::South => (y + 1, x),
        GridAction::West => (y, x.checked_sub(1)?),
        GridAction::East => (y, x + 1),
    };
    if ny < height && nx < width {
        Some(GridPos::new(ny, nx))
    } else {
        None
    }
}

/// Like [`target`], but moves leaving the grid stay in place.
pub fn clamped_target(pos: GridPos, action: GridAction, width: usize, height: usize) -> GridPos {
    target(pos, action, width, height).unwrap_or(pos)
}

pub trait Env {
    fn reset(&mut self) -> GridPos;
    fn step(&mut self, action: GridAction) -> Result<(GridPos, f64, bool), EnvError>;
    fn dimensions(&self) -> (usize, usize);
    /// Actions that would not collide from `pos`. Diagnostics only: the
    /// learners always offer all four actions and let the environment turn
    /// invalid ones into penalized no-ops.
    fn get_valid_actions(&self, pos: GridPos) -> Vec<GridAction>;
    fn render(&self) -> String;
}

/// Full dynamics of an environment, `p(s', r | s, a)` as a list of
/// `(next_state, probability, reward)` entries summing to probability 1.
/// Only the dynamic-programming solver requires this.
pub trait TransitionModel {
    fn transitions(&self, state: GridPos, action: GridAction) -> Vec<(GridPos, f64, f64)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_index_round_trips() {
        for action in GridAction::ALL {
            assert_eq!(GridAction::from(usize::from(action)), action);
        }
    }

    #[test]
    fn target_respects_bounds() {
        let corner = GridPos::new(0, 0);
        assert_eq!(target(corner, GridAction::North, 3, 3), None);
        assert_eq!(target(corner, GridAction::West, 3, 3), None);
        assert_eq!(
            target(corner, GridAction::South, 3, 3),
            Some(GridPos::new(1, 0))
        );
        assert_eq!(
            target(corner, GridAction::East, 3, 3),
            Some(GridPos::new(0, 1))
        );
        let far = GridPos::new(2, 2);
        assert_eq!(target(far, GridAction::South, 3, 3), None);
        assert_eq!(target(far, GridAction::East, 3, 3), None);
    }

    #[test]
    fn clamped_target_stays_in_place() {
        let corner = GridPos::new(0, 0);
        assert_eq!(clamped_target(corner, GridAction::North, 3, 3), corner);
        assert_eq!(
            clamped_target(corner, GridAction::East, 3, 3),
            GridPos::new(0, 1)
        );
    }
}
