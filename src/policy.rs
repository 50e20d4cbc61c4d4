use indexmap::IndexMap;
use ndarray::{Array1, Array2, ArrayView1};

use crate::env::{GridAction, GridPos};
use crate::utils::{argmax, max};

/// Deterministic state to action mapping, in row-major state order.
pub type GreedyPolicy = IndexMap<GridPos, GridAction>;

/// Bijection between grid positions and row indices, built once from the
/// grid dimensions. Backing the tables with contiguous arrays keeps the
/// "unseen state holds zero for every action" rule an explicit
/// initialization step instead of a lookup side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSpace {
    width: usize,
    height: usize,
}

impl StateSpace {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero");
        Self { width, height }
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn index_of(&self, pos: GridPos) -> usize {
        debug_assert!(pos.x < self.width && pos.y < self.height);
        pos.y * self.width + pos.x
    }

    pub fn pos_of(&self, index: usize) -> GridPos {
        debug_assert!(index < self.len());
        GridPos::new(index / self.width, index % self.width)
    }

    /// All states in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.len()).map(|index| self.pos_of(index))
    }
}

/// Per state, per action table of `f64` values, zero-initialized for the
/// whole state space up front.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: Array2<f64>,
    space: StateSpace,
}

impl QTable {
    pub fn new(space: StateSpace) -> Self {
        Self {
            values: Array2::zeros((space.len(), GridAction::COUNT)),
            space,
        }
    }

    pub fn space(&self) -> StateSpace {
        self.space
    }

    pub fn row(&self, pos: GridPos) -> ArrayView1<f64> {
        self.values.row(self.space.index_of(pos))
    }

    pub fn get(&self, pos: GridPos, action: GridAction) -> f64 {
        self.values[[self.space.index_of(pos), usize::from(action)]]
    }

    pub fn add(&mut self, pos: GridPos, action: GridAction, delta: f64) {
        self.values[[self.space.index_of(pos), usize::from(action)]] += delta;
    }

    pub fn max_value(&self, pos: GridPos) -> f64 {
        max(self.row(pos).iter().copied())
    }

    /// First-maximum action of the row, so ties resolve in enum order.
    pub fn greedy_action(&self, pos: GridPos) -> GridAction {
        GridAction::from(argmax(self.row(pos).iter()))
    }

    pub fn greedy_policy(&self) -> GreedyPolicy {
        self.space
            .iter()
            .map(|pos| (pos, self.greedy_action(pos)))
            .collect()
    }

    pub fn reset(&mut self) {
        self.values.fill(0.0);
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.values
    }
}

/// Per state value table, zero-initialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Array1<f64>,
    space: StateSpace,
}

impl ValueTable {
    pub fn new(space: StateSpace) -> Self {
        Self {
            values: Array1::zeros(space.len()),
            space,
        }
    }

    pub fn space(&self) -> StateSpace {
        self.space
    }

    pub fn get(&self, pos: GridPos) -> f64 {
        self.values[self.space.index_of(pos)]
    }

    pub fn set(&mut self, pos: GridPos, value: f64) {
        self.values[self.space.index_of(pos)] = value;
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_index_round_trips() {
        let space = StateSpace::new(10, 4);
        for index in 0..space.len() {
            assert_eq!(space.index_of(space.pos_of(index)), index);
        }
        assert_eq!(space.index_of(GridPos::new(1, 3)), 13);
        assert_eq!(space.pos_of(13), GridPos::new(1, 3));
    }

    #[test]
    fn fresh_table_is_zero_for_every_action() {
        let table = QTable::new(StateSpace::new(3, 3));
        for pos in table.space().iter() {
            for action in GridAction::ALL {
                assert_eq!(table.get(pos, action), 0.0);
            }
        }
    }

    #[test]
    fn greedy_action_breaks_ties_in_enum_order() {
        let space = StateSpace::new(2, 2);
        let mut table = QTable::new(space);
        let pos = GridPos::new(0, 0);
        assert_eq!(table.greedy_action(pos), GridAction::North);
        table.add(pos, GridAction::West, 1.0);
        table.add(pos, GridAction::East, 1.0);
        assert_eq!(table.greedy_action(pos), GridAction::West);
    }

    #[test]
    fn greedy_policy_covers_the_space_in_order() {
        let space = StateSpace::new(2, 2);
        let policy = QTable::new(space).greedy_policy();
        let states: Vec<GridPos> = policy.keys().copied().collect();
        assert_eq!(
            states,
            vec![
                GridPos::new(0, 0),
                GridPos::new(0, 1),
                GridPos::new(1, 0),
                GridPos::new(1, 1),
            ]
        );
    }
}
