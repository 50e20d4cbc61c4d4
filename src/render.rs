use fxhash::FxHashSet;

use crate::env::GridPos;
use crate::policy::{GreedyPolicy, StateSpace, ValueTable};

/// Text rendering of a grid layout. Cell precedence when markers collide:
/// start, goal, agent, obstacle, then empty.
pub fn render_grid(
    width: usize,
    height: usize,
    obstacles: &FxHashSet<GridPos>,
    start: GridPos,
    goal: GridPos,
    agent: Option<GridPos>,
) -> String {
    let mut lines: Vec<String> = vec![];
    for y in 0..height {
        let mut cells: Vec<char> = vec![];
        for x in 0..width {
            let pos = GridPos::new(y, x);
            let cell = if pos == start {
                'S'
            } else if pos == goal {
                'G'
            } else if agent == Some(pos) {
                'A'
            } else if obstacles.contains(&pos) {
                '#'
            } else {
                '.'
            };
            cells.push(cell);
        }
        lines.push(
            cells
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<String>>()
                .join(" "),
        );
    }
    lines.join("\n")
}

/// State values laid out on the grid, one row per grid row.
pub fn render_values(space: StateSpace, values: &ValueTable) -> String {
    let mut lines: Vec<String> = vec![];
    for y in 0..space.height() {
        let mut cells: Vec<String> = vec![];
        for x in 0..space.width() {
            cells.push(format!("{:6.2}", values.get(GridPos::new(y, x))));
        }
        lines.push(cells.join(" "));
    }
    lines.join("\n")
}

/// Greedy policy as arrows, with the cells in `special` marked `T`.
pub fn render_policy(space: StateSpace, policy: &GreedyPolicy, special: &[GridPos]) -> String {
    let mut lines: Vec<String> = vec![];
    for y in 0..space.height() {
        let mut cells: Vec<char> = vec![];
        for x in 0..space.width() {
            let pos = GridPos::new(y, x);
            if special.contains(&pos) {
                cells.push('T');
            } else {
                cells.push(policy[&pos].symbol());
            }
        }
        lines.push(
            cells
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<String>>()
                .join(" "),
        );
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::GridAction;

    #[test]
    fn grid_markers_follow_precedence() {
        let mut obstacles = FxHashSet::default();
        obstacles.insert(GridPos::new(1, 1));
        obstacles.insert(GridPos::new(0, 2));
        let rendered = render_grid(
            3,
            2,
            &obstacles,
            GridPos::new(0, 0),
            GridPos::new(1, 2),
            Some(GridPos::new(0, 1)),
        );
        assert_eq!(rendered, "S A #\n. # G");
    }

    #[test]
    fn policy_arrows_and_special_cells() {
        let space = StateSpace::new(2, 1);
        let mut policy = GreedyPolicy::default();
        policy.insert(GridPos::new(0, 0), GridAction::East);
        policy.insert(GridPos::new(0, 1), GridAction::North);
        let rendered = render_policy(space, &policy, &[GridPos::new(0, 1)]);
        assert_eq!(rendered, "→ T");
    }

    #[test]
    fn values_align_per_row() {
        let space = StateSpace::new(2, 2);
        let mut values = ValueTable::new(space);
        values.set(GridPos::new(0, 1), 10.0);
        let rendered = render_values(space, &values);
        assert_eq!(rendered, "  0.00  10.00\n  0.00   0.00");
    }
}
