//! Exact 0/1 knapsack over integer cells.
//!
//! `best[i][w]` is the highest value reachable with the first `i` items in a
//! budget of `w` cells. Only the previous row of values is kept, but the
//! full `taken[i][w]` table is stored so the chosen subset can be recovered
//! by walking back from `(n, budget)`. Tables are allocated per call.

use std::sync::atomic::{AtomicBool, Ordering};

/// An item offered to the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Item {
    /// Cells consumed. Zero-cell items are never taken.
    pub cells: usize,
    pub value: f64,
}

/// The chosen subset.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Indices into the input, ascending.
    pub indices: Vec<usize>,
    pub value: f64,
    pub cells: usize,
}

/// Pick the subset of `items` with the highest summed value whose cells fit
/// in `budget`.
///
/// An item is taken only when it strictly improves on leaving it out, so
/// among equal-value subsets the one built from earlier items wins.
///
/// `cancel` is checked before each item's row; once it is set the solver
/// stops and returns `None`.
pub fn solve(items: &[Item], budget: usize, cancel: &AtomicBool) -> Option<Selection> {
    let width = budget + 1;
    let mut previous = vec![0.0f64; width];
    let mut current = vec![0.0f64; width];
    let mut taken = vec![false; items.len() * width];

    for (i, item) in items.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return None;
        }
        for w in 0..width {
            current[w] = previous[w];
            if item.cells == 0 || item.cells > w {
                continue;
            }
            let with_item = previous[w - item.cells] + item.value;
            if with_item > previous[w] {
                current[w] = with_item;
                taken[i * width + w] = true;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let value = previous[budget];
    let mut indices = Vec::new();
    let mut remaining = budget;
    for (i, item) in items.iter().enumerate().rev() {
        if taken[i * width + remaining] {
            indices.push(i);
            remaining -= item.cells;
        }
    }
    indices.reverse();

    Some(Selection {
        indices,
        value,
        cells: budget - remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(pairs: &[(usize, f64)]) -> Vec<Item> {
        pairs
            .iter()
            .map(|&(cells, value)| Item { cells, value })
            .collect()
    }

    fn solve_all(items: &[Item], budget: usize) -> Selection {
        solve(items, budget, &AtomicBool::new(false)).unwrap()
    }

    #[test]
    fn empty_input() {
        let selection = solve_all(&[], 10);
        assert!(selection.indices.is_empty());
        assert_eq!(selection.value, 0.0);
        assert_eq!(selection.cells, 0);
    }

    #[test]
    fn zero_budget_takes_nothing() {
        let selection = solve_all(&items(&[(1, 5.0)]), 0);
        assert!(selection.indices.is_empty());
    }

    #[test]
    fn classic_instance() {
        // Greedy by ratio would take 0 and 1 for 160; optimum is 1 and 2
        let selection = solve_all(&items(&[(10, 60.0), (20, 100.0), (30, 120.0)]), 50);
        assert_eq!(selection.indices, vec![1, 2]);
        assert_eq!(selection.value, 220.0);
        assert_eq!(selection.cells, 50);
    }

    #[test]
    fn item_heavier_than_budget_skipped() {
        let selection = solve_all(&items(&[(11, 1000.0), (3, 1.0)]), 10);
        assert_eq!(selection.indices, vec![1]);
    }

    #[test]
    fn exact_fit() {
        let selection = solve_all(&items(&[(4, 4.0), (6, 6.0)]), 10);
        assert_eq!(selection.indices, vec![0, 1]);
        assert_eq!(selection.cells, 10);
    }

    #[test]
    fn ties_keep_earlier_items() {
        let selection = solve_all(&items(&[(5, 10.0), (5, 10.0)]), 5);
        assert_eq!(selection.indices, vec![0]);
    }

    #[test]
    fn cancelled_before_start() {
        let cancel = AtomicBool::new(true);
        assert_eq!(solve(&items(&[(1, 5.0)]), 10, &cancel), None);
    }

    #[test]
    fn zero_cell_items_ignored() {
        let selection = solve_all(&items(&[(0, 50.0), (2, 1.0)]), 2);
        assert_eq!(selection.indices, vec![1]);
    }
}
