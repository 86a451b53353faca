use thiserror::Error;

use crate::matrix::{Allocation, Cell, CostMatrix};

/// Row duals `u` and column duals `v`, anchored at `u[0] = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Potentials {
    pub u: Vec<f64>,
    pub v: Vec<f64>,
}

impl Potentials {
    /// `u[i] + v[j] - cost[i, j]`; positive means routing flow through the cell pays off.
    pub fn reduced_cost(&self, cost: &CostMatrix, cell: Cell) -> f64 {
        self.u[cell.row] + self.v[cell.col] - cost[cell]
    }
}

/// Rows and columns that the positive cells of the allocation never reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("potentials undetermined for rows {rows:?} and columns {cols:?}")]
pub struct UndeterminedPotentials {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

/// Propagates `u[i] + v[j] = cost[i, j]` across positive cells until a full
/// pass derives nothing new.
///
/// Cells carrying zero flow are never treated as basic, so a degenerate
/// allocation whose positive cells do not connect every row and column fails
/// here instead of producing partial duals.
pub fn compute_potentials(
    allocation: &Allocation,
    cost: &CostMatrix,
) -> Result<Potentials, UndeterminedPotentials> {
    let mut u: Vec<Option<f64>> = vec![None; allocation.rows()];
    let mut v: Vec<Option<f64>> = vec![None; allocation.cols()];
    if let Some(anchor) = u.first_mut() {
        *anchor = Some(0.0);
    }

    let mut changed = true;
    while changed {
        changed = false;
        for (cell, &quantity) in allocation.iter() {
            if quantity <= 0 {
                continue;
            }
            match (u[cell.row], v[cell.col]) {
                (Some(row_value), None) => {
                    v[cell.col] = Some(cost[cell] - row_value);
                    changed = true;
                }
                (None, Some(col_value)) => {
                    u[cell.row] = Some(cost[cell] - col_value);
                    changed = true;
                }
                _ => {}
            }
        }
    }

    let rows = undefined_indices(&u);
    let cols = undefined_indices(&v);
    if !rows.is_empty() || !cols.is_empty() {
        return Err(UndeterminedPotentials { rows, cols });
    }
    Ok(Potentials {
        u: u.into_iter().flatten().collect(),
        v: v.into_iter().flatten().collect(),
    })
}

fn undefined_indices(values: &[Option<f64>]) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_none())
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Grid;

    fn grid<T: Clone>(rows: Vec<Vec<T>>) -> Grid<T> {
        Grid::from_rows(rows).unwrap()
    }

    #[test]
    fn derives_duals_along_spanning_basis() {
        let allocation = grid(vec![vec![5, 5], vec![0, 10]]);
        let cost = grid(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let potentials = compute_potentials(&allocation, &cost).unwrap();
        assert_eq!(potentials.u, vec![0.0, 2.0]);
        assert_eq!(potentials.v, vec![1.0, 2.0]);
        assert_eq!(potentials.reduced_cost(&cost, Cell::new(1, 0)), 0.0);
    }

    #[test]
    fn needs_several_passes_when_basis_is_scanned_out_of_order() {
        // (1, 0) cannot be resolved until (1, 1) has fixed u[1] on the first pass.
        let allocation = grid(vec![vec![0, 4], vec![3, 2]]);
        let cost = grid(vec![vec![9.0, 2.0], vec![6.0, 5.0]]);
        let potentials = compute_potentials(&allocation, &cost).unwrap();
        assert_eq!(potentials.u, vec![0.0, 3.0]);
        assert_eq!(potentials.v, vec![3.0, 2.0]);
        for (cell, &quantity) in allocation.iter() {
            if quantity > 0 {
                assert_eq!(potentials.reduced_cost(&cost, cell), 0.0);
            }
        }
    }

    #[test]
    fn disconnected_basis_reports_unreached_lines() {
        let allocation = grid(vec![vec![5, 0], vec![0, 5]]);
        let cost = grid(vec![vec![1.0, 2.0], vec![2.0, 1.0]]);
        let err = compute_potentials(&allocation, &cost).unwrap_err();
        assert_eq!(err.rows, vec![1]);
        assert_eq!(err.cols, vec![1]);
    }

    #[test]
    fn single_cell_problem() {
        let allocation = grid(vec![vec![5]]);
        let cost = grid(vec![vec![7.0]]);
        let potentials = compute_potentials(&allocation, &cost).unwrap();
        assert_eq!(potentials.u, vec![0.0]);
        assert_eq!(potentials.v, vec![7.0]);
    }
}
