use crate::matrix::{Allocation, Cell, CostMatrix};
use crate::potentials::Potentials;

/// Non-basic cell chosen to enter the basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnteringCell {
    pub cell: Cell,
    pub delta: f64,
}

/// Largest reduced cost over the empty cells, first in row-major order on ties.
///
/// Returns `None` only when every cell carries flow.
pub fn best_reduced_cost(
    allocation: &Allocation,
    cost: &CostMatrix,
    potentials: &Potentials,
) -> Option<EnteringCell> {
    let mut best: Option<EnteringCell> = None;
    for (cell, &quantity) in allocation.iter() {
        if quantity != 0 {
            continue;
        }
        let delta = potentials.reduced_cost(cost, cell);
        if best.map_or(true, |current| delta > current.delta) {
            best = Some(EnteringCell { cell, delta });
        }
    }
    best
}

/// The entering cell, or `None` once no cell improves by more than `tolerance`.
pub fn select_entering(
    allocation: &Allocation,
    cost: &CostMatrix,
    potentials: &Potentials,
    tolerance: f64,
) -> Option<EnteringCell> {
    best_reduced_cost(allocation, cost, potentials).filter(|candidate| candidate.delta > tolerance)
}
