use crate::matrix::{Allocation, CostMatrix};
use crate::potentials::Potentials;
use crate::{TransportError, TransportProblem};

pub fn row_sums(allocation: &Allocation) -> Vec<i64> {
    (0..allocation.rows())
        .map(|row| allocation.row(row).iter().sum())
        .collect()
}

pub fn col_sums(allocation: &Allocation) -> Vec<i64> {
    let mut sums = vec![0_i64; allocation.cols()];
    for (cell, &quantity) in allocation.iter() {
        sums[cell.col] += quantity;
    }
    sums
}

pub fn is_non_negative(allocation: &Allocation) -> bool {
    allocation.as_slice().iter().all(|&quantity| quantity >= 0)
}

/// Checks shape, non-negativity and every row/column sum against the problem.
pub fn check_conservation(
    problem: &TransportProblem,
    allocation: &Allocation,
) -> Result<(), TransportError> {
    if allocation.rows() != problem.rows() || allocation.cols() != problem.cols() {
        return Err(TransportError::InvalidInput(format!(
            "allocation is {}x{}, problem is {}x{}",
            allocation.rows(),
            allocation.cols(),
            problem.rows(),
            problem.cols()
        )));
    }
    if !is_non_negative(allocation) {
        return Err(TransportError::InvalidInput(
            "allocation holds negative quantities".to_string(),
        ));
    }
    for (row, (&got, &want)) in row_sums(allocation)
        .iter()
        .zip(problem.supply())
        .enumerate()
    {
        if got != want {
            return Err(TransportError::InvalidInput(format!(
                "row {row} ships {got}, supply is {want}"
            )));
        }
    }
    for (col, (&got, &want)) in col_sums(allocation)
        .iter()
        .zip(problem.demand())
        .enumerate()
    {
        if got != want {
            return Err(TransportError::InvalidInput(format!(
                "column {col} receives {got}, demand is {want}"
            )));
        }
    }
    Ok(())
}

/// Complementary slackness: basic cells are priced exactly and no empty
/// cell has a reduced cost above `tolerance`.
pub fn certify_optimal(
    allocation: &Allocation,
    cost: &CostMatrix,
    potentials: &Potentials,
    tolerance: f64,
) -> bool {
    if potentials.u.len() != allocation.rows() || potentials.v.len() != allocation.cols() {
        return false;
    }
    allocation.iter().all(|(cell, &quantity)| {
        let delta = potentials.reduced_cost(cost, cell);
        if quantity > 0 {
            delta.abs() <= tolerance
        } else {
            delta <= tolerance
        }
    })
}

pub fn total_cost(allocation: &Allocation, cost: &CostMatrix) -> f64 {
    allocation
        .iter()
        .map(|(cell, &quantity)| quantity as f64 * cost[cell])
        .sum()
}
