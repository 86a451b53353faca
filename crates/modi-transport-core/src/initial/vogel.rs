use crate::matrix::{Allocation, Cell, CostMatrix, Grid};

#[derive(Debug, Clone, Copy)]
struct Regret {
    penalty: f64,
    cell: Cell,
}

/// Penalty and cheapest position along one line, over the active positions only.
fn line_regret<I>(costs: I) -> Option<(f64, usize)>
where
    I: Iterator<Item = (usize, f64)>,
{
    let mut cheapest: Option<(f64, usize)> = None;
    let mut runner_up: Option<f64> = None;
    for (idx, unit) in costs {
        match cheapest {
            Some((best, _)) if unit >= best => {
                if runner_up.map_or(true, |second| unit < second) {
                    runner_up = Some(unit);
                }
            }
            _ => {
                runner_up = cheapest.map(|(best, _)| best);
                cheapest = Some((unit, idx));
            }
        }
    }
    let (best, idx) = cheapest?;
    let penalty = match runner_up {
        Some(second) => second - best,
        None => best,
    };
    Some((penalty, idx))
}

pub fn vogel_approximation(supply: &[i64], demand: &[i64], cost: &CostMatrix) -> Allocation {
    let mut allocation = Grid::new(supply.len(), demand.len(), 0_i64);
    let mut remaining_supply = supply.to_vec();
    let mut remaining_demand = demand.to_vec();

    while remaining_supply.iter().any(|&left| left > 0) {
        let mut chosen: Option<Regret> = None;
        let mut consider = |candidate: Regret| {
            if chosen.map_or(true, |best| candidate.penalty > best.penalty) {
                chosen = Some(candidate);
            }
        };

        for (row, &left) in remaining_supply.iter().enumerate() {
            if left <= 0 {
                continue;
            }
            let active = remaining_demand
                .iter()
                .enumerate()
                .filter(|(_, &wanted)| wanted > 0)
                .map(|(col, _)| (col, cost[Cell::new(row, col)]));
            if let Some((penalty, col)) = line_regret(active) {
                consider(Regret {
                    penalty,
                    cell: Cell::new(row, col),
                });
            }
        }
        for (col, &wanted) in remaining_demand.iter().enumerate() {
            if wanted <= 0 {
                continue;
            }
            let active = remaining_supply
                .iter()
                .enumerate()
                .filter(|(_, &left)| left > 0)
                .map(|(row, _)| (row, cost[Cell::new(row, col)]));
            if let Some((penalty, row)) = line_regret(active) {
                consider(Regret {
                    penalty,
                    cell: Cell::new(row, col),
                });
            }
        }

        let Some(Regret { cell, .. }) = chosen else {
            break;
        };
        let quantity = remaining_supply[cell.row].min(remaining_demand[cell.col]);
        allocation[cell] += quantity;
        remaining_supply[cell.row] -= quantity;
        remaining_demand[cell.col] -= quantity;
    }

    allocation
}
