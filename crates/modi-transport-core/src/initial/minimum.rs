use crate::matrix::{Allocation, Cell, CostMatrix, Grid};

pub fn matrix_minimum(supply: &[i64], demand: &[i64], cost: &CostMatrix) -> Allocation {
    let mut allocation = Grid::new(supply.len(), demand.len(), 0_i64);
    let mut remaining_supply = supply.to_vec();
    let mut remaining_demand = demand.to_vec();

    while remaining_supply.iter().any(|&left| left > 0) {
        let mut cheapest: Option<(f64, Cell)> = None;
        for (row, &left) in remaining_supply.iter().enumerate() {
            if left <= 0 {
                continue;
            }
            for (col, &wanted) in remaining_demand.iter().enumerate() {
                if wanted <= 0 {
                    continue;
                }
                let cell = Cell::new(row, col);
                let unit = cost[cell];
                if cheapest.map_or(true, |(best, _)| unit < best) {
                    cheapest = Some((unit, cell));
                }
            }
        }

        let Some((_, cell)) = cheapest else {
            break;
        };
        let quantity = remaining_supply[cell.row].min(remaining_demand[cell.col]);
        allocation[cell] = quantity;
        remaining_supply[cell.row] -= quantity;
        remaining_demand[cell.col] -= quantity;
    }

    allocation
}
