use crate::matrix::{Allocation, Cell, CostMatrix, Grid};

/// Ignores costs entirely; walks from the top-left cell towards the bottom-right.
pub fn northwest_corner(supply: &[i64], demand: &[i64], _cost: &CostMatrix) -> Allocation {
    let mut allocation = Grid::new(supply.len(), demand.len(), 0_i64);
    let mut remaining_supply = supply.to_vec();
    let mut remaining_demand = demand.to_vec();
    let (mut row, mut col) = (0, 0);

    while row < supply.len() && col < demand.len() {
        let quantity = remaining_supply[row].min(remaining_demand[col]);
        allocation[Cell::new(row, col)] = quantity;
        remaining_supply[row] -= quantity;
        remaining_demand[col] -= quantity;
        if remaining_supply[row] == 0 {
            row += 1;
        } else {
            col += 1;
        }
    }

    allocation
}
