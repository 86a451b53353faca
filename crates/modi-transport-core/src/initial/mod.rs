//! Builders for a feasible starting allocation.
//!
//! Every builder satisfies the row and column sum constraints of a balanced
//! problem but makes no promise about optimality or degeneracy: the basis may
//! contain fewer than `rows + cols - 1` positive cells.

mod minimum;
mod northwest;
mod vogel;

pub use minimum::matrix_minimum;
pub use northwest::northwest_corner;
pub use vogel::vogel_approximation;

use crate::matrix::Allocation;
use crate::TransportProblem;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitialMethod {
    /// Greedy cheapest-cell rule; first cell in row-major order wins ties.
    #[default]
    MatrixMinimum,
    NorthwestCorner,
    /// Vogel's approximation: allocate on the line with the largest regret.
    Vogel,
}

pub fn build_initial(problem: &TransportProblem, method: InitialMethod) -> Allocation {
    let (supply, demand, cost) = (problem.supply(), problem.demand(), problem.cost());
    match method {
        InitialMethod::MatrixMinimum => matrix_minimum(supply, demand, cost),
        InitialMethod::NorthwestCorner => northwest_corner(supply, demand, cost),
        InitialMethod::Vogel => vogel_approximation(supply, demand, cost),
    }
}
