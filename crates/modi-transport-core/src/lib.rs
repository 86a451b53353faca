pub mod balance;
pub mod cycle;
pub mod initial;
pub mod matrix;
pub mod pivot;
pub mod potentials;
pub mod pricing;
mod report;
pub mod solver;
pub mod verify;

use log::info;
use num_traits::ToPrimitive;
use thiserror::Error;

pub use initial::InitialMethod;
pub use matrix::{Allocation, Cell, CostMatrix, Grid};
pub use potentials::Potentials;
pub use solver::{SolveStats, SolveStatus, TransportSolution};

/// A transportation problem: supply nodes, demand nodes and unit costs.
#[derive(Debug, Clone)]
pub struct TransportProblem {
    supply: Vec<i64>,
    demand: Vec<i64>,
    cost: CostMatrix,
}

#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub max_iters: usize,
    /// An empty cell enters the basis only if its reduced cost exceeds this.
    pub tolerance: f64,
    pub initial: InitialMethod,
    /// Re-verify row and column sums after every redistribution.
    pub check_invariants: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            max_iters: 100,
            tolerance: 0.0,
            initial: InitialMethod::MatrixMinimum,
            check_invariants: false,
        }
    }
}

impl TransportOptions {
    pub fn validate(&self) -> Result<(), TransportError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(TransportError::InvalidInput(
                "tolerance must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unbalanced problem: total supply {supply} differs from total demand {demand}")]
    Unbalanced { supply: i64, demand: i64 },
    #[error(
        "potentials undetermined at iteration {iteration}: rows {rows:?} and columns {cols:?} are not connected to the basis"
    )]
    PotentialsUndetermined {
        iteration: usize,
        rows: Vec<usize>,
        cols: Vec<usize>,
    },
    #[error("no redistribution cycle through cell ({row}, {col}) at iteration {iteration}")]
    NoCycle {
        iteration: usize,
        row: usize,
        col: usize,
    },
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

impl TransportProblem {
    pub fn new<C>(
        supply: Vec<i64>,
        demand: Vec<i64>,
        cost: Vec<Vec<C>>,
    ) -> Result<Self, TransportError>
    where
        C: ToPrimitive + Copy,
    {
        if supply.is_empty() || demand.is_empty() {
            return Err(TransportError::InvalidInput(
                "problem needs at least one supply and one demand node".to_string(),
            ));
        }
        if supply.iter().chain(demand.iter()).any(|&quantity| quantity < 0) {
            return Err(TransportError::InvalidInput(
                "supply and demand quantities must be non-negative".to_string(),
            ));
        }
        if cost.len() != supply.len() {
            return Err(TransportError::InvalidInput(format!(
                "cost matrix has {} rows for {} supply nodes",
                cost.len(),
                supply.len()
            )));
        }

        let mut rows = Vec::with_capacity(cost.len());
        for (row, units) in cost.iter().enumerate() {
            if units.len() != demand.len() {
                return Err(TransportError::InvalidInput(format!(
                    "cost row {row} has {} entries for {} demand nodes",
                    units.len(),
                    demand.len()
                )));
            }
            let converted = units
                .iter()
                .map(|unit| unit.to_f64().filter(|value| value.is_finite()))
                .collect::<Option<Vec<f64>>>()
                .ok_or_else(|| {
                    TransportError::InvalidInput(format!("cost row {row} has a non-finite entry"))
                })?;
            rows.push(converted);
        }

        Ok(Self {
            supply,
            demand,
            cost: Grid::from_rows(rows)?,
        })
    }

    pub fn supply(&self) -> &[i64] {
        &self.supply
    }

    pub fn demand(&self) -> &[i64] {
        &self.demand
    }

    pub fn cost(&self) -> &CostMatrix {
        &self.cost
    }

    pub fn rows(&self) -> usize {
        self.supply.len()
    }

    pub fn cols(&self) -> usize {
        self.demand.len()
    }
}

/// Checks balance, builds the configured starting plan and improves it with MODI.
pub fn solve(
    problem: &TransportProblem,
    options: &TransportOptions,
) -> Result<TransportSolution, TransportError> {
    let total = balance::check_balance(problem.supply(), problem.demand())?;
    let allocation = initial::build_initial(problem, options.initial);
    info!(
        "{}x{} problem, total quantity {}, {:?} start costs {}",
        problem.rows(),
        problem.cols(),
        total,
        options.initial,
        verify::total_cost(&allocation, problem.cost())
    );
    solver::improve(problem, allocation, options)
}

/// Like [`solve`], but starts from a caller-supplied feasible plan.
pub fn solve_from(
    problem: &TransportProblem,
    allocation: Allocation,
    options: &TransportOptions,
) -> Result<TransportSolution, TransportError> {
    balance::check_balance(problem.supply(), problem.demand())?;
    verify::check_conservation(problem, &allocation)?;
    solver::improve(problem, allocation, options)
}

pub fn solve_transport<C>(
    supply: Vec<i64>,
    demand: Vec<i64>,
    cost: Vec<Vec<C>>,
) -> Result<TransportSolution, TransportError>
where
    C: ToPrimitive + Copy,
{
    let problem = TransportProblem::new(supply, demand, cost)?;
    solve(&problem, &TransportOptions::default())
}
