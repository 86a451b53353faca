use log::{debug, info, warn};

use crate::cycle::find_cycle;
use crate::matrix::Allocation;
use crate::pivot::redistribute;
use crate::potentials::{compute_potentials, Potentials};
use crate::pricing::select_entering;
use crate::verify::{check_conservation, total_cost};
use crate::{TransportError, TransportOptions, TransportProblem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// No empty cell has a positive reduced cost.
    Optimal,
    /// The iteration cap was hit first; the plan is feasible but may not be optimal.
    IterationLimit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveStats {
    pub iterations: usize,
    pub pivots: usize,
    pub degenerate_pivots: usize,
    pub initial_cost: f64,
    /// Objective after each pivot.
    pub cost_history: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportSolution {
    pub allocation: Allocation,
    pub total_cost: f64,
    pub status: SolveStatus,
    /// Final duals; present only for an optimal plan.
    pub potentials: Option<Potentials>,
    pub stats: SolveStats,
}

impl TransportSolution {
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

fn finish(
    allocation: Allocation,
    problem: &TransportProblem,
    status: SolveStatus,
    potentials: Option<Potentials>,
    stats: SolveStats,
) -> TransportSolution {
    let total_cost = total_cost(&allocation, problem.cost());
    TransportSolution {
        allocation,
        total_cost,
        status,
        potentials,
        stats,
    }
}

/// Runs MODI iterations from a feasible allocation until no entering cell
/// remains or `options.max_iters` iterations have been spent.
pub fn improve(
    problem: &TransportProblem,
    mut allocation: Allocation,
    options: &TransportOptions,
) -> Result<TransportSolution, TransportError> {
    options.validate()?;
    let cost = problem.cost();
    let mut stats = SolveStats {
        initial_cost: total_cost(&allocation, cost),
        ..SolveStats::default()
    };

    while stats.iterations < options.max_iters {
        stats.iterations += 1;
        let iteration = stats.iterations;

        let potentials = compute_potentials(&allocation, cost).map_err(|err| {
            warn!("iteration {iteration}: {err}");
            TransportError::PotentialsUndetermined {
                iteration,
                rows: err.rows,
                cols: err.cols,
            }
        })?;

        let Some(entering) = select_entering(&allocation, cost, &potentials, options.tolerance)
        else {
            info!(
                "optimal after {} iterations ({} pivots)",
                iteration, stats.pivots
            );
            return Ok(finish(
                allocation,
                problem,
                SolveStatus::Optimal,
                Some(potentials),
                stats,
            ));
        };

        let no_cycle = || TransportError::NoCycle {
            iteration,
            row: entering.cell.row,
            col: entering.cell.col,
        };
        let cycle = find_cycle(&allocation, entering.cell).ok_or_else(|| {
            warn!(
                "iteration {iteration}: no cycle through {:?}",
                entering.cell
            );
            no_cycle()
        })?;
        let pivot = redistribute(&mut allocation, &cycle).map_err(|err| {
            warn!("iteration {iteration}: {err}");
            no_cycle()
        })?;

        if options.check_invariants {
            check_conservation(problem, &allocation).map_err(|err| match err {
                TransportError::InvalidInput(msg) => TransportError::InvariantViolated(msg),
                other => other,
            })?;
        }

        stats.pivots += 1;
        if pivot.is_degenerate() {
            stats.degenerate_pivots += 1;
        }
        let objective = total_cost(&allocation, cost);
        stats.cost_history.push(objective);
        debug!(
            "iteration {}: entering {:?} delta={} cycle_len={} theta={} leaving {:?} cost={}",
            iteration,
            entering.cell,
            entering.delta,
            cycle.len(),
            pivot.theta,
            pivot.leaving,
            objective
        );
    }

    warn!(
        "iteration limit {} reached; plan may not be optimal",
        options.max_iters
    );
    Ok(finish(
        allocation,
        problem,
        SolveStatus::IterationLimit,
        None,
        stats,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial::matrix_minimum;
    use crate::matrix::{Cell, Grid};

    fn problem(supply: Vec<i64>, demand: Vec<i64>, cost: Vec<Vec<i64>>) -> TransportProblem {
        TransportProblem::new(supply, demand, cost).unwrap()
    }

    fn start(problem: &TransportProblem) -> Allocation {
        matrix_minimum(problem.supply(), problem.demand(), problem.cost())
    }

    #[test]
    fn already_optimal_start_takes_one_iteration() {
        let problem = problem(vec![10, 10], vec![5, 15], vec![vec![1, 2], vec![3, 4]]);
        let solution = improve(&problem, start(&problem), &TransportOptions::default()).unwrap();
        assert_eq!(solution.status, SolveStatus::Optimal);
        assert_eq!(solution.stats.iterations, 1);
        assert_eq!(solution.stats.pivots, 0);
        assert_eq!(solution.total_cost, 55.0);
        assert_eq!(solution.stats.initial_cost, 55.0);
    }

    #[test]
    fn records_each_pivot() {
        let problem = problem(
            vec![7, 9, 18],
            vec![5, 8, 7, 14],
            vec![
                vec![19, 30, 50, 10],
                vec![70, 30, 40, 60],
                vec![40, 8, 70, 20],
            ],
        );
        let solution = improve(&problem, start(&problem), &TransportOptions::default()).unwrap();
        assert!(solution.is_optimal());
        assert_eq!(solution.stats.iterations, 3);
        assert_eq!(solution.stats.pivots, 2);
        assert_eq!(solution.stats.degenerate_pivots, 0);
        assert_eq!(solution.stats.initial_cost, 814.0);
        assert_eq!(solution.stats.cost_history, vec![781.0, 743.0]);
        assert_eq!(solution.total_cost, 743.0);
    }

    #[test]
    fn zero_iteration_budget_returns_start_unchanged() {
        let problem = problem(vec![10, 10], vec![5, 15], vec![vec![1, 2], vec![3, 4]]);
        let options = TransportOptions {
            max_iters: 0,
            ..TransportOptions::default()
        };
        let initial = start(&problem);
        let solution = improve(&problem, initial.clone(), &options).unwrap();
        assert_eq!(solution.status, SolveStatus::IterationLimit);
        assert_eq!(solution.allocation, initial);
        assert!(solution.potentials.is_none());
    }

    #[test]
    fn disconnected_basis_aborts_with_unreached_lines() {
        let problem = problem(vec![5, 5], vec![5, 5], vec![vec![1, 2], vec![2, 1]]);
        let err = improve(&problem, start(&problem), &TransportOptions::default()).unwrap_err();
        assert_eq!(
            err,
            TransportError::PotentialsUndetermined {
                iteration: 1,
                rows: vec![1],
                cols: vec![1],
            }
        );
    }

    #[test]
    fn invariant_checks_pass_on_valid_pivots() {
        let problem = problem(
            vec![7, 9, 18],
            vec![5, 8, 7, 14],
            vec![
                vec![19, 30, 50, 10],
                vec![70, 30, 40, 60],
                vec![40, 8, 70, 20],
            ],
        );
        let options = TransportOptions {
            check_invariants: true,
            ..TransportOptions::default()
        };
        let solution = improve(&problem, start(&problem), &options).unwrap();
        assert_eq!(solution.allocation[Cell::new(2, 3)], 12);
    }

    #[test]
    fn invalid_options_are_rejected() {
        let problem = problem(vec![1], vec![1], vec![vec![1]]);
        let options = TransportOptions {
            tolerance: f64::NAN,
            ..TransportOptions::default()
        };
        let err = improve(&problem, Grid::new(1, 1, 1), &options).unwrap_err();
        assert!(matches!(err, TransportError::InvalidInput(_)));
    }

    #[test]
    fn default_tolerance_takes_the_smallest_real_gain() {
        let epsilon = 2.0_f64.powi(-40);
        let problem = TransportProblem::new(
            vec![10, 10],
            vec![5, 15],
            vec![vec![1.0, 2.0], vec![3.0 - epsilon, 4.0]],
        )
        .unwrap();

        let solution = improve(&problem, start(&problem), &TransportOptions::default()).unwrap();
        assert!(solution.is_optimal());
        assert_eq!(solution.stats.pivots, 1);
        assert_eq!(solution.allocation.to_rows(), vec![vec![0, 10], vec![5, 5]]);
        assert_eq!(solution.total_cost, 55.0 - 5.0 * epsilon);

        let loose = TransportOptions {
            tolerance: 1e-9,
            ..TransportOptions::default()
        };
        let solution = improve(&problem, start(&problem), &loose).unwrap();
        assert!(solution.is_optimal());
        assert_eq!(solution.stats.pivots, 0);
        assert_eq!(solution.total_cost, 55.0);
    }
}
