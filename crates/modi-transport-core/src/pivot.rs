use std::collections::HashSet;

use thiserror::Error;

use crate::cycle::Cycle;
use crate::matrix::{Allocation, Cell};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("cycle of length {0} is too short to redistribute")]
    TooShort(usize),
    #[error("cycle of length {0} does not alternate receiving and giving cells")]
    OddLength(usize),
    #[error("cycle cell {0:?} lies outside the allocation")]
    OutOfBounds(Cell),
    #[error("cells {from:?} and {to:?} share neither a row nor a column")]
    Disconnected { from: Cell, to: Cell },
    #[error("step from {from:?} to {to:?} should stay in the same {line}")]
    Misaligned {
        from: Cell,
        to: Cell,
        line: &'static str,
    },
    #[error("cell {0:?} appears more than once in the cycle")]
    RepeatedCell(Cell),
    #[error("giving cell {0:?} holds negative flow")]
    NegativeFlow(Cell),
}

/// Outcome of one redistribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    /// Quantity shifted around the cycle.
    pub theta: i64,
    /// First giving cell drained to zero.
    pub leaving: Cell,
}

impl Pivot {
    pub fn is_degenerate(&self) -> bool {
        self.theta == 0
    }
}

fn validate(allocation: &Allocation, cycle: &Cycle) -> Result<(), CycleError> {
    let cells = cycle.cells();
    if cells.len() < 4 {
        return Err(CycleError::TooShort(cells.len()));
    }
    if cells.len() % 2 != 0 {
        return Err(CycleError::OddLength(cells.len()));
    }
    let mut seen = HashSet::with_capacity(cells.len());
    for (idx, &cell) in cells.iter().enumerate() {
        if !allocation.contains(cell) {
            return Err(CycleError::OutOfBounds(cell));
        }
        if !seen.insert(cell) {
            return Err(CycleError::RepeatedCell(cell));
        }
        let next = cells[(idx + 1) % cells.len()];
        if !cell.shares_line_with(next) {
            return Err(CycleError::Disconnected {
                from: cell,
                to: next,
            });
        }
        // Steps out of even positions stay in a column, steps out of odd ones in a row.
        let (aligned, line) = if idx % 2 == 0 {
            (cell.col == next.col, "column")
        } else {
            (cell.row == next.row, "row")
        };
        if !aligned {
            return Err(CycleError::Misaligned {
                from: cell,
                to: next,
                line,
            });
        }
    }
    Ok(())
}

/// Shifts the largest feasible quantity around `cycle`, in place.
///
/// The cycle must start with a column step and then alternate column and row
/// steps over distinct cells. Each row and column then gains exactly what it
/// loses, so all supply/demand sums hold.
pub fn redistribute(allocation: &mut Allocation, cycle: &Cycle) -> Result<Pivot, CycleError> {
    validate(allocation, cycle)?;

    let mut leaving: Option<(i64, Cell)> = None;
    for cell in cycle.giving() {
        let quantity = allocation[cell];
        if quantity < 0 {
            return Err(CycleError::NegativeFlow(cell));
        }
        if leaving.map_or(true, |(theta, _)| quantity < theta) {
            leaving = Some((quantity, cell));
        }
    }
    let Some((theta, leaving)) = leaving else {
        return Err(CycleError::TooShort(cycle.len()));
    };

    for cell in cycle.receiving() {
        allocation[cell] += theta;
    }
    for cell in cycle.giving() {
        allocation[cell] -= theta;
    }

    Ok(Pivot { theta, leaving })
}
