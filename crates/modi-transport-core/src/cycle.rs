//! Stepping-stone cycle search.
//!
//! The basic cells form an implicit bipartite graph between rows and columns.
//! A cycle through an empty entering cell alternates a vertical step (same
//! column, another row) with a horizontal step (same row, another column) and
//! only ever lands on cells carrying flow, except for the final step that
//! closes back onto the entering cell.

use crate::matrix::{Allocation, Cell, Grid};

/// Ordered cells of a stepping-stone cycle, starting at the entering cell.
///
/// Even positions receive flow and odd positions give it up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    cells: Vec<Cell>,
}

impl Cycle {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn entering(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn receiving(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied().step_by(2)
    }

    pub fn giving(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied().skip(1).step_by(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Vertical,
    Horizontal,
}

impl Step {
    fn flip(self) -> Self {
        match self {
            Step::Vertical => Step::Horizontal,
            Step::Horizontal => Step::Vertical,
        }
    }
}

#[derive(Debug)]
struct Frame {
    cell: Cell,
    step: Step,
    next: usize,
}

/// Depth-first search for the cycle the entering cell closes with the basis.
///
/// Candidates are tried in index order and the first closed cycle is
/// returned. The search state is local to the call, so concurrent or nested
/// searches over different allocations never interfere.
pub fn find_cycle(allocation: &Allocation, start: Cell) -> Option<Cycle> {
    if !allocation.contains(start) {
        return None;
    }

    let mut visited = Grid::new(allocation.rows(), allocation.cols(), false);
    visited[start] = true;
    let mut path = vec![start];
    let mut stack = vec![Frame {
        cell: start,
        step: Step::Vertical,
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let limit = match frame.step {
            Step::Vertical => allocation.rows(),
            Step::Horizontal => allocation.cols(),
        };
        if frame.next >= limit {
            let exhausted = frame.cell;
            stack.pop();
            if !stack.is_empty() {
                visited[exhausted] = false;
                path.pop();
            }
            continue;
        }

        let idx = frame.next;
        frame.next += 1;
        let (current, step) = (frame.cell, frame.step);
        let candidate = match step {
            Step::Vertical if idx != current.row => Cell::new(idx, current.col),
            Step::Horizontal if idx != current.col => Cell::new(current.row, idx),
            _ => continue,
        };

        if candidate == start {
            // A closing step needs at least three other cells on the path.
            if path.len() > 3 {
                return Some(Cycle::new(path));
            }
            continue;
        }
        if allocation[candidate] <= 0 || visited[candidate] {
            continue;
        }

        visited[candidate] = true;
        path.push(candidate);
        stack.push(Frame {
            cell: candidate,
            step: step.flip(),
            next: 0,
        });
    }

    None
}
