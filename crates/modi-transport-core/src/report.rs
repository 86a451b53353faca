use std::fmt;

use crate::matrix::Grid;
use crate::solver::{SolveStatus, TransportSolution};

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            let mut first = true;
            for value in self.row(row) {
                if !first {
                    f.write_str("\t")?;
                }
                write!(f, "{value}")?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for TransportSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.allocation)?;
        writeln!(f)?;
        write!(f, "total cost: {}", self.total_cost)?;
        if self.status == SolveStatus::IterationLimit {
            writeln!(f)?;
            write!(
                f,
                "warning: iteration limit reached after {} iterations, plan may not be optimal",
                self.stats.iterations
            )?;
        }
        Ok(())
    }
}
