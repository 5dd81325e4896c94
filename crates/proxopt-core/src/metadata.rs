//! Per-iteration metadata of an optimization run.
//!
//! A run produces a [`MetadataTable`]: an ordered, append-only sequence of
//! [`IterationRecord`] rows with a fixed schema. Rows are only added through a
//! [`ConvergenceTracker`], which enforces that row `i` always precedes row
//! `i + 1`; once the tracker is finished the table is immutable.

use crate::types::Scalar;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Convergence scalars recorded after one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IterationRecord<T> {
    /// 1-based iteration index
    pub iteration: usize,
    /// Sum of distances between each primal copy and the consensus
    pub primal_residual: T,
    /// Scaled change of the consensus since the previous iteration
    pub dual_residual: T,
    /// Penalty parameter after adaptation
    pub rho: T,
    /// Objective value at the consensus, when every term can evaluate itself
    pub objective: Option<T>,
    /// Wall-clock time since the start of the run
    pub elapsed: Duration,
}

/// Ordered record of a run, one row per iteration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetadataTable<T> {
    rows: Vec<IterationRecord<T>>,
}

impl<T> Default for MetadataTable<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T: Scalar> MetadataTable<T> {
    /// Number of recorded iterations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no iteration was recorded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in iteration order.
    pub fn rows(&self) -> &[IterationRecord<T>] {
        &self.rows
    }

    /// Row at position `index` (0-based).
    pub fn get(&self, index: usize) -> Option<&IterationRecord<T>> {
        self.rows.get(index)
    }

    /// The most recent row.
    pub fn last(&self) -> Option<&IterationRecord<T>> {
        self.rows.last()
    }

    /// Iterates over rows in iteration order.
    pub fn iter(&self) -> std::slice::Iter<'_, IterationRecord<T>> {
        self.rows.iter()
    }

    /// Primal residual column.
    pub fn primal_residuals(&self) -> Vec<T> {
        self.rows.iter().map(|r| r.primal_residual).collect()
    }

    /// Dual residual column.
    pub fn dual_residuals(&self) -> Vec<T> {
        self.rows.iter().map(|r| r.dual_residual).collect()
    }

    /// Penalty column.
    pub fn rhos(&self) -> Vec<T> {
        self.rows.iter().map(|r| r.rho).collect()
    }

    /// Objective column.
    pub fn objectives(&self) -> Vec<Option<T>> {
        self.rows.iter().map(|r| r.objective).collect()
    }

    /// Elapsed time column.
    pub fn elapsed(&self) -> Vec<Duration> {
        self.rows.iter().map(|r| r.elapsed).collect()
    }
}

impl<'a, T: Scalar> IntoIterator for &'a MetadataTable<T> {
    type Item = &'a IterationRecord<T>;
    type IntoIter = std::slice::Iter<'a, IterationRecord<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Accumulates iteration rows into a [`MetadataTable`].
#[derive(Debug, Clone)]
pub struct ConvergenceTracker<T> {
    table: MetadataTable<T>,
}

impl<T: Scalar> Default for ConvergenceTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> ConvergenceTracker<T> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            table: MetadataTable::default(),
        }
    }

    /// Creates an empty tracker with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: MetadataTable {
                rows: Vec::with_capacity(capacity),
            },
        }
    }

    /// Appends the row of the next iteration and returns it.
    ///
    /// The iteration index is assigned by the tracker, so rows are numbered
    /// `1, 2, ...` in the order they are recorded.
    pub fn record(
        &mut self,
        primal_residual: T,
        dual_residual: T,
        rho: T,
        objective: Option<T>,
        elapsed: Duration,
    ) -> &IterationRecord<T> {
        let iteration = self.table.rows.len() + 1;
        self.table.rows.push(IterationRecord {
            iteration,
            primal_residual,
            dual_residual,
            rho,
            objective,
            elapsed,
        });
        &self.table.rows[iteration - 1]
    }

    /// Read-only view of the rows recorded so far.
    pub fn table(&self) -> &MetadataTable<T> {
        &self.table
    }

    /// Number of rows recorded so far.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Consumes the tracker, freezing the table.
    pub fn finish(self) -> MetadataTable<T> {
        self.table
    }
}
