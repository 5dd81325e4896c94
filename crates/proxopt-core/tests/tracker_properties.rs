//! Property tests of the metadata tracker.

use proptest::prelude::*;
use proxopt_core::metadata::ConvergenceTracker;
use std::time::Duration;

proptest! {
    #[test]
    fn prop_rows_keep_recording_order(
        residuals in prop::collection::vec((0.0f64..1e3, 0.0f64..1e3, 1e-3f64..1e3), 0..100),
    ) {
        let mut tracker = ConvergenceTracker::new();
        for (k, (r, s, rho)) in residuals.iter().enumerate() {
            let row = tracker.record(*r, *s, *rho, None, Duration::from_micros(k as u64));
            prop_assert_eq!(row.iteration, k + 1);
        }
        let table = tracker.finish();

        prop_assert_eq!(table.len(), residuals.len());
        prop_assert_eq!(table.is_empty(), residuals.is_empty());
        let primal: Vec<f64> = residuals.iter().map(|(r, _, _)| *r).collect();
        let rhos: Vec<f64> = residuals.iter().map(|(_, _, rho)| *rho).collect();
        prop_assert_eq!(table.primal_residuals(), primal);
        prop_assert_eq!(table.rhos(), rhos);
        for (k, row) in (&table).into_iter().enumerate() {
            prop_assert_eq!(row.iteration, k + 1);
            prop_assert_eq!(table.get(k), Some(row));
        }
    }
}
