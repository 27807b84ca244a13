//! Assertion helpers for `TestPlant` integration tests.

use crate::time_series::TimeSeriesRow;

use super::TestPlant;

impl TestPlant {
    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Assert the live run has produced exactly `days` rows.
    pub fn assert_days_recorded(&self, days: usize) {
        let got = self.series().len();
        assert_eq!(got, days, "Expected {days} recorded days, got {got}");
    }

    /// Assert rows are numbered 1..=n with no gaps.
    pub fn assert_days_in_order(&self) {
        for (i, row) in self.series().rows().iter().enumerate() {
            assert_eq!(
                row.day as usize,
                i + 1,
                "Row {i} has day {} (expected {})",
                row.day,
                i + 1
            );
        }
    }

    /// Assert the live run matches `expected` row for row.
    pub fn assert_rows_match(&self, expected: &[TimeSeriesRow]) {
        let rows = self.series().rows();
        assert_eq!(
            rows.len(),
            expected.len(),
            "Row count mismatch: live {} vs expected {}",
            rows.len(),
            expected.len()
        );
        for (live, want) in rows.iter().zip(expected) {
            assert_eq!(live, want, "Day {} differs", want.day);
        }
    }

    /// Assert the run stopped with an error.
    pub fn assert_run_failed(&self) {
        let run = self.run();
        assert!(
            run.last_error.is_some(),
            "Expected the run to record an error, state: {run:?}"
        );
        assert!(run.request.is_none(), "Failed run should be cleared");
    }
}
