//! CPU utilization from successive cumulative tick samples.
//!
//! [`DeltaTracker`] owns the only state carried between sampling cycles: the
//! previous `(busy, idle)` ticks of every cpu line.

use crate::collector::CollectError;
use crate::model::CpuTicks;

// ---------------------------------------------------------------------------
// Delta helpers
// ---------------------------------------------------------------------------

/// Compute u64 delta, returning `None` on counter regression (reset, reboot).
pub fn du64(curr: u64, prev: u64) -> Option<u64> {
    curr.checked_sub(prev)
}

/// Utilization in percent between two tick samples of the same cpu line.
///
/// A regressing counter or an empty interval yields `0.0`.
pub fn utilization(curr: CpuTicks, prev: CpuTicks) -> f64 {
    let (Some(busy), Some(idle)) = (du64(curr.busy, prev.busy), du64(curr.idle, prev.idle)) else {
        return 0.0;
    };
    let total = busy.saturating_add(idle);
    if total == 0 {
        return 0.0;
    }
    (100.0 * busy as f64 / total as f64).clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Converts cumulative per-core ticks into utilization percentages.
#[derive(Debug, Default)]
pub struct DeltaTracker {
    prev: Vec<CpuTicks>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a previous sample is available.
    pub fn is_primed(&self) -> bool {
        !self.prev.is_empty()
    }

    /// Forgets the previous sample; the next update is a warm-up again.
    pub fn reset(&mut self) {
        self.prev.clear();
    }

    /// Computes utilization for every cpu line against the previous sample.
    ///
    /// The first call only seeds history and returns zeros. If the number of
    /// cpu lines changed, history is reseeded and `CoreCountChanged` returned.
    /// History is replaced by `cpus` on every call.
    pub fn update(&mut self, cpus: &[CpuTicks]) -> Result<Vec<f64>, CollectError> {
        if !self.is_primed() {
            self.prev = cpus.to_vec();
            return Ok(vec![0.0; cpus.len()]);
        }

        if self.prev.len() != cpus.len() {
            let expected = self.prev.len();
            self.prev = cpus.to_vec();
            return Err(CollectError::CoreCountChanged {
                expected,
                actual: cpus.len(),
            });
        }

        let usage = cpus
            .iter()
            .zip(&self.prev)
            .map(|(&curr, &prev)| utilization(curr, prev))
            .collect();
        self.prev.copy_from_slice(cpus);

        Ok(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(pairs: &[(u64, u64)]) -> Vec<CpuTicks> {
        pairs.iter().map(|&(b, i)| CpuTicks::new(b, i)).collect()
    }

    #[test]
    fn first_sample_is_baseline() {
        let mut tracker = DeltaTracker::new();
        let usage = tracker.update(&ticks(&[(900, 100), (5, 0)])).unwrap();
        assert_eq!(usage, vec![0.0, 0.0]);
        assert!(tracker.is_primed());
    }

    #[test]
    fn usage_computed_on_second_sample() {
        let mut tracker = DeltaTracker::new();
        tracker
            .update(&ticks(&[(100, 100), (50, 50), (50, 50)]))
            .unwrap();
        let usage = tracker
            .update(&ticks(&[(200, 150), (100, 70), (80, 90)]))
            .unwrap();

        assert!((usage[0] - 66.666_666).abs() < 1e-3);
        assert_eq!(format!("{:.1}", usage[0]), "66.7");
        assert!((usage[1] - 71.428_571).abs() < 1e-3);
        assert!((usage[2] - 42.857_142).abs() < 1e-3);
    }

    #[test]
    fn zero_interval_yields_zero() {
        let mut tracker = DeltaTracker::new();
        tracker.update(&ticks(&[(10, 10)])).unwrap();
        let usage = tracker.update(&ticks(&[(10, 10)])).unwrap();
        assert_eq!(usage, vec![0.0]);
    }

    #[test]
    fn counter_regression_yields_zero() {
        let mut tracker = DeltaTracker::new();
        tracker.update(&ticks(&[(1000, 1000), (500, 500)])).unwrap();
        let usage = tracker.update(&ticks(&[(10, 2000), (600, 400)])).unwrap();
        assert_eq!(usage, vec![0.0, 0.0]);

        // History was replaced, so the next interval is measured from the reset values.
        let usage = tracker.update(&ticks(&[(20, 2010), (700, 500)])).unwrap();
        assert_eq!(usage[0], 50.0);
        assert_eq!(usage[1], 50.0);
    }

    #[test]
    fn core_count_change_reseeds() {
        let mut tracker = DeltaTracker::new();
        tracker.update(&ticks(&[(10, 10), (5, 5)])).unwrap();

        match tracker.update(&ticks(&[(20, 20), (10, 10), (1, 1)])) {
            Err(CollectError::CoreCountChanged { expected, actual }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("expected CoreCountChanged, got {:?}", other),
        }

        let usage = tracker
            .update(&ticks(&[(30, 20), (10, 20), (2, 1)]))
            .unwrap();
        assert_eq!(usage, vec![100.0, 0.0, 100.0]);
    }

    #[test]
    fn reset_restarts_warm_up() {
        let mut tracker = DeltaTracker::new();
        tracker.update(&ticks(&[(10, 10)])).unwrap();
        tracker.reset();
        assert!(!tracker.is_primed());
        assert_eq!(tracker.update(&ticks(&[(90, 10)])).unwrap(), vec![0.0]);
    }

    #[test]
    fn usage_stays_in_range() {
        let samples = [
            (0, 0),
            (1, 0),
            (0, 1),
            (u64::MAX / 2, 3),
            (7, u64::MAX / 2),
        ];
        for &(db, di) in &samples {
            let u = utilization(CpuTicks::new(100 + db, 100 + di), CpuTicks::new(100, 100));
            assert!((0.0..=100.0).contains(&u), "{} out of range", u);
        }
    }
}
