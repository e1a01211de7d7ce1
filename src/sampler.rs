//! Sampling cycle front half: raw counters in, resolved snapshot out.

use tracing::{debug, warn};

use crate::collector::{CollectError, MetricSource};
use crate::model::StatSnapshot;
use crate::rates::DeltaTracker;

/// Combines a [`MetricSource`] with a [`DeltaTracker`] and keeps the current
/// [`StatSnapshot`] up to date.
pub struct Sampler<S: MetricSource> {
    source: S,
    tracker: DeltaTracker,
    current: Option<StatSnapshot>,
}

impl<S: MetricSource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            tracker: DeltaTracker::new(),
            current: None,
        }
    }

    /// Takes a warm-up sample so the next one yields real CPU utilization.
    pub fn prime(&mut self) -> Result<(), CollectError> {
        self.sample().map(|_| ())
    }

    /// Reads the source and folds the result into the current snapshot.
    ///
    /// On a source failure the previous snapshot is left untouched.
    pub fn sample(&mut self) -> Result<&StatSnapshot, CollectError> {
        let raw = self.source.sample()?;

        let usage = match self.tracker.update(&raw.cpus) {
            Ok(usage) => usage,
            Err(e @ CollectError::CoreCountChanged { .. }) => {
                warn!("{}, restarting cpu warm-up", e);
                vec![0.0; raw.cpus.len()]
            }
            Err(e) => return Err(e),
        };

        let snapshot = self.current.get_or_insert_with(StatSnapshot::default);
        snapshot.apply(raw, usage);
        debug!(
            cpu = snapshot.cpu_total(),
            mem_used = snapshot.mem_used(),
            "sample"
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{MockFs, SystemSource};

    fn sampler(fs: &MockFs) -> Sampler<SystemSource<MockFs>> {
        Sampler::new(SystemSource::new(fs.clone(), "/proc"))
    }

    #[test]
    fn first_sample_has_zero_cpu() {
        let fs = MockFs::typical_system();
        let mut sampler = sampler(&fs);

        let snap = sampler.sample().unwrap();
        assert_eq!(snap.cpu_usage, vec![0.0; 5]);
        assert_eq!(snap.mem_total, 16384000);
        assert_eq!(snap.mem_used(), 4384000);
    }

    #[test]
    fn end_to_end_aggregate_usage() {
        let fs = MockFs::typical_system();
        let mut sampler = sampler(&fs);

        fs.set_cpu_ticks(&[(100, 100), (50, 50), (50, 50)]);
        sampler.prime().unwrap();
        fs.set_cpu_ticks(&[(200, 150), (100, 70), (80, 90)]);

        let snap = sampler.sample().unwrap();
        assert_eq!(format!("{:.1}", snap.cpu_total()), "66.7");
        assert_eq!(snap.cpu_cores().len(), 2);
    }

    #[test]
    fn missing_meminfo_field_keeps_previous() {
        let fs = MockFs::typical_system();
        let mut sampler = sampler(&fs);
        sampler.sample().unwrap();

        fs.add_file("/proc/meminfo", "MemTotal: 20000000 kB\n");
        let snap = sampler.sample().unwrap();
        assert_eq!(snap.mem_total, 20000000);
        assert_eq!(snap.mem_available, 12000000);
        assert_eq!(snap.swap_total, 4096000);
    }

    #[test]
    fn source_failure_keeps_snapshot() {
        let fs = MockFs::typical_system();
        let mut sampler = sampler(&fs);
        sampler.sample().unwrap();

        fs.remove_file("/proc/stat");
        assert!(matches!(
            sampler.sample(),
            Err(CollectError::SourceUnavailable { .. })
        ));
        assert_eq!(sampler.current.as_ref().unwrap().cpu_usage.len(), 5);
    }

    #[test]
    fn core_count_change_is_absorbed() {
        let fs = MockFs::typical_system();
        let mut sampler = sampler(&fs);
        fs.set_cpu_ticks(&[(10, 10), (10, 10)]);
        sampler.prime().unwrap();

        fs.set_cpu_ticks(&[(20, 20), (10, 10), (10, 10)]);
        let snap = sampler.sample().unwrap();
        assert_eq!(snap.cpu_usage, vec![0.0; 3]);

        fs.set_cpu_ticks(&[(30, 20), (20, 10), (10, 20)]);
        let snap = sampler.sample().unwrap();
        assert_eq!(snap.cpu_usage, vec![100.0, 100.0, 0.0]);
    }
}
