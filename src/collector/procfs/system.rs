//! Metric source reading the system-wide feeds under `/proc/`.

use crate::collector::procfs::parser::{
    ParseError, parse_cpu_ticks, parse_loadavg, parse_meminfo, parse_uptime,
};
use crate::collector::traits::FileSystem;
use crate::collector::{CollectError, MetricSource};
use crate::model::RawCounters;
use std::path::PathBuf;
use tracing::trace;

/// Returns the current wall-clock time as Unix epoch seconds.
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Reads uptime, memory, CPU ticks and load average from `/proc/`.
pub struct SystemSource<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
    clock: Clock,
}

impl<F: FileSystem> SystemSource<F> {
    /// Creates a new system source.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            clock: system_clock,
        }
    }

    /// Replaces the wall clock, for deterministic tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn read_feed(&self, feed: &'static str) -> Result<String, CollectError> {
        let path = self.proc_path.join(feed);
        self.fs
            .read_to_string(&path)
            .map_err(|source| CollectError::SourceUnavailable { path, source })
    }
}

fn malformed(feed: &'static str) -> impl FnOnce(ParseError) -> CollectError {
    move |e| CollectError::MalformedData {
        feed,
        message: e.message,
    }
}

impl<F: FileSystem> MetricSource for SystemSource<F> {
    fn sample(&mut self) -> Result<RawCounters, CollectError> {
        let uptime = parse_uptime(&self.read_feed("uptime")?).map_err(malformed("uptime"))?;
        let memory = parse_meminfo(&self.read_feed("meminfo")?).map_err(malformed("meminfo"))?;
        let cpus = parse_cpu_ticks(&self.read_feed("stat")?).map_err(malformed("stat"))?;
        let load = parse_loadavg(&self.read_feed("loadavg")?).map_err(malformed("loadavg"))?;

        trace!(uptime, cpus = cpus.len(), "sampled /proc");

        Ok(RawCounters {
            uptime,
            memory,
            cpus,
            load,
            wall_clock: (self.clock)(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::model::CpuTicks;

    fn fixed_clock() -> i64 {
        1_700_000_000
    }

    #[test]
    fn test_sample_typical_system() {
        let fs = MockFs::typical_system();
        let mut source = SystemSource::new(fs, "/proc").with_clock(fixed_clock);

        let raw = source.sample().unwrap();
        assert_eq!(raw.uptime, 93784.56);
        assert_eq!(raw.memory.mem_total, Some(16384000));
        assert_eq!(raw.memory.swap_free, Some(3072000));
        assert_eq!(raw.cpus.len(), 5);
        assert_eq!(raw.cpus[0], CpuTicks::new(13500, 80000));
        assert_eq!(raw.load.procs, "1/150");
        assert_eq!(raw.wall_clock, 1_700_000_000);
    }

    #[test]
    fn test_sample_missing_feed() {
        let fs = MockFs::typical_system();
        fs.remove_file("/proc/loadavg");
        let mut source = SystemSource::new(fs, "/proc");

        match source.sample() {
            Err(CollectError::SourceUnavailable { path, .. }) => {
                assert_eq!(path, PathBuf::from("/proc/loadavg"));
            }
            other => panic!("expected SourceUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_sample_malformed_stat() {
        let fs = MockFs::typical_system();
        fs.add_file("/proc/stat", "cpu  1 2 x 4\n");
        let mut source = SystemSource::new(fs, "/proc");

        match source.sample() {
            Err(CollectError::MalformedData { feed, .. }) => assert_eq!(feed, "stat"),
            other => panic!("expected MalformedData, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_proc_path() {
        let fs = MockFs::new();
        fs.add_file("/host/proc/uptime", "1.5 0.5\n");
        fs.add_file("/host/proc/meminfo", "MemTotal: 10 kB\n");
        fs.add_file("/host/proc/stat", "cpu  1 0 0 1\n");
        fs.add_file("/host/proc/loadavg", "0 0 0 1/1 1\n");
        let mut source = SystemSource::new(fs, "/host/proc");

        let raw = source.sample().unwrap();
        assert_eq!(raw.uptime, 1.5);
        assert_eq!(raw.memory.mem_available, None);
    }
}
