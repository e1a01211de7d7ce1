//! Data types flowing from the metric source to the renderer.

/// Cumulative CPU ticks for one `/proc/stat` cpu line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    /// user + nice + system
    pub busy: u64,
    pub idle: u64,
}

impl CpuTicks {
    pub fn new(busy: u64, idle: u64) -> Self {
        Self { busy, idle }
    }
}

/// Memory and swap fields from `/proc/meminfo`, in kB.
///
/// `None` means the field was absent from this read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemCounters {
    pub mem_total: Option<u64>,
    pub mem_available: Option<u64>,
    pub swap_total: Option<u64>,
    pub swap_free: Option<u64>,
}

/// Load averages and the `running/total` process token from `/proc/loadavg`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadAvg {
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
    pub procs: String,
}

/// One raw read of every feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCounters {
    /// Seconds since boot.
    pub uptime: f64,
    pub memory: MemCounters,
    /// Index 0 is the aggregate line, then one entry per core.
    pub cpus: Vec<CpuTicks>,
    pub load: LoadAvg,
    /// Unix epoch seconds.
    pub wall_clock: i64,
}

/// Resolved metric values handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatSnapshot {
    pub uptime: f64,
    pub mem_total: u64,
    pub mem_available: u64,
    pub swap_total: u64,
    pub swap_free: u64,
    /// Utilization in percent, same indexing as [`RawCounters::cpus`].
    pub cpu_usage: Vec<f64>,
    pub load: LoadAvg,
    pub wall_clock: i64,
}

impl StatSnapshot {
    /// Used memory in kB.
    pub fn mem_used(&self) -> u64 {
        self.mem_total.saturating_sub(self.mem_available)
    }

    /// Used swap in kB.
    pub fn swap_used(&self) -> u64 {
        self.swap_total.saturating_sub(self.swap_free)
    }

    /// Aggregate utilization across all cores.
    pub fn cpu_total(&self) -> f64 {
        self.cpu_usage.first().copied().unwrap_or(0.0)
    }

    /// Per-core utilization, without the aggregate entry.
    pub fn cpu_cores(&self) -> &[f64] {
        self.cpu_usage.get(1..).unwrap_or(&[])
    }

    /// Folds a fresh read into the snapshot.
    ///
    /// Memory fields missing from `raw` keep their previous value.
    pub fn apply(&mut self, raw: RawCounters, cpu_usage: Vec<f64>) {
        let mem = raw.memory;
        self.uptime = raw.uptime;
        self.mem_total = mem.mem_total.unwrap_or(self.mem_total);
        self.mem_available = mem.mem_available.unwrap_or(self.mem_available);
        self.swap_total = mem.swap_total.unwrap_or(self.swap_total);
        self.swap_free = mem.swap_free.unwrap_or(self.swap_free);
        self.cpu_usage = cpu_usage;
        self.load = raw.load;
        self.wall_clock = raw.wall_clock;
    }
}
