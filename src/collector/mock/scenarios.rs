//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` states for the four feeds the
//! status line reads.

use super::filesystem::MockFs;

impl MockFs {
    /// Creates a typical four-core system.
    pub fn typical_system() -> Self {
        let fs = Self::new();

        fs.add_file("/proc/uptime", "93784.56 350000.12\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
Active:          4096000 kB
Inactive:        2048000 kB
SwapTotal:       4096000 kB
SwapFree:        3072000 kB
Dirty:              1024 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
cpu2 2500 125 750 20000 250 50 25 0 0 0
cpu3 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );

        fs
    }

    /// Creates a system without swap configured.
    pub fn no_swap_system() -> Self {
        let fs = Self::typical_system();
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:        2048000 kB
MemFree:          512000 kB
MemAvailable:    1024000 kB
SwapTotal:             0 kB
SwapFree:              0 kB
",
        );
        fs
    }

    /// Rewrites `/proc/stat` so that line `i` carries exactly `ticks[i]`
    /// as `(busy, idle)`. Index 0 becomes the aggregate `cpu` line.
    pub fn set_cpu_ticks(&self, ticks: &[(u64, u64)]) {
        let mut content = String::new();
        for (i, (busy, idle)) in ticks.iter().enumerate() {
            let name = if i == 0 {
                "cpu ".to_string()
            } else {
                format!("cpu{}", i - 1)
            };
            content.push_str(&format!("{} {} 0 0 {} 0 0 0 0 0 0\n", name, busy, idle));
        }
        content.push_str("intr 1000000 50 0 0\nctxt 500000\nbtime 1700000000\n");
        self.add_file("/proc/stat", content);
    }
}
