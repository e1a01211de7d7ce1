//! Host metric collection for Linux.
//!
//! This module reads the raw counters behind the status line from the Linux
//! `/proc` filesystem, with support for mocking so tests run anywhere.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          MetricSource (trait)            │
//! │  ┌────────────────────────────────────┐  │
//! │  │          SystemSource              │  │
//! │  │  - /proc/uptime   - /proc/stat     │  │
//! │  │  - /proc/meminfo  - /proc/loadavg  │  │
//! │  └─────────────────┬──────────────────┘  │
//! │             ┌──────▼──────┐              │
//! │             │  FileSystem │ (trait)      │
//! │             └──────┬──────┘              │
//! └────────────────────┼─────────────────────┘
//!              ┌───────┴───────┐
//!       ┌──────▼──────┐ ┌──────▼──────┐
//!       │   RealFs    │ │   MockFs    │
//!       │  (Linux)    │ │  (Testing)  │
//!       └─────────────┘ └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use yustat::collector::{MetricSource, MockFs, SystemSource};
//!
//! let fs = MockFs::typical_system();
//! let mut source = SystemSource::new(fs, "/proc");
//! let raw = source.sample().unwrap();
//! assert_eq!(raw.cpus.len(), 5);
//! ```

pub mod mock;
pub mod procfs;
pub mod traits;

use std::path::PathBuf;

use crate::model::RawCounters;

pub use mock::MockFs;
pub use procfs::SystemSource;
pub use traits::{FileSystem, RealFs};

/// Error type for metric collection failures.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// A feed could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A feed was readable but a required field was absent or non-numeric.
    #[error("malformed {feed}: {message}")]
    MalformedData {
        feed: &'static str,
        message: String,
    },
    /// The number of cpu lines differs from the previous sample.
    #[error("cpu count changed from {expected} to {actual}")]
    CoreCountChanged { expected: usize, actual: usize },
}

/// A provider of raw host counters.
pub trait MetricSource {
    /// Reads every feed once.
    fn sample(&mut self) -> Result<RawCounters, CollectError>;
}
