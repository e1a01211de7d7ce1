//! yustat - host resource status line for tmux.
//!
//! Samples uptime, memory, swap, per-core CPU utilization, load average and
//! the wall clock from `/proc`, renders them through a `{key}` template and
//! publishes the line to stdout or atomically to a file.
//!
//! The pipeline per cycle is
//! [`Sampler`](sampler::Sampler) → [`Renderer`](render::Renderer) →
//! [`Publisher`](publish::Publisher), driven by a
//! [`Scheduler`](scheduler::Scheduler).

pub mod collector;
pub mod fmt;
pub mod model;
pub mod publish;
pub mod rates;
pub mod render;
pub mod sampler;
pub mod scheduler;
