//! Metric source for the Linux `/proc` filesystem.
//!
//! `parser` holds pure parsers for the individual feeds; `system` ties them
//! together into a [`MetricSource`](crate::collector::MetricSource).

pub mod parser;
pub mod system;

pub use system::SystemSource;
