//! Parsers for `/proc` filesystem files.
//!
//! These are pure functions that parse the content of the `/proc` feeds into
//! structured data. They are designed to be easily testable with string inputs.

use crate::model::{CpuTicks, LoadAvg, MemCounters};

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// Parses `/proc/uptime` content into seconds since boot.
///
/// Format: `uptime_seconds idle_seconds`. Only the first value is used.
pub fn parse_uptime(content: &str) -> Result<f64, ParseError> {
    content
        .split_whitespace()
        .next()
        .ok_or_else(|| ParseError::new("empty uptime"))?
        .parse()
        .map_err(|_| ParseError::new("invalid uptime"))
}

/// Parses `/proc/meminfo` content.
///
/// Each field is located by name, its `kB` unit suffix stripped, and the rest
/// parsed as an unsigned integer. Fields that do not appear stay `None`.
pub fn parse_meminfo(content: &str) -> Result<MemCounters, ParseError> {
    let mut info = MemCounters::default();

    let parse_kb = |line: &str, key: &str| -> Result<u64, ParseError> {
        let value = line[key.len()..].trim_end();
        let value = value.strip_suffix("kB").unwrap_or(value).trim();
        value
            .parse()
            .map_err(|_| ParseError::new(format!("invalid {} value '{}'", key, value)))
    };

    for line in content.lines() {
        if line.starts_with("MemTotal:") {
            info.mem_total = Some(parse_kb(line, "MemTotal:")?);
        } else if line.starts_with("MemAvailable:") {
            info.mem_available = Some(parse_kb(line, "MemAvailable:")?);
        } else if line.starts_with("SwapTotal:") {
            info.swap_total = Some(parse_kb(line, "SwapTotal:")?);
        } else if line.starts_with("SwapFree:") {
            info.swap_free = Some(parse_kb(line, "SwapFree:")?);
        }
    }

    Ok(info)
}

/// Parses the leading `cpu` lines of `/proc/stat`.
///
/// The first line is the aggregate `cpu` line, followed by `cpuN` lines.
/// Parsing stops at the first line that does not start with `cpu`.
pub fn parse_cpu_ticks(content: &str) -> Result<Vec<CpuTicks>, ParseError> {
    let mut cpus = Vec::new();

    for line in content.lines() {
        if !line.starts_with("cpu") {
            break;
        }

        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or("cpu");

        let mut fields = [0u64; 4];
        for (slot, field) in fields.iter_mut().zip(["user", "nice", "system", "idle"]) {
            *slot = parts
                .next()
                .ok_or_else(|| ParseError::new(format!("{}: missing {} field", name, field)))?
                .parse()
                .map_err(|_| ParseError::new(format!("{}: invalid {} field", name, field)))?;
        }
        let [user, nice, system, idle] = fields;

        cpus.push(CpuTicks {
            busy: user.saturating_add(nice).saturating_add(system),
            idle,
        });
    }

    if cpus.is_empty() {
        return Err(ParseError::new("no cpu lines in stat"));
    }

    Ok(cpus)
}

/// Parses `/proc/loadavg` content.
///
/// Format: `load1 load5 load15 running/total last_pid`.
pub fn parse_loadavg(content: &str) -> Result<LoadAvg, ParseError> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(ParseError::new("invalid loadavg format"));
    }

    let load1 = parts[0]
        .parse()
        .map_err(|_| ParseError::new("invalid load1"))?;
    let load5 = parts[1]
        .parse()
        .map_err(|_| ParseError::new("invalid load5"))?;
    let load15 = parts[2]
        .parse()
        .map_err(|_| ParseError::new("invalid load15"))?;

    Ok(LoadAvg {
        load1,
        load5,
        load15,
        procs: parts[3].to_string(),
    })
}
