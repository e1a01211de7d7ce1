//! Placeholder keys and the widgets that render them.

use crate::fmt;
use crate::model::StatSnapshot;

use super::RenderOptions;

/// A named piece of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    /// Duration since boot.
    Uptime,
    /// Load averages and process count.
    Load,
    /// Memory percentage and bar.
    Memory,
    /// Swap percentage and bar.
    Swap,
    /// Aggregate percentage and bar, then one sparkline glyph per core.
    Cpu,
    /// Local timestamp.
    WallClock,
}

impl Widget {
    pub const ALL: [Widget; 6] = [
        Widget::Uptime,
        Widget::Load,
        Widget::Memory,
        Widget::Swap,
        Widget::Cpu,
        Widget::WallClock,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.key() == key)
    }

    pub fn key(self) -> &'static str {
        match self {
            Widget::Uptime => "uptime",
            Widget::Load => "load",
            Widget::Memory => "memory",
            Widget::Swap => "swap",
            Widget::Cpu => "cpu",
            Widget::WallClock => "wall_clock",
        }
    }

    pub fn render(self, snapshot: &StatSnapshot, options: &RenderOptions) -> String {
        let width = options.bar_width;
        match self {
            Widget::Uptime => fmt::format_uptime(snapshot.uptime),
            Widget::Load => fmt::format_load(&snapshot.load),
            Widget::Memory => fmt::format_gauge(
                snapshot.mem_used() as f64,
                snapshot.mem_total as f64,
                width,
            ),
            Widget::Swap => fmt::format_gauge(
                snapshot.swap_used() as f64,
                snapshot.swap_total as f64,
                width,
            ),
            Widget::Cpu => {
                let mut out = fmt::format_gauge(snapshot.cpu_total(), 100.0, width);
                out.push_str(&fmt::format_sparkline(snapshot.cpu_cores()));
                out
            }
            Widget::WallClock => fmt::format_epoch_local(snapshot.wall_clock),
        }
    }
}
