//! The sample → render → publish loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::collector::{CollectError, MetricSource};
use crate::publish::{PublishError, Publisher};
use crate::render::{OutputFormat, RenderError, Renderer};
use crate::sampler::Sampler;

/// Pause between the warm-up sample and the first published one.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Granularity of shutdown checks while sleeping between cycles.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Error from a single sampling cycle.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("collection failed: {0}")]
    Collect(#[from] CollectError),
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
}

/// Cooperative stop signal, checked between cycles.
#[derive(Debug, Clone)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for ShutdownFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives sampling cycles on a fixed interval, or once.
pub struct Scheduler<S: MetricSource> {
    sampler: Sampler<S>,
    renderer: Renderer,
    format: OutputFormat,
    publisher: Publisher,
    /// `Duration::ZERO` means one-shot.
    interval: Duration,
    settle_delay: Duration,
}

impl<S: MetricSource> Scheduler<S> {
    pub fn new(
        sampler: Sampler<S>,
        renderer: Renderer,
        format: OutputFormat,
        publisher: Publisher,
        interval: Duration,
    ) -> Self {
        Self {
            sampler,
            renderer,
            format,
            publisher,
            interval,
            settle_delay: SETTLE_DELAY,
        }
    }

    /// Overrides the pause between the warm-up sample and the first cycle.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn is_one_shot(&self) -> bool {
        self.interval.is_zero()
    }

    /// Runs one sample → render → publish cycle.
    pub fn run_cycle(&mut self) -> Result<(), CycleError> {
        let snapshot = self.sampler.sample()?;
        let line = self.renderer.render_as(self.format, snapshot)?;
        self.publisher.publish(&line)?;
        debug!(bytes = line.len(), "cycle complete");
        Ok(())
    }

    /// Runs until shutdown, or once in one-shot mode.
    ///
    /// In loop mode collection and rendering errors are logged and retried on
    /// the next cycle; an unsupported format or a publish failure ends the loop.
    pub fn run(&mut self, shutdown: &ShutdownFlag) -> Result<(), CycleError> {
        if let Err(e) = self.sampler.prime() {
            warn!("warm-up sample failed: {}", e);
        }
        std::thread::sleep(self.settle_delay);

        if self.is_one_shot() {
            return self.run_cycle();
        }

        info!(interval = ?self.interval, "starting sampling loop");
        while !shutdown.is_triggered() {
            match self.run_cycle() {
                Ok(()) => {}
                Err(CycleError::Collect(e)) => warn!("skipping cycle: {}", e),
                Err(CycleError::Render(e @ RenderError::Unsupported(_))) => return Err(e.into()),
                Err(CycleError::Render(e)) => warn!("skipping cycle: {}", e),
                Err(e @ CycleError::Publish(_)) => return Err(e),
            }
            sleep_unless_shutdown(self.interval, shutdown);
        }

        info!("sampling loop stopped");
        Ok(())
    }
}

/// Sleeps for `duration` in short slices, returning early on shutdown.
fn sleep_unless_shutdown(duration: Duration, shutdown: &ShutdownFlag) {
    let mut remaining = duration;
    while remaining > Duration::ZERO && !shutdown.is_triggered() {
        let sleep_time = remaining.min(SLEEP_SLICE);
        std::thread::sleep(sleep_time);
        remaining = remaining.saturating_sub(sleep_time);
    }
}
