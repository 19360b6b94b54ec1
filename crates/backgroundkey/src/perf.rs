use std::time::Instant;

use backgroundkey_core::RenderOutcome;

#[cfg(feature = "perf")]
use std::time::Duration;

#[cfg(feature = "perf")]
use std::sync::OnceLock;

#[cfg(feature = "perf")]
use crate::constants::PERF_ENV;

#[cfg(feature = "perf")]
fn enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| match std::env::var(PERF_ENV) {
        Ok(v) => {
            let v = v.trim();
            !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false")
        }
        Err(_) => false,
    })
}

#[cfg(feature = "perf")]
#[derive(Clone, Copy, Default)]
struct StageStats {
    count: u64,
    total_ns: u64,
    max_ns: u64,
}

#[cfg(feature = "perf")]
impl StageStats {
    fn record(&mut self, d: Duration) {
        let ns = d.as_nanos().min(u128::from(u64::MAX)) as u64;
        self.count = self.count.saturating_add(1);
        self.total_ns = self.total_ns.saturating_add(ns);
        self.max_ns = self.max_ns.max(ns);
    }

    fn avg_ms(&self) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        (self.total_ns as f32) / (self.count as f32) / 1_000_000.0
    }

    fn max_ms(&self) -> f32 {
        (self.max_ns as f32) / 1_000_000.0
    }
}

#[cfg(feature = "perf")]
#[derive(Default)]
struct Window {
    frame: StageStats,
    capture: StageStats,
    key: StageStats,
    pass_through: u64,
}

/// Render-callback timings, split by what the frame ended up doing.
pub(crate) struct RenderPerf {
    #[cfg(feature = "perf")]
    enabled: bool,
    #[cfg(feature = "perf")]
    last_log: Instant,
    #[cfg(feature = "perf")]
    window: Window,
}

impl RenderPerf {
    pub(crate) fn new() -> Self {
        #[cfg(feature = "perf")]
        {
            Self {
                enabled: enabled(),
                last_log: Instant::now(),
                window: Window::default(),
            }
        }

        #[cfg(not(feature = "perf"))]
        {
            Self {}
        }
    }

    pub(crate) fn start(&self) -> Option<Instant> {
        #[cfg(feature = "perf")]
        {
            self.enabled.then(Instant::now)
        }

        #[cfg(not(feature = "perf"))]
        {
            None
        }
    }

    pub(crate) fn record(&mut self, outcome: RenderOutcome, start: Option<Instant>) {
        #[cfg(feature = "perf")]
        {
            let Some(t0) = start else {
                return;
            };
            let d = t0.elapsed();
            self.window.frame.record(d);
            match outcome {
                RenderOutcome::Captured => self.window.capture.record(d),
                RenderOutcome::Keyed => self.window.key.record(d),
                RenderOutcome::PassThrough | RenderOutcome::Skipped => self.window.pass_through += 1,
            }
            self.maybe_log();
        }

        #[cfg(not(feature = "perf"))]
        {
            let _ = (outcome, start);
        }
    }

    #[cfg(feature = "perf")]
    fn maybe_log(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_log);
        if dt < Duration::from_secs(1) {
            return;
        }
        self.last_log = now;

        let w = std::mem::take(&mut self.window);
        let fps = (w.frame.count as f32) / dt.as_secs_f32().max(1e-3);
        tracing::info!(
            "perf(render): fps={fps:.1} n={} frame={:.3}ms (max {:.3}) | capture={:.3} (n={}) | key={:.3} (n={}) | passthrough n={}",
            w.frame.count,
            w.frame.avg_ms(),
            w.frame.max_ms(),
            w.capture.avg_ms(),
            w.capture.count,
            w.key.avg_ms(),
            w.key.count,
            w.pass_through,
        );
    }
}
