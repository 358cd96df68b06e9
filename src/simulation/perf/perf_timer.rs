/// Wall-clock stopwatch for perf metrics: `Date.now()` in the browser,
/// `Instant` everywhere else.
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    started_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    started: std::time::Instant,
}

impl PerfTimer {
    #[cfg(target_arch = "wasm32")]
    pub(crate) fn start() -> Self {
        PerfTimer { started_ms: js_sys::Date::now() }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn start() -> Self {
        PerfTimer { started: std::time::Instant::now() }
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) fn elapsed_ms(&self) -> f64 {
        js_sys::Date::now() - self.started_ms
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn elapsed_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Time `f` only when `enabled`; otherwise report zero.
    pub(crate) fn measure<T>(enabled: bool, f: impl FnOnce() -> T) -> (T, f64) {
        if !enabled {
            return (f(), 0.0);
        }
        let timer = Self::start();
        let out = f();
        (out, timer.elapsed_ms())
    }
}
