// Mon Feb 16 2026 - Alex

use log::LevelFilter;
use std::time::Instant;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Unknown names fall back to `Info`.
    pub fn level_from_str(s: &str) -> LevelFilter {
        s.parse().unwrap_or(LevelFilter::Info)
    }

    /// `-v` is debug, `-vv` and beyond is trace.
    pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Logs how long a pipeline phase took when dropped.
pub struct ScopedTimer {
    phase: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(phase: &'static str) -> Self {
        log::debug!("{} started", phase);
        Self {
            phase,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!("{} took {:.2}ms", self.phase, self.elapsed_ms());
    }
}
