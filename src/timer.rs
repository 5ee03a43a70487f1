//! Per-stage timing and frame rate logging.

use std::{
    cell::Cell,
    fmt,
    time::{Duration, Instant},
};

/// Accumulates the time spent in one stage of the frame loop.
///
/// Displaying a timer with `{}` prints the average duration since it was last displayed, then
/// resets it.
pub struct Timer {
    name: &'static str,
    total: Cell<Duration>,
    count: Cell<u32>,
}

impl Timer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            total: Cell::new(Duration::ZERO),
            count: Cell::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Runs `f` and records how long it took.
    pub fn time<T>(&self, f: impl FnOnce() -> T) -> T {
        let _guard = self.start();
        f()
    }

    /// Starts measuring; the measurement ends when the returned guard is dropped.
    pub fn start(&self) -> TimerGuard<'_> {
        TimerGuard {
            start: Instant::now(),
            timer: self,
        }
    }

    /// Number of measurements recorded since the last reset.
    pub fn count(&self) -> u32 {
        self.count.get()
    }

    fn record(&self, duration: Duration) {
        self.total.set(self.total.get().saturating_add(duration));
        self.count.set(self.count.get().saturating_add(1));
    }

    fn take_average(&self) -> Option<Duration> {
        let total = self.total.replace(Duration::ZERO);
        match self.count.replace(0) {
            0 => None,
            n => Some(total / n),
        }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.count();
        match self.take_average() {
            Some(avg) => write!(
                f,
                "{}: {count}x{:.01}ms",
                self.name,
                avg.as_secs_f32() * 1000.0
            ),
            None => write!(f, "{}: -", self.name),
        }
    }
}

/// Guard returned by [`Timer::start`].
pub struct TimerGuard<'a> {
    start: Instant,
    timer: &'a Timer,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.record(self.start.elapsed());
    }
}

/// Logs frames per second, once per second, at debug level.
pub struct FpsCounter {
    name: String,
    frames: u32,
    start: Instant,
}

impl FpsCounter {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            frames: 0,
            start: Instant::now(),
        }
    }

    /// Counts a frame and, if a second has passed, logs the rate along with `timers`.
    ///
    /// Logged timers are reset.
    pub fn tick_with<'a>(&mut self, timers: impl IntoIterator<Item = &'a Timer>) {
        self.frames += 1;
        if self.start.elapsed() < Duration::from_secs(1) {
            return;
        }

        let timers = timers
            .into_iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>();
        if timers.is_empty() {
            log::debug!("{}: {} FPS", self.name, self.frames);
        } else {
            log::debug!("{}: {} FPS ({})", self.name, self.frames, timers.join(", "));
        }

        self.frames = 0;
        self.start = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn display_resets() {
        let timer = Timer::new("stage");
        assert_eq!(timer.to_string(), "stage: -");

        timer.time(|| thread::sleep(Duration::from_millis(2)));
        {
            let _guard = timer.start();
        }
        assert_eq!(timer.count(), 2);

        let shown = timer.to_string();
        assert!(shown.starts_with("stage: 2x"), "{shown}");
        assert!(shown.ends_with("ms"), "{shown}");
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.to_string(), "stage: -");
    }

    #[test]
    fn time_returns_value() {
        let timer = Timer::new("value");
        assert_eq!(timer.time(|| 42), 42);
        assert_eq!(timer.count(), 1);
    }

    #[test]
    fn fps_counter_keeps_timers_within_second() {
        let timer = Timer::new("t");
        timer.time(|| ());
        let mut fps = FpsCounter::new("test");
        fps.tick_with([&timer]);
        // Less than a second has passed, so nothing was logged and the timer kept its data.
        assert_eq!(timer.count(), 1);
    }
}
