use std::time::{Duration, Instant};

/// Abstraction over time sources.
/// Implementations: SystemClock (production), MockClock (testing).
pub trait Clock {
    /// Current time in microseconds from an arbitrary epoch.
    fn now_us(&self) -> i64;
    fn sleep_us(&self, us: i64);
}

/// System clock using std::time::Instant.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_us(&self) -> i64 {
        self.start.elapsed().as_micros() as i64
    }

    fn sleep_us(&self, us: i64) {
        if us > 0 {
            std::thread::sleep(Duration::from_micros(us as u64));
        }
    }
}

/// Mock clock for deterministic testing. Sleeping advances time instantly.
#[cfg(test)]
#[derive(Default)]
pub struct MockClock {
    current_us: std::cell::Cell<i64>,
}

#[cfg(test)]
impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, delta_us: i64) {
        self.current_us.set(self.current_us.get() + delta_us);
    }
}

#[cfg(test)]
impl Clock for MockClock {
    fn now_us(&self) -> i64 {
        self.current_us.get()
    }

    fn sleep_us(&self, us: i64) {
        if us > 0 {
            self.advance(us);
        }
    }
}

/// Paces the tick loop.
pub trait Ticker {
    /// Block until the next tick is due. Returns how late the tick is, if
    /// the loop fell behind schedule.
    fn wait_next(&mut self) -> Option<Duration>;
}

/// Runs ticks back to back.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unthrottled;

impl Ticker for Unthrottled {
    fn wait_next(&mut self) -> Option<Duration> {
        None
    }
}

/// Fires at a fixed rate. A late tick reschedules from now rather than
/// bursting to catch up.
pub struct FixedRateTicker<C: Clock = SystemClock> {
    clock: C,
    period_us: i64,
    next_us: Option<i64>,
}

impl FixedRateTicker<SystemClock> {
    pub fn new(rate_hz: u32) -> Self {
        Self::with_clock(rate_hz, SystemClock::new())
    }
}

impl<C: Clock> FixedRateTicker<C> {
    pub fn with_clock(rate_hz: u32, clock: C) -> Self {
        Self {
            clock,
            period_us: 1_000_000 / i64::from(rate_hz.max(1)),
            next_us: None,
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_micros(self.period_us as u64)
    }

    #[cfg(test)]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> Ticker for FixedRateTicker<C> {
    fn wait_next(&mut self) -> Option<Duration> {
        let now = self.clock.now_us();
        let Some(due) = self.next_us else {
            self.next_us = Some(now + self.period_us);
            return None;
        };

        if now <= due {
            self.clock.sleep_us(due - now);
            self.next_us = Some(due + self.period_us);
            None
        } else {
            self.next_us = Some(now + self.period_us);
            Some(Duration::from_micros((now - due) as u64))
        }
    }
}
