use std::time::Duration;

/// Round-robin index over the output formats, advanced on a fixed interval.
///
/// Starts at 0 on activation.
#[derive(Clone, Debug)]
pub struct OutputCycler {
    len: usize,
    interval: Duration,
    index: usize,
    accum: Duration,
}

impl OutputCycler {
    pub fn new(len: usize, interval: Duration) -> Self {
        Self {
            len,
            interval,
            index: 0,
            accum: Duration::ZERO,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Advance by `dt`; returns true when the index moved.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.len == 0 || self.interval.is_zero() {
            return false;
        }
        let before = self.index;
        self.accum += dt;
        while self.accum >= self.interval {
            self.accum -= self.interval;
            self.index = (self.index + 1) % self.len;
        }
        self.index != before
    }

    /// Index a freshly activated cycler reports after `elapsed`.
    pub fn index_at(&self, elapsed: Duration) -> usize {
        if self.len == 0 || self.interval.is_zero() {
            return 0;
        }
        let steps = elapsed.as_nanos() / self.interval.as_nanos();
        (steps % self.len as u128) as usize
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.accum = Duration::ZERO;
    }
}
