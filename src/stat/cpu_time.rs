use super::*;

/// the cumulative counters of one cpu, or of every cpu in aggregate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CpuTime {
    /// time spent in the idle task.
    ///
    /// this value should be USER_HZ times the second entry in the /proc/uptime pseudo-file.
    idle: UserHz,
    /// time spent in every state, idle included.
    ///
    /// this is the sum of every counter on the line, including ones added by kernels newer than
    /// this program.
    total: UserHz,
}

/// a measurement of the difference between two [`CpuTime`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// idle ticks elapsed between the two readings.
    idle: f64,
    /// ticks elapsed between the two readings, in every state.
    total: f64,
}

// === impl CpuTime ===

impl CpuTime {
    /// the position of the idle counter on a cpu line.
    const IDLE: usize = 3;

    pub fn new(idle: u64, total: u64) -> Self {
        let (idle, total) = (UserHz::from(idle), UserHz::from(total));
        debug_assert!(total >= idle, "idle time cannot exceed total time");
        Self { idle, total }
    }

    /// builds a [`CpuTime`] out of the counters that follow a cpu label.
    ///
    /// `label` is only used to describe the line if it is missing its idle counter.
    pub(super) fn from_times(label: &str, times: Vec<UserHz>) -> Result<Self, MalformedLine> {
        let Some(&idle) = times.get(Self::IDLE) else {
            return Err(MalformedLine {
                label: label.to_owned(),
                found: times.len(),
            });
        };

        let total = times.into_iter().sum();

        Ok(Self { idle, total })
    }
}

// == impl Measurement ===

impl Measurement {
    pub fn new(a: &CpuTime, b: &CpuTime) -> Self {
        Self {
            idle: b.idle.since(a.idle),
            total: b.total.since(a.total),
        }
    }

    /// returns the percentage of time the cpu spent busy, truncated to a whole percentage point.
    ///
    /// an interval in which no time elapsed (or time went backwards) reports 0%. results are
    /// clamped to `0..=100`, so a counter reset cannot produce a nonsensical value.
    pub fn percentage(&self) -> u8 {
        let Self { idle, total } = *self;

        if total <= 0.0 {
            return 0;
        }

        let busy = 100.0 * (1.0 - idle / total);
        if busy.is_nan() {
            return 0;
        }

        // `as` truncates toward zero, which is what we want here.
        busy.clamp(0.0, 100.0) as u8
    }
}
