use {
    crate::{
        source::{Clock, ProcStatFile, StatsSource, SystemClock},
        stat::{Measurement, Reading, Snapshot, StatReadError},
    },
    std::time::Duration,
    tracing::{debug, warn},
};

/// observes kernel statistics.
pub struct Sentinel<C = SystemClock, S = ProcStatFile> {
    /// the clock being used to wait between samples.
    clock: C,
    /// the underlying source of kernel statistics.
    source: S,
    /// the last observed snapshot, once one has been taken.
    last: Option<Snapshot>,
}

/// the cpus' utilization over the interval between two snapshots.
///
/// utilization is `None` for any cpu whose counters could not be read on either side.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Recording {
    /// how busy the system cpus were, in aggregate.
    system: Option<u8>,
    /// how busy each cpu was, in the order the kernel lists them.
    cpus: Vec<Option<u8>>,
}

/// === impl Sentinel ===

impl<C, S> Sentinel<C, S> {
    /// how long to wait between the very first two samples.
    pub const WARMUP: Duration = Duration::from_millis(100);

    /// creates a new [`Sentinel`].
    pub fn new(clock: C, source: S) -> Self {
        Self {
            clock,
            source,
            last: None,
        }
    }

    /// returns the most recent snapshot, if any has been taken.
    #[cfg(test)]
    pub(crate) fn last(&self) -> Option<&Snapshot> {
        self.last.as_ref()
    }
}

impl<C, S> Sentinel<C, S>
where
    C: Clock,
    S: StatsSource,
{
    /// returns a [`Recording`] of cpu time since this was last called.
    ///
    /// NB: the first call takes two samples, [`Sentinel::WARMUP`] apart. every later call takes
    /// one, and compares it to the previous call's.
    pub fn observe(&mut self) -> Result<Recording, StatReadError> {
        let Self {
            clock,
            source,
            last,
        } = self;

        let prev = match last.take() {
            Some(prev) => prev,
            None => {
                let first = Snapshot::read(source)?;
                debug!(cpus = first.len(), "took first sample");
                clock.sleep(Self::WARMUP);
                first
            }
        };

        let new = match Snapshot::read(source) {
            Ok(new) => new,
            Err(error) => {
                // hold on to the previous snapshot, so the next attempt measures against it.
                *last = Some(prev);
                return Err(error);
            }
        };

        let recording = Recording::new(&prev, &new);
        *last = Some(new);

        Ok(recording)
    }

    /// waits for the given duration.
    pub fn rest(&self, duration: Duration) {
        self.clock.sleep(duration);
    }
}

// === impl Recording ===

impl Recording {
    pub fn new(a: &Snapshot, b: &Snapshot) -> Recording {
        if a.len() != b.len() {
            warn!(
                before = a.len(),
                after = b.len(),
                "number of cpus changed between samples"
            );
        }

        // zip together the two sets of cpu times.
        let mut usage = a
            .readings()
            .iter()
            .zip(b.readings())
            .map(|(a, b)| Self::usage(a, b));

        let system = usage.next().flatten();
        let cpus = usage.collect();

        Self { system, cpus }
    }

    fn usage(a: &Reading, b: &Reading) -> Option<u8> {
        match (a, b) {
            (Ok(a), Ok(b)) => Some(Measurement::new(a, b).percentage()),
            (Err(error), _) | (_, Err(error)) => {
                warn!(%error, "skipping malformed cpu line");
                None
            }
        }
    }

    /// returns the aggregate utilization, if it could be measured.
    pub fn system(&self) -> Option<u8> {
        self.system
    }

    /// returns the utilization of each individual cpu.
    pub fn cpus(&self) -> &[Option<u8>] {
        &self.cpus
    }

    #[cfg(test)]
    pub(crate) fn from_usage(system: Option<u8>, cpus: Vec<Option<u8>>) -> Self {
        Self { system, cpus }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::source::{MockClock, MockStatFile},
    };

    const FIRST: &str = "cpu  100 0 0 100\ncpu0 50 0 0 50\ncpu1 50 0 0 50\n";
    const SECOND: &str = "cpu  150 0 0 150\ncpu0 100 0 0 50\ncpu1 50 0 0 100\n";
    const THIRD: &str = "cpu  200 0 0 200\ncpu0 100 0 0 100\ncpu1 100 0 0 100\n";

    fn sentinel(stats: &[&str]) -> Sentinel<MockClock, MockStatFile> {
        Sentinel::new(MockClock::default(), MockStatFile::new(stats.iter().copied()))
    }

    #[test]
    fn first_observation_warms_up() {
        let mut sentinel = sentinel(&[FIRST, SECOND]);
        let recording = sentinel.observe().unwrap();

        assert_eq!(recording.system(), Some(50));
        assert_eq!(recording.cpus(), &[Some(100), Some(0)]);
        assert_eq!(sentinel.clock.sleeps(), vec![Duration::from_millis(100)]);
        assert_eq!(sentinel.source.opened(), 2);
    }

    #[test]
    fn later_observations_reuse_last_snapshot() {
        let mut sentinel = sentinel(&[FIRST, SECOND, THIRD]);

        sentinel.observe().unwrap();
        let handed_over = sentinel.last().cloned().unwrap();
        assert_eq!(handed_over, Snapshot::read(&MockStatFile::new([SECOND])).unwrap());

        let recording = sentinel.observe().unwrap();
        assert_eq!(recording.system(), Some(50));
        assert_eq!(recording.cpus(), &[Some(0), Some(100)]);

        // no extra read between iterations, and no second warmup.
        assert_eq!(sentinel.source.opened(), 3);
        assert_eq!(sentinel.clock.sleeps().len(), 1);
    }

    #[test]
    fn first_sample_failure() {
        let mut sentinel = sentinel(&[]);
        let err = sentinel.observe().unwrap_err();
        assert!(matches!(err, StatReadError::Unavailable(_)));
        assert!(sentinel.last().is_none());
        assert!(sentinel.clock.sleeps().is_empty());
    }

    #[test]
    fn failed_read_keeps_previous_snapshot() {
        let mut sentinel = sentinel(&[FIRST, SECOND]);
        sentinel.observe().unwrap();

        // the source is exhausted now.
        sentinel.observe().unwrap_err();
        let kept = sentinel.last().cloned().unwrap();
        assert_eq!(kept, Snapshot::read(&MockStatFile::new([SECOND])).unwrap());
    }

    #[test]
    fn malformed_lines_are_unknown() {
        let mut sentinel = sentinel(&[
            "cpu  1 1\ncpu0 0 0 0 10\ncpu1 0 0 0 10\n",
            "cpu  2 2\ncpu0 10 0 0 10\ncpu1 0 0 0\n",
        ]);
        let recording = sentinel.observe().unwrap();
        assert_eq!(recording.system(), None);
        assert_eq!(recording.cpus(), &[Some(100), None]);
    }

    #[test]
    fn changing_cpu_count_compares_common_prefix() {
        let a = Snapshot::read(&MockStatFile::new([FIRST])).unwrap();
        let b = Snapshot::read(&MockStatFile::new(["cpu  150 0 0 150\ncpu0 100 0 0 50\n"]))
            .unwrap();
        let recording = Recording::new(&a, &b);
        assert_eq!(recording.system(), Some(50));
        assert_eq!(recording.cpus(), &[Some(100)]);
    }

    #[test]
    fn empty_snapshots() {
        let recording = Recording::new(&Snapshot::default(), &Snapshot::default());
        assert_eq!(recording.system(), None);
        assert!(recording.cpus().is_empty());
    }
}
