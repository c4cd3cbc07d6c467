use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
    time::Duration,
};

#[cfg(test)]
use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    io::Cursor,
};

pub use self::{clock::*, stats::*};

mod clock {
    use super::*;

    /// waits between samples.
    pub trait Clock {
        /// blocks the current thread for the given duration.
        fn sleep(&self, duration: Duration);
    }

    #[derive(Debug, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn sleep(&self, duration: Duration) {
            std::thread::sleep(duration);
        }
    }

    impl<C: Clock> Clock for &C {
        fn sleep(&self, duration: Duration) {
            (**self).sleep(duration);
        }
    }

    /// a mock clock, which records how long it was asked to sleep and returns immediately.
    #[cfg(test)]
    #[derive(Default)]
    pub struct MockClock {
        sleeps: RefCell<Vec<Duration>>,
    }

    #[cfg(test)]
    impl Clock for MockClock {
        fn sleep(&self, duration: Duration) {
            let MockClock { sleeps } = self;
            sleeps.borrow_mut().push(duration);
        }
    }

    #[cfg(test)]
    impl MockClock {
        /// returns every sleep requested so far, in order.
        pub fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.borrow().clone()
        }
    }
}

/// abstracts over providers of statistics.
mod stats {
    use super::*;

    /// a source of kernel statistics.
    pub trait StatsSource {
        /// returns a reader.
        fn open(&self) -> io::Result<impl Read>;
    }

    /// stats backed by a file, `/proc/stat` by default.
    #[derive(Debug)]
    pub struct ProcStatFile {
        path: PathBuf,
    }

    /// a mock stat source.
    ///
    /// each call to [`StatsSource::open()`] yields the next queued text. a queued `None`, or an
    /// empty queue, fails to open as though the file had vanished.
    #[cfg(test)]
    #[derive(Default)]
    pub struct MockStatFile {
        stats: RefCell<VecDeque<Option<Vec<u8>>>>,
        opened: Cell<usize>,
    }

    impl<S: StatsSource> StatsSource for &S {
        fn open(&self) -> io::Result<impl Read> {
            (**self).open()
        }
    }

    // === impl ProcStatFile ===

    impl StatsSource for ProcStatFile {
        fn open(&self) -> io::Result<impl Read> {
            let Self { path } = self;

            File::open(path).map_err(|error| {
                io::Error::new(error.kind(), format!("{}: {error}", path.display()))
            })
        }
    }

    impl ProcStatFile {
        pub const STAT: &str = "/proc/stat";

        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }
    }

    // === impl MockStatFile ===

    #[cfg(test)]
    impl StatsSource for MockStatFile {
        fn open(&self) -> io::Result<impl Read> {
            let Self { stats, opened } = self;

            opened.set(opened.get() + 1);
            stats
                .borrow_mut()
                .pop_front()
                .flatten()
                .map(Cursor::new)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "mock stats unavailable"))
        }
    }

    #[cfg(test)]
    impl MockStatFile {
        pub fn new<S: Into<Vec<u8>>>(stats: impl IntoIterator<Item = S>) -> Self {
            Self {
                stats: RefCell::new(stats.into_iter().map(Into::into).map(Some).collect()),
                opened: Cell::new(0),
            }
        }

        /// queues one failed open.
        pub fn unavailable(self) -> Self {
            self.stats.borrow_mut().push_back(None);
            self
        }

        /// queues one more text.
        pub fn then(self, stats: impl Into<Vec<u8>>) -> Self {
            self.stats.borrow_mut().push_back(Some(stats.into()));
            self
        }

        /// returns how many times this source has been opened.
        pub fn opened(&self) -> usize {
            self.opened.get()
        }
    }
}
