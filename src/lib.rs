//! a per-core cpu usage histogram for status bars.
//!
//! cpu counters are sampled from `/proc/stat`, turned into a utilization percentage for each cpu,
//! and bucketed into a histogram. each sample is printed as one line of json:
//!
//! ```json
//! {"text":"▁▁▃▁▅","percentage":42,"tooltip":"CPU: 42%\nCPU0: 10%\n...","class":"high-load"}
//! ```

use {
    std::{io, time::Duration},
    thiserror::Error,
    tracing::{debug, error},
};

pub use self::{
    config::{Args, Config},
    histogram::Histogram,
    output::Output,
    sentinel::{Recording, Sentinel},
    source::{Clock, ProcStatFile, StatsSource, SystemClock},
    stat::{CpuTime, MalformedLine, Measurement, Reading, Snapshot, StatReadError, UserHz},
};

mod config;
mod histogram;
mod output;
mod sentinel;
mod source;

/// kernel statistics facilities.
///
/// this file provides tools to interact with `/proc/stat`.
mod stat;


pub struct App<C = SystemClock, S = ProcStatFile> {
    sentinel: Sentinel<C, S>,
    config: Config,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Stat(#[from] StatReadError),
    #[error("could not write output")]
    Output(#[source] io::Error),
}

/// === impl App ===

impl App {
    /// initializes a new application, reading from the configured stat file.
    pub fn new(config: Config) -> Self {
        let source = ProcStatFile::new(&config.stat);
        Self::with_sentinel(Sentinel::new(SystemClock, source), config)
    }
}

impl<C, S> App<C, S>
where
    C: Clock,
    S: StatsSource,
{
    pub fn with_sentinel(sentinel: Sentinel<C, S>, config: Config) -> Self {
        Self { sentinel, config }
    }

    /// runs the application, writing one line to `out` per sample.
    ///
    /// without [`Config::looping`], this returns after the first line. otherwise it only returns
    /// if writing to `out` fails.
    pub fn run(self, out: &mut impl io::Write) -> Result<(), Error> {
        let Self {
            mut sentinel,
            config:
                Config {
                    high_load,
                    bins,
                    looping,
                    interval,
                    stat: _,
                },
        } = self;

        // the first recording is not retried: if it fails, nothing has been printed yet.
        let mut recording = sentinel.observe()?;
        let mut histogram = Histogram::new(bins, recording.cpus().len());

        loop {
            let usage = recording.cpus().iter().flatten().copied().collect::<Vec<_>>();
            histogram.reset();
            histogram.update(&usage);

            let output = Output::new(&histogram, &recording, high_load);
            debug!(text = %output.text, percentage = output.percentage, "emitting sample");
            output.emit(out).map_err(Error::Output)?;

            if !looping {
                return Ok(());
            }

            recording = Self::next(&mut sentinel, interval);
        }
    }

    /// waits for the interval to pass, then takes another recording.
    ///
    /// if the source can't be read, the failure is logged and this tries again after another
    /// interval.
    fn next(sentinel: &mut Sentinel<C, S>, interval: Duration) -> Recording {
        loop {
            sentinel.rest(interval);
            match sentinel.observe() {
                Ok(recording) => return recording,
                Err(ref error) => error!(
                    error = error as &dyn std::error::Error,
                    "skipping sample"
                ),
            }
        }
    }
}
