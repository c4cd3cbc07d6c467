use {
    crate::source::StatsSource,
    std::io::{self, BufRead, BufReader},
    thiserror::Error,
};

pub use self::{
    cpu_time::{CpuTime, Measurement},
    user_hz::UserHz,
};

mod cpu_time;
mod user_hz;


/// a snapshot of the cpus' statistics at a moment in time.
///
/// the first reading is the aggregate ("cpu") line, followed by each individual cpu in the order
/// the kernel reported them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Snapshot {
    readings: Vec<Reading>,
}

/// one cpu line out of a [`Snapshot`].
///
/// lines that are missing counters are kept, so that indices still line up with the kernel's
/// ordering, but callers must decide what to do with them.
pub type Reading = Result<CpuTime, MalformedLine>;

/// a cpu line that did not carry enough counters to be measured.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{label}: expected at least 4 time counters, found {found}")]
pub struct MalformedLine {
    /// the label that opened the line, e.g. `cpu` or `cpu3`.
    pub label: String,
    /// how many counters could be parsed.
    pub found: usize,
}

#[derive(Debug, Error)]
pub enum StatReadError {
    /// the source could not be opened at all.
    #[error("could not open counter source")]
    Unavailable(#[source] io::Error),
    /// the source was opened, but reading from it failed.
    #[error("could not read counter source")]
    Read(#[source] io::Error),
}

// === impl Snapshot ===

impl Snapshot {
    /// the literal that opens every cpu line.
    const PREFIX: &[u8] = b"cpu";

    /// uses the given source to parse a snapshot of the cpu statistics.
    ///
    /// cpu lines come first in `/proc/stat`. reading stops at the first line that is not a cpu
    /// line, and nothing after it is looked at, or decoded.
    pub fn read(stats: &impl StatsSource) -> Result<Snapshot, StatReadError> {
        let reader = stats.open().map_err(StatReadError::Unavailable)?;

        let mut readings = Vec::new();
        for line in BufReader::new(reader).split(b'\n') {
            let line = line.map_err(StatReadError::Read)?;
            let Some(reading) = Self::parse_line(&line) else {
                break;
            };
            readings.push(reading);
        }

        Ok(Snapshot { readings })
    }

    /// parses a single cpu line, returning `None` if this is not a cpu line.
    fn parse_line(line: &[u8]) -> Option<Reading> {
        if !line.starts_with(Self::PREFIX) {
            return None;
        }

        // bytes that aren't utf-8 can't be counters, so they end the line's counters below.
        let decoded = String::from_utf8_lossy(line);
        let line: &str = &decoded;

        // split the label ("cpu", "cpu0", ...) from the counters that follow it.
        let (label, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));

        // counters end at the first token that isn't a number.
        let times = rest
            .split_whitespace()
            .map_while(|token| token.parse::<UserHz>().ok())
            .collect::<Vec<_>>();

        Some(CpuTime::from_times(label, times))
    }

    /// returns every reading, aggregate first.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// returns the aggregate reading across all cpus, if the source reported one.
    #[cfg(test)]
    pub(crate) fn system(&self) -> Option<&Reading> {
        self.readings.first()
    }

    /// returns the readings of the individual cpus.
    pub fn cpus(&self) -> &[Reading] {
        self.readings.get(1..).unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.readings.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}
