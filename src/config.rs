//! command-line configuration.

use {
    crate::source::ProcStatFile,
    clap::{Parser, crate_description, crate_version},
    std::{
        num::{NonZeroU64, NonZeroUsize},
        path::PathBuf,
        time::Duration,
    },
};

/// the arguments accepted by `cpu-hist`.
#[derive(Parser, Debug)]
#[command(
    name = "cpu-hist",
    version = crate_version!(),
    about = crate_description!(),
)]
pub struct Args {
    #[arg(
        long = "high-load",
        value_name = "PERCENT",
        default_value = "75",
        help = "Sets the aggregate usage at which output is marked as high load.",
        long_help = "Sets the aggregate usage, in percent, at or above which the output carries a \
                    \"high-load\" class. Values above 100 are treated as 100."
    )]
    pub high_load: u64,

    #[arg(
        long,
        value_name = "N",
        default_value = "5",
        help = "Sets the number of histogram buckets."
    )]
    pub bins: NonZeroUsize,

    #[arg(
        long = "loop",
        help = "Keeps sampling forever, printing one line per sample.",
        long_help = "Keeps sampling forever, printing one line per sample. Without this, a single \
                    line is printed and the program exits."
    )]
    pub looping: bool,

    #[arg(
        long,
        value_name = "SECONDS",
        default_value = "10",
        help = "Sets the number of seconds to wait between samples when looping."
    )]
    pub sleep: NonZeroU64,

    #[arg(
        long,
        value_name = "PATH",
        default_value = ProcStatFile::STAT,
        help = "Sets the file cpu counters are read from."
    )]
    pub stat: PathBuf,
}

/// the settings the sampling loop runs with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// the aggregate usage at or above which output is marked as high load.
    pub high_load: u8,
    /// the number of histogram buckets.
    pub bins: NonZeroUsize,
    /// whether to keep sampling after the first line.
    pub looping: bool,
    /// how long to wait between samples when looping.
    pub interval: Duration,
    /// where cpu counters are read from.
    pub stat: PathBuf,
}

// === impl Config ===

impl From<Args> for Config {
    fn from(
        Args {
            high_load,
            bins,
            looping,
            sleep,
            stat,
        }: Args,
    ) -> Self {
        Self {
            high_load: high_load.min(100) as u8,
            bins,
            looping,
            interval: Duration::from_secs(sleep.get()),
            stat,
        }
    }
}
