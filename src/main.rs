//! a per-core cpu usage histogram for status bars.
//!
//! run with `RUST_LOG=debug cpu-hist` to see what it is doing; logs go to stderr.

use {
    anyhow::Context,
    clap::Parser,
    cpu_hist::{App, Args, Config},
    std::io,
    tracing_subscriber::EnvFilter,
};

fn main() -> anyhow::Result<()> {
    // stdout carries the json lines, so logs are kept on stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::from(Args::parse());
    tracing::debug!(?config, "starting cpu-hist v{}", env!("CARGO_PKG_VERSION"));

    // being stopped while looping is how this program is meant to end.
    ctrlc::set_handler(|| std::process::exit(0)).context("could not install signal handler")?;

    App::new(config)
        .run(&mut io::stdout().lock())
        .context("cpu-hist stopped")
}
