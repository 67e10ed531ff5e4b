use std::{env, process};

use anyhow::Context;
use cli::Args;
use driver::{Driver, RunBudget};
use log::notice;
use stop::StopFlag;

mod cli;
mod config;
mod driver;
mod log;
mod renderer;
mod stop;

fn main() -> anyhow::Result<()> {
    let args = Args::parse(env::args().skip(1))?;
    let config = config::load(args.config_path.as_deref())?;

    notice!(
        "gameoflife started, pid {}, {}x{} grid, {}ms per tick",
        process::id(),
        config.width,
        config.height,
        config.tick_interval_ms
    );

    if let Some(run_for) = args.run_for {
        notice!("Running for {} seconds then quitting", run_for.as_secs());
    }

    let stop = StopFlag::default();
    stop::listen_for_signals(stop.clone()).context("Installing signal handlers")?;

    // The thread rng is seeded from the OS, so every run starts from a different grid.
    let driver = Driver::new(&config, rand::rng(), stop, RunBudget::new(args.run_for))?;

    renderer::run(&config, driver)
}
