use std::{path::PathBuf, time::Duration};

use anyhow::{Context, ensure};

pub const USAGE: &str = "usage: client [SECONDS|-] [CONFIG.json|-]";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args {
    pub run_for: Option<Duration>,
    pub config_path: Option<PathBuf>,
}

impl Args {
    /// Parses the arguments after the program name. `-` picks the default for a slot.
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        let run_for = match args.next().filter(|arg| arg != "-") {
            Some(seconds) => {
                let seconds = seconds
                    .parse::<u64>()
                    .with_context(|| format!("Invalid run duration {seconds:?}, {USAGE}"))?;

                (seconds > 0).then(|| Duration::from_secs(seconds))
            }
            None => None,
        };

        let config_path = args.next().filter(|arg| arg != "-").map(PathBuf::from);

        ensure!(args.next().is_none(), "Too many arguments, {USAGE}");

        Ok(Self {
            run_for,
            config_path,
        })
    }
}
