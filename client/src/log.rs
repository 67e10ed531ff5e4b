use std::fmt;

use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Notice,
    Warning,
}

pub fn line(level: Level, args: fmt::Arguments) {
    let timestamp = chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string();

    match level {
        Level::Notice => println!("{} {} {args}", timestamp.dimmed(), "notice ".green()),
        Level::Warning => eprintln!("{} {} {args}", timestamp.dimmed(), "warning".yellow()),
    }
}

macro_rules! notice {
    ($($arg:tt)*) => {
        $crate::log::line($crate::log::Level::Notice, format_args!($($arg)*))
    };
}

macro_rules! warning {
    ($($arg:tt)*) => {
        $crate::log::line($crate::log::Level::Warning, format_args!($($arg)*))
    };
}

pub(crate) use notice;
pub(crate) use warning;
