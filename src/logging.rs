use std::io::Write;

use colored::Colorize;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

/// Map `-v` occurrences to a log level for this crate.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,  // default: warnings (e.g. rate limiting) and errors
        1 => LevelFilter::Info,  // -v: token usage, file counts
        2 => LevelFilter::Debug, // -vv: HTTP status, model reply
        _ => LevelFilter::Trace, // -vvv: request headers/bodies, prompts
    }
}

/// Log to stderr so stdout carries only the description.
/// Dependencies (reqwest, hyper) stay at warn unless RUST_LOG says otherwise.
pub fn init_logger(verbosity: u8) {
    let mut builder = Builder::new();
    builder
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("prdescribe", level_for(verbosity))
        .parse_env("RUST_LOG");

    builder.format(|buf, record| {
        let level_label = match record.level() {
            Level::Error => "ERROR".red().bold(),
            Level::Warn  => "WARN ".yellow().bold(),
            Level::Info  => "INFO ".white().bold(),
            Level::Debug => "DEBUG".bright_black(),
            Level::Trace => "TRACE".bright_black(),
        };

        writeln!(buf, "{} {}", level_label, record.args())
    });

    // Tests may initialise more than once.
    let _ = builder.try_init();
}
