// GlTutor
// copyright gl_tutor developers 2024～2025

//! Log module initialises log4rs, reference
//! https://docs.rs/log4rs
//!
//! Tutorials log through the `log` facade; this only wires the appenders once per process.

use crate::error::AppError;
use log::LevelFilter;
use log4rs::{
    append::{console::ConsoleAppender, file::FileAppender},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// init logs system
///
/// Writes to `file_path` and, when `console` is set, to stderr as well.
pub fn init_log(level: LevelFilter, file_path: &str, console: bool) -> Result<(), AppError> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(file_path)
        .map_err(|e| AppError::Log(format!("{}: {}", file_path, e)))?;

    let mut builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(level)))
            .build("logfile", Box::new(logfile)),
    );
    let mut root = Root::builder().appender("logfile");

    if console {
        let stderr = ConsoleAppender::builder()
            .target(log4rs::append::console::Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("console", Box::new(stderr)),
        );
        root = root.appender("console");
    }

    let config = builder
        .build(root.build(level))
        .map_err(|e| AppError::Log(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| AppError::Log(e.to_string()))?;
    Ok(())
}

/// Parses a level name from config ("info", "debug", ...), falling back to Info.
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }
}
