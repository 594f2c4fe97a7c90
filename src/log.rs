// RustPixel
// copyright zipxing@hotmail.com 2022~2024


//! Log module provides various log functions, reference
//! https://docs.rs/log4rs
//!
//! Records go to a log file and, at the same threshold, to stderr.


use crate::error::{Result, ViewerError};
use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use std::path::Path;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// init logs system
pub fn init_log(level: LevelFilter, file_path: &Path) -> Result<()> {
    if let Some(dir) = file_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(file_path)?;
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("console", Box::new(console)),
        )
        .build(
            Root::builder()
                .appender("logfile")
                .appender("console")
                .build(level),
        )
        .map_err(|e| ViewerError::Config(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| ViewerError::Config(e.to_string()))?;
    Ok(())
}

/// Parses a level name such as `info` or `DEBUG`.
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    name.parse::<LevelFilter>()
        .map_err(|_| ViewerError::Config(format!("unknown log level '{}'", name)))
}
