// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! Log module, file logging through log4rs, reference
//! https://docs.rs/log4rs

use crate::util::get_abs_path;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

pub const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// init logs system, file_path is relative to the repository root
///
/// A scene keeps running without a log file, so failures here are only
/// reported on stderr.
pub fn init_log(level: LevelFilter, file_path: &str) {
    let fpath = get_abs_path(file_path);
    let logfile = match FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&fpath)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("cannot open log file {}: {}", fpath.display(), e);
            return;
        }
    };
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level));
    match config {
        Ok(config) => {
            if let Err(e) = log4rs::init_config(config) {
                eprintln!("logger already initialised: {}", e);
            }
        }
        Err(e) => eprintln!("bad log config: {}", e),
    }
}
