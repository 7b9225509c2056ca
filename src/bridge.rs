//! Bridge from the [`log`] facade.
//!
//! Libraries that log through the `log` crate can be routed into the active
//! sink. `error!`, `warn!` and `info!` records keep their severity. `debug!`
//! and `trace!` records become verbose statements of the `"log"` module with
//! verbosity 1 and 2, so they stay silent until
//! `set_verbosity(LOG_MODULE, n)` opts in.

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

use crate::level::Severity;
use crate::logger::get_logger;
use crate::message::{Message, Target};
use crate::module::ModuleTag;
use crate::loggable::shown;

/// Module that `debug!` and `trace!` records are attributed to.
pub static LOG_MODULE: ModuleTag = ModuleTag::new("log");

static BRIDGE: LogBridge = LogBridge;

/// `log::Log` implementation forwarding to [`get_logger`].
pub struct LogBridge;

impl LogBridge {
    fn target(level: Level) -> Target {
        match level {
            Level::Error => Target::Level(Severity::Error),
            Level::Warn => Target::Level(Severity::Warn),
            Level::Info => Target::Level(Severity::Info),
            Level::Debug => Target::Verbose {
                module: LOG_MODULE.key(),
                verbosity: 1,
            },
            Level::Trace => Target::Verbose {
                module: LOG_MODULE.key(),
                verbosity: 2,
            },
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        Self::target(metadata.level()).enabled_in(get_logger())
    }

    fn log(&self, record: &Record<'_>) {
        let sink = get_logger();
        let target = Self::target(record.level());
        if !target.enabled_in(sink) {
            return;
        }

        let mut message = Message::with_sink(sink, target);
        if let (Some(file), Some(line)) = (record.file_static(), record.line()) {
            message = message.at(file, line);
        }
        message.append(&shown(record.args()));
        message.emit();
    }

    fn flush(&self) {
        get_logger().flush();
    }
}

/// Installs the bridge as the `log` crate's global logger.
///
/// Fails if another `log` implementation was installed first.
///
/// ```
/// benchlog::bridge::init().unwrap();
/// log::warn!("routed through {}", "benchlog");
/// ```
pub fn init() -> Result<(), SetLoggerError> {
    log::set_logger(&BRIDGE)?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
