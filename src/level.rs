use std::fmt;
use std::str::FromStr;

use crate::error::ParseSeverityError;

/// Severity of a log statement.
///
/// Levels are totally ordered: `Info < Warn < Error < Fatal < Check`.
/// A sink only accepts messages whose severity is at least its configured
/// minimum, except for `Fatal` and `Check` which are never filtered.
///
/// # Examples
///
/// ```
/// # use benchlog::Severity;
/// assert!(Severity::Warn > Severity::Info);
/// assert_eq!(Severity::Error.name(), "ERROR");
/// assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warn);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Severity {
    /// Regular diagnostic output
    #[default]
    Info = 0,
    /// Something looks wrong but execution continues normally
    Warn = 1,
    /// An operation failed
    Error = 2,
    /// Unrecoverable condition; raises after the write
    Fatal = 3,
    /// Assertion failure; raises after the write
    Check = 4,
}

impl Severity {
    /// All levels from least to most severe.
    pub const ALL: [Severity; 5] = [
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
        Severity::Check,
    ];

    /// The upper-case name used in the `[LEVEL]` prefix.
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Check => "CHECK",
        }
    }

    /// Whether messages of this level bypass the sink threshold.
    pub const fn is_unfilterable(self) -> bool {
        matches!(self, Severity::Fatal | Severity::Check)
    }

    pub(crate) const fn as_u8(self) -> u8 {
        self as u8
    }

    pub(crate) const fn from_u8(value: u8) -> Severity {
        match value {
            0 => Severity::Info,
            1 => Severity::Warn,
            2 => Severity::Error,
            3 => Severity::Fatal,
            _ => Severity::Check,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .iter()
            .copied()
            .find(|level| level.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSeverityError {
                input: s.to_string(),
            })
    }
}

/// Returns true when a message at `level` passes a sink configured with
/// `sink_level`.
#[inline(always)]
pub fn should_emit(level: Severity, sink_level: Severity) -> bool {
    level >= sink_level
}

/// Returns true when a statement requesting `requested` verbosity passes a
/// module whose threshold is `threshold`.
#[inline(always)]
pub fn should_emit_verbose(requested: i32, threshold: i32) -> bool {
    requested <= threshold
}
