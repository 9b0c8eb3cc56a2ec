// This software is released under the MIT license.
// See file LICENSE for full license details.
use std::io::Write;

use log::{Level, LevelFilter};

/// Install the process-wide logger. Everything goes to stderr so stdout stays
/// free for help/version output.
pub fn setup_global_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                buf.timestamp_seconds(),
                record.level().as_str().to_lowercase(),
                record.args()
            )
        })
        .try_init()
}

///////////////////////////////
/// Where the resolver and the command report their diagnostics.
/// Passed explicitly so tests can capture output without touching the global logger.
pub trait DiagnosticSink {
    fn emit(&mut self, level: Level, message: &str);

    fn debug(&mut self, message: &str) {
        self.emit(Level::Debug, message);
    }

    fn info(&mut self, message: &str) {
        self.emit(Level::Info, message);
    }

    fn warn(&mut self, message: &str) {
        self.emit(Level::Warn, message);
    }

    fn error(&mut self, message: &str) {
        self.emit(Level::Error, message);
    }
}

/// Forwards to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&mut self, level: Level, message: &str) {
        log::log!(level, "{}", message);
    }
}

/// Keeps every record in memory, in emission order.
#[derive(Clone, Debug, Default)]
pub struct CaptureSink {
    pub records: Vec<(Level, String)>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages at exactly `level`, in order.
    pub fn messages(&self, level: Level) -> Vec<&str> {
        self.records
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.records.iter().any(|(_, m)| m.contains(needle))
    }
}

impl DiagnosticSink for CaptureSink {
    fn emit(&mut self, level: Level, message: &str) {
        self.records.push((level, message.to_string()));
    }
}
