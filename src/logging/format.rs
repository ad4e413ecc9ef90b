//! Line format shared by the file and console sinks
//!
//! `<timestamp> - <LEVEL> - <message> (<source_file>:<line>)`

use std::fmt::{self, Write as _};
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::{format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Timestamp layout for every log line (local time, 12-hour clock).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// Field that promotes an ERROR event to CRITICAL.
pub const CRITICAL_FIELD: &str = "critical";

const GREY: &str = "\x1b[38;20m";
const YELLOW: &str = "\x1b[33;20m";
const RED: &str = "\x1b[31;20m";
const BOLD_RED: &str = "\x1b[31;1m";
const RESET: &str = "\x1b[0m";

/// Severity as printed in a log line.
///
/// Mirrors `tracing::Level` plus `Critical`, which has no `tracing`
/// counterpart and is carried as an ERROR event with `critical = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Finer than debug; filtered out by the default configuration.
    Trace,
    /// Diagnostic detail.
    Debug,
    /// Normal progress.
    Info,
    /// Something unexpected but handled.
    Warning,
    /// An operation failed.
    Error,
    /// The run cannot continue.
    Critical,
}

impl Severity {
    /// Map a `tracing` level to a severity.
    #[must_use]
    pub fn from_level(level: Level, critical: bool) -> Self {
        match level {
            Level::TRACE => Self::Trace,
            Level::DEBUG => Self::Debug,
            Level::INFO => Self::Info,
            Level::WARN => Self::Warning,
            _ if critical => Self::Critical,
            _ => Self::Error,
        }
    }

    /// Upper-case label used in the line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// ANSI color prefix for console output.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Trace | Self::Debug | Self::Info => GREY,
            Self::Warning => YELLOW,
            Self::Error => RED,
            Self::Critical => BOLD_RED,
        }
    }
}

/// Collects the message, the critical flag and any other fields of an event.
#[derive(Debug, Default)]
struct EventFields {
    message: String,
    critical: bool,
    extra: Vec<String>,
}

impl EventFields {
    fn text(&self) -> String {
        let mut text = self.message.clone();
        for field in &self.extra {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(field);
        }
        text
    }
}

impl Visit for EventFields {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == CRITICAL_FIELD {
            self.critical = value;
        } else {
            self.extra.push(format!("{}={value}", field.name()));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.extra.push(format!("{}={value}", field.name()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message.clear();
            let _ = write!(self.message, "{value:?}");
        } else {
            self.extra.push(format!("{}={value:?}", field.name()));
        }
    }
}

/// Render one log line without color or trailing newline.
#[must_use]
pub fn render_line(
    timestamp: &DateTime<Local>,
    severity: Severity,
    message: &str,
    file: Option<&str>,
    line: Option<u32>,
) -> String {
    let file = file
        .and_then(|f| Path::new(f).file_name())
        .and_then(|f| f.to_str())
        .unwrap_or("unknown");
    format!(
        "{} - {} - {message} ({file}:{})",
        timestamp.format(TIMESTAMP_FORMAT),
        severity.label(),
        line.unwrap_or(0)
    )
}

/// Event formatter producing the shared line format.
///
/// With `ansi` set, each line is wrapped in the severity color.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat {
    ansi: bool,
}

impl LineFormat {
    /// Formatter for sinks that must stay free of escape codes.
    #[must_use]
    pub const fn plain() -> Self {
        Self { ansi: false }
    }

    /// Formatter for terminals; `ansi = false` disables colors.
    #[must_use]
    pub const fn colored(ansi: bool) -> Self {
        Self { ansi }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let mut fields = EventFields::default();
        event.record(&mut fields);

        let severity = Severity::from_level(*metadata.level(), fields.critical);
        let line = render_line(
            &Local::now(),
            severity,
            &fields.text(),
            metadata.file(),
            metadata.line(),
        );

        if self.ansi {
            writeln!(writer, "{}{line}{RESET}", severity.color())
        } else {
            writeln!(writer, "{line}")
        }
    }
}
