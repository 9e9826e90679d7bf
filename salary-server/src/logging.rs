use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Wraps `text` in `color` when the writer supports ANSI escapes.
struct Styled<T> {
    color: &'static str,
    ansi: bool,
    text: T,
}

impl<T: std::fmt::Display> std::fmt::Display for Styled<T> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        if self.ansi {
            write!(f, "{}{}{RESET}", self.color, self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// Local-time event format: timestamp, level, `file:line`, fields.
///
/// File paths are reported relative to the workspace, e.g.
/// `salary-core/src/calculations/calculator.rs:95`.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let level = *meta.level();
        let level_text = format!("{:>5}", level.as_str());

        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        write!(
            writer,
            "{} {} ",
            Styled { color: DIM, ansi, text: timestamp },
            Styled { color: level_color(level), ansi, text: level_text },
        )?;

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let location = format!("{file}:{line}");
            write!(writer, "{} ", Styled { color: CYAN, ansi, text: location })?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// `RUST_LOG` when set, otherwise `level`.
fn make_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{level}'")),
    }
}

/// Initializes logging. Call once at startup.
///
/// - Stdout: colored when attached to a terminal, plain when piped.
/// - File: appended to when `log_file` is given, never colored.
/// - Level: `RUST_LOG` if set, else `level` (a bare level or any
///   `EnvFilter` directive).
pub fn init_logging(
    level: &str,
    log_file: Option<&Path>,
) -> Result<()> {
    let filter = make_filter(level)?;

    let file_layer = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(LocalFmt)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stdout_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stdout().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("logging already initialized")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn styled_text_is_plain_without_ansi() {
        let styled = Styled { color: CYAN, ansi: false, text: "calculator.rs:95" };

        assert_eq!(styled.to_string(), "calculator.rs:95");
    }

    #[test]
    fn styled_text_is_wrapped_with_ansi() {
        let styled = Styled { color: level_color(Level::WARN), ansi: true, text: " WARN" };

        assert_eq!(styled.to_string(), "\x1b[1;33m WARN\x1b[0m");
    }

    #[test]
    fn explicit_level_builds_a_filter() {
        assert!(make_filter("salary_core=debug,info").is_ok());
    }
}
