//! Process-wide `tracing` setup for the estimator binary.
//!
//! Events go to stderr and, once `--log-file` is given, to an append-only
//! file. The level filter and the console gate are reloadable so command
//! line flags can adjust them after the subscriber is installed.

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    Layer, // for .with_filter() on the console layer
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// Level used when neither `RUST_LOG` nor `--log-level` is set.
const DEFAULT_LEVEL: &str = "info";

// ─── line format ─────────────────────────────────────────────────────────────

/// `HH:MM:SS.mmm LEVEL target fields`, colored only on a terminal.
struct EstimatorFmt;

impl<S, N> FormatEvent<S, N> for EstimatorFmt
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
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        if ansi {
            let color = match *meta.level() {
                Level::ERROR => "1;31",
                Level::WARN => "1;33",
                Level::INFO => "1;32",
                Level::DEBUG => "1;34",
                Level::TRACE => "1;35",
            };
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m \x1b[{color}m{:>5}\x1b[0m \x1b[36m{}\x1b[0m ",
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{timestamp} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// ─── log file ────────────────────────────────────────────────────────────────

type SharedFile = Arc<Mutex<Option<File>>>;

/// Writer for the file layer. Discards output until a file is attached.
#[derive(Clone)]
struct LogFile(SharedFile);

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0.as_mut() {
            Some(file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

// ─── runtime controls ────────────────────────────────────────────────────────

type Reloader<T> = Box<dyn Fn(T) -> Result<()> + Send + Sync>;

/// Handles captured when the subscriber is installed.
struct LogControls {
    level: Reloader<EnvFilter>,
    console: Reloader<EnvFilter>,
    file: SharedFile,
}

static CONTROLS: OnceLock<LogControls> = OnceLock::new();

fn controls() -> Result<&'static LogControls> {
    CONTROLS
        .get()
        .ok_or_else(|| anyhow!("logging not yet initialized"))
}

fn reloader<S>(
    handle: reload::Handle<EnvFilter, S>,
    what: &'static str,
) -> Reloader<EnvFilter>
where
    S: Subscriber + Send + Sync + 'static,
{
    Box::new(move |filter| {
        handle
            .reload(filter)
            .map_err(|e| anyhow!("{what} reload failed: {e}"))
    })
}

/// Parses a bare level or a full `EnvFilter` directive list.
fn level_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("invalid log level '{directives}'"))
}

/// The console gate sits under the level filter: open passes everything
/// the level filter lets through.
fn console_gate(enabled: bool) -> EnvFilter {
    EnvFilter::new(if enabled { "trace" } else { "off" })
}

// ─── public API ──────────────────────────────────────────────────────────────

/// Replaces the active level filter, e.g. `debug` or `paint_core=trace`.
pub fn set_log_level(directives: &str) -> Result<()> {
    let filter = level_filter(directives)?;
    (controls()?.level)(filter)
}

/// Shows or hides console output. The log file is unaffected.
pub fn set_console_enabled(enabled: bool) -> Result<()> {
    (controls()?.console)(console_gate(enabled))
}

/// Appends log output to `path`, replacing any file attached earlier.
/// The parent directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let controls = controls()?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    *controls.file.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
    Ok(())
}

/// Installs the global subscriber. Later calls are no-ops.
///
/// The level comes from `RUST_LOG`, falling back to `info`. Console output
/// goes to stderr so it never interleaves with reports on stdout.
pub fn init_default_logging() {
    if CONTROLS.get().is_some() {
        return;
    }

    let file: SharedFile = Arc::new(Mutex::new(None));
    let (console_filter, console_handle) = reload::Layer::new(console_gate(true));
    let (level, level_handle) = reload::Layer::new(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    );

    let console_layer = tracing_subscriber::fmt::layer()
        .event_format(EstimatorFmt)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(console_filter);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(EstimatorFmt)
        .with_ansi(false)
        .with_writer(LogFile(file.clone()));

    // Fails only if another subscriber is already installed.
    if tracing_subscriber::registry()
        .with(level)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    let _ = CONTROLS.set(LogControls {
        level: reloader(level_handle, "level filter"),
        console: reloader(console_handle, "console filter"),
        file,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_filter_accepts_levels_and_directives() {
        for directives in ["warn", "debug", "paint_core=trace", "info,paint_gemini=debug"] {
            assert!(level_filter(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    fn level_filter_rejects_unknown_level() {
        let error = level_filter("paint_core=loud").unwrap_err();

        assert!(error.to_string().contains("paint_core=loud"));
    }

    #[test]
    fn log_file_discards_until_attached() {
        let slot = LogFile(Arc::new(Mutex::new(None)));

        let written = slot.make_writer().write(b"dropped\n").unwrap();

        assert_eq!(written, 8);
    }

    #[test]
    fn log_file_appends_once_attached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("estimator.log");
        let slot = LogFile(Arc::new(Mutex::new(Some(File::create(&path).unwrap()))));

        slot.make_writer().write_all(b"estimate recomputed\n").unwrap();
        slot.make_writer().flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "estimate recomputed\n");
    }
}
