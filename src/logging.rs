use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::error::HandlerError;

pub(crate) const LOG_FILE_NAME: &str = "model_log.txt";

/// `timestamp - LEVEL - message`, one record per line.
struct LogLine;

impl<S, N> FormatEvent<S, N> for LogLine
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
        SystemTime.format_time(&mut writer)?;
        write!(writer, " - {} - ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the process-wide log sink: an append-mode `model_log.txt` inside
/// the model directory.
///
/// The subscriber owns the file handle for the remainder of the process, so
/// there is no unmanaged handle to leak. Installation is first-caller-wins:
/// if a subscriber is already set (a second handler in the same process, or
/// a test harness), the existing sink is kept and this call still succeeds.
pub(crate) fn init(model_dir: &Path) -> Result<(), HandlerError> {
    let path = model_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| HandlerError::LogSetup {
            path: path.clone(),
            source,
        })?;

    let registry = Registry::default()
        .with(EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("info")))
        .with(
            fmt::layer()
                .event_format(LogLine)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        );
    let _ = registry.try_init();
    Ok(())
}
