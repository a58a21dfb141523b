use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Renders each event as a single `LEVEL: message` line, with no timestamp,
/// target or span context.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticFormat;

pub fn level_label(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

impl<S, N> FormatEvent<S, N> for DiagnosticFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "{}: ", level_label(event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture(max_level: Level, f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(DiagnosticFormat)
            .with_max_level(max_level)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn test_levels_are_prefixed() {
        let out = capture(Level::INFO, || {
            tracing::info!("Created user {}", "john_doe");
            tracing::warn!("User {} not found", "ghost");
            tracing::error!("User {} already exists", "john_doe");
            tracing::debug!("hidden");
        });
        assert_eq!(
            out,
            "INFO: Created user john_doe\nWARNING: User ghost not found\nERROR: User john_doe already exists\n"
        );
    }

    #[test]
    fn test_debug_shown_when_enabled() {
        let out = capture(Level::DEBUG, || {
            tracing::debug!("User {} not found", "ghost");
        });
        assert_eq!(out, "DEBUG: User ghost not found\n");
    }

    #[test]
    fn test_level_label() {
        assert_eq!(level_label(&Level::WARN), "WARNING");
        assert_eq!(level_label(&Level::TRACE), "TRACE");
    }
}
