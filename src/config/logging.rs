//! Subscriber setup shared by the binaries. The library itself only emits events.

use tracing::Subscriber;
use tracing_subscriber::{fmt, fmt::MakeWriter, prelude::*, EnvFilter};

/// Formatted output to `writer`, filtered by `filter`.
pub fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter)
}

/// Install the process-wide subscriber. `RUST_LOG` takes priority over `level`.
///
/// The CLI passes stderr so stdout carries only JSON; the HTTP server logs to stdout.
pub fn init_tracing<W>(level: &str, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    subscriber(filter, writer).init();
}

#[cfg(test)]
pub(crate) use capture::capture_logs;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_drops_events_below_level() {
        let output = capture_logs("warn", || {
            tracing::info!("routine detail");
            tracing::warn!("something odd");
        });

        assert!(!output.contains("routine detail"), "{output}");
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("something odd"), "{output}");
    }

    #[test]
    fn test_output_has_no_ansi_escapes() {
        let output = capture_logs("info", || tracing::info!("plain"));
        assert!(output.contains("plain"));
        assert!(!output.contains('\u{1b}'));
    }
}
