use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::args::{LogFormatter, LogLevel};

/// Installs the global subscriber. Later calls only report that one exists.
pub fn init_logging(level: LogLevel, verbose: bool, formatter: LogFormatter) {
    let filter = build_filter(level, verbose);
    let builder = FmtSubscriber::builder().with_env_filter(filter);

    let result = match formatter {
        LogFormatter::Default => tracing::subscriber::set_global_default(builder.finish()),
        LogFormatter::Plain => tracing::subscriber::set_global_default(
            builder.with_ansi(false).event_format(PlainFormat).finish(),
        ),
    };

    if let Err(err) = result {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn build_filter(level: LogLevel, verbose: bool) -> EnvFilter {
    let fallback = default_directive(level, verbose);
    std::env::var("HTTPT_LOG")
        .or_else(|_err| std::env::var("RUST_LOG"))
        .map_or_else(
            |_err| EnvFilter::new(fallback),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_err| EnvFilter::new(fallback)),
        )
}

const fn default_directive(level: LogLevel, verbose: bool) -> &'static str {
    match (level, verbose) {
        (LogLevel::Trace, _) => "trace",
        (_, true) => "debug",
        (_, false) => level.as_str(),
    }
}

/// Writes the event message alone, so response bodies come out as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormat;

impl<S, N> FormatEvent<S, N> for PlainFormat
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
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        writeln!(writer, "{}", visitor.message)
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}
