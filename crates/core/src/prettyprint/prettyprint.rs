use tracing::{Event, Subscriber};
use tracing_subscriber::{
    fmt::{
        self,
        format::{Format, FormatEvent, FormatFields, Writer},
        FmtContext,
    },
    registry::LookupSpan,
};

/// Renders the steps of an export run as a tree: each event is indented by the depth of its
/// span and tagged with the innermost span name, e.g.
///
/// ```text
///   └─[ExportRoutine::run] INFO 📭 No unexported records
/// ```
pub struct PrettyFormatter {
    inner: Format,
    ansi: bool,
}

impl PrettyFormatter {
    pub fn new(ansi: bool) -> Self {
        Self {
            inner: fmt::format()
                .with_ansi(ansi)
                .with_target(false)
                .with_level(true)
                .with_source_location(false),
            ansi,
        }
    }

    /// Colored output for the operator's terminal.
    pub fn terminal() -> Self {
        Self::new(true)
    }

    /// Plain output for the log file.
    pub fn log_file() -> Self {
        Self::new(false)
    }
}

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let Some(scope) = ctx.event_scope() else {
            return self.inner.format_event(ctx, writer, event);
        };

        let spans = scope.from_root().map(|span| span.name()).collect::<Vec<_>>();
        let indent = "  ".repeat(spans.len().saturating_sub(1));
        let innermost = spans.last().copied().unwrap_or_default();

        if self.ansi {
            write!(writer, "{indent}└─\x1b[2m[{innermost}]\x1b[0m ")?;
        } else {
            write!(writer, "{indent}└─[{innermost}] ")?;
        }

        self.inner.format_event(ctx, writer, event)
    }
}
