//! Log entry encoders.
//!
//! Two `FormatEvent` implementations share a fixed field-key schema: a
//! console encoder (one `" - "`-separated line per entry) and a JSON encoder
//! (one object per line). Reserved event fields carry the application call
//! site and logger name through the engine; everything else is rendered
//! verbatim as structured fields.

use crate::caller::{format_caller, function_segment, CallSite};
use serde_json::{Map, Value};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// Field keys of the persisted schema
pub const MESSAGE_KEY: &str = "msg";
pub const LEVEL_KEY: &str = "level";
pub const TIME_KEY: &str = "time";
pub const LOGGER_KEY: &str = "logger";
pub const CALLER_KEY: &str = "caller";
pub const FUNCTION_KEY: &str = "function";
pub const STACKTRACE_KEY: &str = "stacktrace";

/// Separator between schema fields on a console line
pub const CONSOLE_SEPARATOR: &str = " - ";

// Reserved event field names set by the Logger handle.
pub(crate) const CALLER_FILE_FIELD: &str = "caller.file";
pub(crate) const CALLER_LINE_FIELD: &str = "caller.line";
pub(crate) const CALLER_FUNCTION_FIELD: &str = "caller.function";

/// ISO-8601 timestamp layout, millisecond precision with UTC offset
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Console encoder
#[derive(Debug, Default)]
pub struct ConsoleFormatter;

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
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
        let entry = Entry::collect(event);
        write!(
            writer,
            "{time}{sep}{level}{sep}{logger}{sep}{caller}{sep}{message}",
            time = entry.time,
            level = entry.level,
            logger = entry.logger,
            caller = entry.caller,
            message = entry.message,
            sep = CONSOLE_SEPARATOR,
        )?;
        for (key, value) in &entry.extra {
            write!(writer, " {}={}", key, render_scalar(value))?;
        }
        writeln!(writer)?;
        // Stacktraces are multi-line; they follow the entry on their own lines
        if let Some(stacktrace) = &entry.stacktrace {
            writeln!(writer, "{}", stacktrace)?;
        }
        Ok(())
    }
}

/// JSON encoder
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl<S, N> FormatEvent<S, N> for JsonFormatter
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
        let entry = Entry::collect(event);
        let mut object = Map::new();
        object.insert(TIME_KEY.to_string(), Value::from(entry.time));
        object.insert(LEVEL_KEY.to_string(), Value::from(entry.level));
        object.insert(LOGGER_KEY.to_string(), Value::from(entry.logger));
        object.insert(CALLER_KEY.to_string(), Value::from(entry.caller));
        object.insert(FUNCTION_KEY.to_string(), Value::from(entry.function));
        object.insert(MESSAGE_KEY.to_string(), Value::from(entry.message));
        for (key, value) in entry.extra {
            object.insert(key, value);
        }
        if let Some(stacktrace) = entry.stacktrace {
            object.insert(STACKTRACE_KEY.to_string(), Value::from(stacktrace));
        }
        let line = serde_json::to_string(&object).map_err(|_| fmt::Error)?;
        writeln!(writer, "{}", line)
    }
}

/// One log entry, resolved from an event and its metadata
struct Entry {
    time: String,
    level: String,
    logger: String,
    caller: String,
    function: String,
    message: String,
    extra: Vec<(String, Value)>,
    stacktrace: Option<String>,
}

impl Entry {
    fn collect(event: &Event<'_>) -> Self {
        let mut fields = FieldCollector::default();
        event.record(&mut fields);
        let meta = event.metadata();

        // Prefer the call site captured at the application's log call;
        // events emitted natively through `tracing` fall back to their
        // own callsite metadata.
        let function = fields
            .caller_function
            .unwrap_or_else(|| meta.module_path().unwrap_or_default().to_string());
        let site = CallSite {
            file: fields
                .caller_file
                .as_deref()
                .or_else(|| meta.file())
                .unwrap_or("unknown"),
            line: fields
                .caller_line
                .or_else(|| meta.line().map(u64::from))
                .unwrap_or(0) as u32,
            function: &function,
        };
        let caller = format_caller(&site);

        Entry {
            time: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            level: meta.level().to_string(),
            logger: fields.logger.unwrap_or_else(|| meta.target().to_string()),
            caller,
            function: function_segment(&function).to_string(),
            message: fields.message.unwrap_or_default(),
            extra: fields.extra,
            stacktrace: fields.stacktrace,
        }
    }
}

/// Render a scalar JSON value for console output, strings unquoted
pub(crate) fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Collects event fields, routing the reserved ones to dedicated slots
#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    logger: Option<String>,
    caller_file: Option<String>,
    caller_line: Option<u64>,
    caller_function: Option<String>,
    stacktrace: Option<String>,
    extra: Vec<(String, Value)>,
}

impl FieldCollector {
    fn record_value(&mut self, field: &Field, value: Value) {
        match field.name() {
            "message" => self.message = Some(render_scalar(&value)),
            LOGGER_KEY => self.logger = Some(render_scalar(&value)),
            CALLER_FILE_FIELD => self.caller_file = Some(render_scalar(&value)),
            CALLER_LINE_FIELD => self.caller_line = value.as_u64(),
            CALLER_FUNCTION_FIELD => self.caller_function = Some(render_scalar(&value)),
            STACKTRACE_KEY => self.stacktrace = Some(render_scalar(&value)),
            name => self.extra.push((name.to_string(), value)),
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_value(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_value(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record_value(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record_value(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record_value(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.record_value(field, Value::from(format!("{:?}", value)));
    }
}
