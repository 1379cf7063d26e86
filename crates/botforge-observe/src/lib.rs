//! Observability setup for Botforge: tracing subscriber and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
