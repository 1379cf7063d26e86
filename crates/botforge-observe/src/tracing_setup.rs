//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! # Usage
//!
//! ```no_run
//! use botforge_observe::tracing_setup::{TracingOptions, init_tracing};
//!
//! // Human-readable logs at the default level
//! init_tracing(&TracingOptions::default()).unwrap();
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::{EnvFilter, Layer, Registry};
use tracing_subscriber::util::SubscriberInitExt;

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

/// How the global subscriber should be set up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOptions {
    /// Bridge spans to OpenTelemetry with a stdout exporter.
    pub otel: bool,
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
    /// `-v` count: 0 = info, 1 = debug, 2+ = trace. Ignored when `RUST_LOG` is set.
    pub verbosity: u8,
}

/// Filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Subscriber the output layers are stacked on: the registry behind the filter.
type FilteredRegistry = Layered<EnvFilter, Registry>;

/// Type-erased output layer, so text, JSON and OTel layers share one stack.
type BoxedLayer = Box<dyn Layer<FilteredRegistry> + Send + Sync>;

/// Initialize the global tracing subscriber.
///
/// - Always installs an `fmt` layer (text or JSON) with span close timing.
/// - When `otel` is set, additionally bridges spans to OpenTelemetry using a
///   stdout exporter.
/// - `RUST_LOG` takes precedence over the verbosity count.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(options: &TracingOptions) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(options.verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(output_layers(options))
        .try_init()?;

    Ok(())
}

fn output_layers(options: &TracingOptions) -> Vec<BoxedLayer> {
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);
    if options.json {
        layers.push(fmt_layer.json().boxed());
    } else {
        layers.push(fmt_layer.boxed());
    }

    if options.otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("botforge");

        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        layers.push(tracing_opentelemetry::layer().with_tracer(tracer).boxed());
    }

    layers
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// Safe to call even when OTel was not enabled (no-op in that case).
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}
