//! Prometheus metrics collection for the jukebox.
//!
//! Metrics are registered once at start-up by [`init`] and exposed on a
//! separate HTTP listener. Every recording helper is a no-op until then, so
//! tests and tools can run the pipeline without a registry.
//!
//! - `jukebox_command_total{command}` - Commands processed by key
//! - `jukebox_command_duration_seconds{command}` - Command latency histogram
//! - `jukebox_command_errors_total{command,kind}` - Failed commands
//! - `jukebox_connected_clients` - Live event stream connections
//! - `jukebox_events_broadcast_total{event}` - Broadcast events by tag
//! - `jukebox_frames_dropped_total` - Frames dropped on full outbound queues

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Command pipeline
// ========================================================================

/// Commands processed by key.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Command processing latency by key.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Command errors by key and error kind.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Event stream
// ========================================================================

/// Currently connected player clients.
pub static CONNECTED_CLIENTS: OnceLock<IntGauge> = OnceLock::new();

/// Events broadcast by wire tag.
pub static EVENTS_BROADCAST: OnceLock<IntCounterVec> = OnceLock::new();

/// Outbound frames dropped due to a full connection queue.
pub static FRAMES_DROPPED: OnceLock<IntCounter> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; only the first call registers anything.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("jukebox_command_total", "Commands processed by key"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("jukebox_command_duration_seconds", "Command latency by key")
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("jukebox_command_errors_total", "Command errors by key and kind"), &["command", "kind"]));
    register!(CONNECTED_CLIENTS, IntGauge::new("jukebox_connected_clients", "Live event stream connections"));
    register!(EVENTS_BROADCAST, IntCounterVec::new(Opts::new("jukebox_events_broadcast_total", "Events broadcast by tag"), &["event"]));
    register!(FRAMES_DROPPED, IntCounter::new("jukebox_frames_dropped_total", "Frames dropped due to a full outbound queue"));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a command error.
#[inline]
pub fn record_command_error(command: &str, kind: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, kind]).inc();
    }
}

#[inline]
pub fn set_connected_clients(count: usize) {
    if let Some(g) = CONNECTED_CLIENTS.get() {
        g.set(i64::try_from(count).unwrap_or(i64::MAX));
    }
}

#[inline]
pub fn record_broadcast(event: &str) {
    if let Some(c) = EVENTS_BROADCAST.get() {
        c.with_label_values(&[event]).inc();
    }
}

#[inline]
pub fn record_frame_dropped() {
    if let Some(c) = FRAMES_DROPPED.get() {
        c.inc();
    }
}
