#![warn(clippy::all, rust_2018_idioms)]

/// Logging macros that prefix every message with `[file:module:line]`.
///
/// `log_*` macros go through the `log` facade. The `jitsidash` binary bridges
/// `log` records into `tracing` so library users that only install a `log`
/// logger still see them.
#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => {
        log::trace!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

/// Tracing-only variants with the same context prefix.
#[macro_export]
macro_rules! trace_trace {
    ($($arg:tt)*) => {
        tracing::trace!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        tracing::debug!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

#[macro_export]
macro_rules! trace_info {
    ($($arg:tt)*) => {
        tracing::info!("[{}:{}:{}] {}", file!(), module_path!(), line!(), format!($($arg)*));
    };
}

/*
Log level guidelines:

TRACE: individual widget placement, query string assembly
DEBUG: builder entry, resolved options, resource rendering
INFO:  dashboards created, stack synthesized, template written
WARN:  ignored inputs (e.g. dashboard props alongside an existing dashboard)
ERROR: failures reported by the binary before exiting

Example output:
  [src/app/jitsi/dashboard.rs:jitsidash::app::jitsi::dashboard:88] dashboard_props will be ignored ...

Builders run once per synthesis, so DEBUG is fine there. Keep TRACE for
per-widget detail.
*/
