//! Stdout logging for the probe.
//!
//! On Lambda, stdout is the log transport: every line ends up in the
//! function's CloudWatch log stream. Lines carry a timestamp and a `[TAG]`
//! prefix so the harness can grep for the phases it cares about.

use chrono::Local;
use serde_json::Value;

/// Timestamp format used on every log line.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Log runtime startup, once per cold start.
pub fn log_startup() {
    println!(
        "[{}] [START] Environment probe initialized, waiting for invocations",
        Local::now().format(TIME_FORMAT)
    );
}

/// Log the raw invocation payload before it is handled.
pub fn log_invocation(event: &Value) {
    println!(
        "[{}] [INVOKE] Got event [{event}]",
        Local::now().format(TIME_FORMAT)
    );
}
