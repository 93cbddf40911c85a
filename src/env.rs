//! Process environment lookups with a fixed fallback value.
//!
//! The probe never treats an absent variable as an error; it reports the
//! sentinel instead so the harness can tell "injected" apart from "missing".

/// Value reported for any variable that is absent from the environment.
pub const NOT_SET: &str = "Not Set";

/// Read `name` from the process environment, falling back to [`NOT_SET`]
/// when the variable is unset (or not valid Unicode, which the injection
/// layer never produces).
pub fn var_or_not_set(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| NOT_SET.to_owned())
}
