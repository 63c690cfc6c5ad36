//! Conversion rules from API fields to sample values.

pub const STATUS_STABLE: &str = "STABLE";
pub const STATUS_CONNECTED: &str = "CONNECTED";
pub const STATUS_UP: &str = "UP";
pub const STATUS_IN_SYNC: &str = "in_sync";

/// Label value used when a status field is absent.
pub const STATUS_UNKNOWN: &str = "UNKNOWN";

/// A value that may or may not produce a sample.
pub trait Observation {
    fn observation(self) -> Option<f64>;
}

impl Observation for f64 {
    fn observation(self) -> Option<f64> {
        Some(self)
    }
}

impl Observation for i64 {
    fn observation(self) -> Option<f64> {
        Some(self as f64)
    }
}

impl Observation for usize {
    fn observation(self) -> Option<f64> {
        Some(self as f64)
    }
}

impl Observation for Option<i64> {
    fn observation(self) -> Option<f64> {
        self.map(|v| v as f64)
    }
}

impl Observation for Option<f64> {
    fn observation(self) -> Option<f64> {
        self
    }
}

/// 1.0 for `Some(true)`, 0.0 otherwise.
pub fn bool_value(value: Option<bool>) -> f64 {
    if value == Some(true) { 1.0 } else { 0.0 }
}

/// Label value for a status field.
pub fn status_label(status: Option<&str>) -> &str {
    status.unwrap_or(STATUS_UNKNOWN)
}

/// 1.0 iff the status equals `expected`.
pub fn status_value(status: Option<&str>, expected: &str) -> f64 {
    if status == Some(expected) { 1.0 } else { 0.0 }
}

/// Display name, falling back to the id.
pub fn display_name<'a>(name: Option<&'a str>, id: &'a str) -> &'a str {
    name.unwrap_or(id)
}
