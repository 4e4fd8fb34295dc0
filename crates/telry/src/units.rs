//! Display unit conversions.

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    (9.0 / 5.0) * celsius + 32.0
}

/// Also converts m/s to ft/s.
pub fn meters_to_feet(meters: f32) -> f32 {
    meters * 3.28084
}

pub fn bytes_to_kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}
