//! Constants and angle helpers shared by the tracker components

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Standard gravity in m/s², the resting acceleration magnitude of a phone
pub const GRAVITY: f32 = 9.8;

/// Wrap an angle in degrees into [-180, 180)
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Wrap an angle in radians into [-π, π)
pub fn wrap_radians(angle: f32) -> f32 {
    wrap_degrees(angle * RAD_TO_DEG) * DEG_TO_RAD
}

/// Replace a missing or non-finite reading with zero
pub fn finite_or_zero(value: Option<f32>) -> f32 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
