//! Percent <-> normalized conversion.
//!
//! Scripts use integer percents where 100 is full strength and 200 is the
//! overdrive ceiling. The host stores `percent / 100.0`.

/// Lowest percent accepted on write.
pub const PERCENT_MIN: i32 = 0;
/// Highest percent accepted on write.
pub const PERCENT_MAX: i32 = 200;

/// Clamp to `PERCENT_MIN..=PERCENT_MAX` and normalize.
#[inline]
pub fn percent_to_normalized(percent: i32) -> f32 {
    percent.clamp(PERCENT_MIN, PERCENT_MAX) as f32 / 100.0
}

/// Round a stored value back to percent. No clamping: whatever the host holds is reported.
#[inline]
pub fn normalized_to_percent(value: f32) -> i32 {
    (value * 100.0).round() as i32
}

/// Percent target for a normalized preset value scaled by a strength multiplier.
#[inline]
pub fn scaled_percent(value: f32, scale: f32) -> i32 {
    (value * 100.0 * scale).round() as i32
}
