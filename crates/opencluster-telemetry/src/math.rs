//! Scalar helpers shared by the simulator and the alert controllers.
//!
//! All helpers are total: they never panic and never return NaN for finite
//! inputs.

/// Smallest time step the simulator accepts, in seconds.
pub const MIN_DT: f32 = 1e-4;

/// km/h per m/s.
pub const KMH_PER_MS: f32 = 3.6;

/// Clamp into `[0, 1]`. NaN and `-0.0` map to `+0.0`.
#[inline]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        // clamp passes -0.0 through; abs folds it to +0.0.
        value.clamp(0.0, 1.0).abs()
    }
}

/// Linear interpolation with the factor clamped into `[0, 1]`, so the
/// result never leaves the `[a, b]` segment.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Position of `value` between `a` and `b`, clamped into `[0, 1]`.
///
/// Returns 0 when `a == b`.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    let span = b - a;
    if span.abs() <= f32::EPSILON {
        return 0.0;
    }
    clamp01((value - a) / span)
}

/// Move `current` toward `target` by at most `max_delta`.
///
/// Rate-limited approach: reaches `target` exactly and never overshoots.
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Clamp a driver-supplied time step to at least [`MIN_DT`]. Non-finite
/// values map to [`MIN_DT`].
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(MIN_DT) } else { MIN_DT }
}

/// Convert km/h to m/s.
#[inline]
pub fn kmh_to_ms(kmh: f32) -> f32 {
    kmh / KMH_PER_MS
}

/// Clamp with NaN mapped to `min`.
#[inline]
pub fn clamp_or_min(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
