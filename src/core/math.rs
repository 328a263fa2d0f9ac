// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Step `current` toward `target` by the fraction `t`, clamped to [0, 1]
/// so a long frame can never overshoot the target.
pub fn approach(current: f32, target: f32, t: f32) -> f32 {
    lerp(current, target, clamp(t, 0.0, 1.0))
}

/// Sign of `value` as -1.0 or 1.0, or `fallback` when the value is zero
pub fn sign_or(value: f32, fallback: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        fallback
    }
}
