use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Two values in `[-1, 1]` derived from `id`, stable across runs of the same build.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

/// Exact at both endpoints.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    if t >= 1.0 {
        return to;
    }
    from + (to - from) * t
}

pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

pub fn ease_back_out(t: f32) -> f32 {
    const OVERSHOOT: f32 = 1.70158;
    let t = t.clamp(0.0, 1.0) - 1.0;
    1.0 + (OVERSHOOT + 1.0) * t * t * t + OVERSHOOT * t * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints() {
        for ease in [ease_cubic_in_out, ease_back_out] {
            assert!(ease(0.0).abs() < 1e-6);
            assert!((ease(1.0) - 1.0).abs() < 1e-6);
            assert!((ease(7.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn stable_pair_is_bounded_and_repeatable() {
        let (x, y) = stable_pair("album-A-1");
        assert_eq!((x, y), stable_pair("album-A-1"));
        assert!((-1.0..=1.0).contains(&x) && (-1.0..=1.0).contains(&y));
    }
}
