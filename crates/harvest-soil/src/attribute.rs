//! Normalized attribute domain and the real-pH mapping.
//!
//! Every stored soil attribute lives in `[0, 1]`. pH is additionally
//! exposed on its real scale `[3, 10]`, mapped affinely onto the normalized
//! range. Both directions clamp their input before mapping, so
//! `denormalize_ph(normalize_ph(x))` is exactly "clamp `x` to `[3, 10]`".

/// Lowest representable real pH.
pub const PH_MIN: f64 = 3.0;

/// Highest representable real pH.
pub const PH_MAX: f64 = 10.0;

/// Width of the real pH scale.
const PH_SPAN: f64 = PH_MAX - PH_MIN;

/// Clamp an attribute value into `[0, 1]`.
///
/// `NaN` is out of range like anything else and maps to `0`.
pub const fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Map a real pH onto the normalized `[0, 1]` domain.
pub const fn normalize_ph(ph_real: f64) -> f64 {
    let clamped = if ph_real.is_nan() {
        PH_MIN
    } else {
        ph_real.clamp(PH_MIN, PH_MAX)
    };
    (clamped - PH_MIN) / PH_SPAN
}

/// Map a normalized pH back onto the real `[3, 10]` scale.
pub const fn denormalize_ph(normalized: f64) -> f64 {
    PH_MIN + clamp01(normalized) * PH_SPAN
}
