/// Clamp `value` into `[min, max]`.
///
/// Non-finite input collapses to `min`, and an inverted range resolves to
/// `min`, so callers never see NaN or a panic from `f64::clamp`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return min;
    }
    if max < min {
        return min;
    }
    value.max(min).min(max)
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Format a number for CSS output: at most four decimals, no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut s = format!("{:.4}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Millimeters to CSS pixels at 96 dpi.
pub fn mm_to_px(mm: f64) -> f64 {
    mm * 96.0 / 25.4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5.0, 1.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 1.0, 10.0), 1.0);
        assert_eq!(clamp(30.0, 1.0, 10.0), 10.0);
    }

    #[test]
    fn clamp_degenerate() {
        assert_eq!(clamp(f64::NAN, 2.0, 4.0), 2.0);
        assert_eq!(clamp(f64::INFINITY, 2.0, 4.0), 2.0);
        assert_eq!(clamp(3.0, 4.0, 2.0), 4.0);
    }

    #[test]
    fn words() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\n\nthree  "), 3);
    }

    #[test]
    fn number_formatting() {
        assert_eq!(fmt_num(39.0), "39");
        assert_eq!(fmt_num(19.68), "19.68");
        assert_eq!(fmt_num(0.6 * 1.2), "0.72");
        assert_eq!(fmt_num(215.9), "215.9");
        assert_eq!(fmt_num(0.0125), "0.0125");
        assert_eq!(fmt_num(-0.0125), "-0.0125");
        assert_eq!(fmt_num(-0.00001), "0");
        assert_eq!(fmt_num(f64::NAN), "0");
    }
}
