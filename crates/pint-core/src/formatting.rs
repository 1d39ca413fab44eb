/// Format a post count with thousands separators.
///
/// # Examples
///
/// ```
/// use pint_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// Share of `part` in `whole` as a percentage rounded to one decimal.
///
/// Returns `0.0` when `whole` is zero.
///
/// # Examples
///
/// ```
/// use pint_core::formatting::share_percent;
///
/// assert!((share_percent(1, 3) - 33.3).abs() < 1e-9);
/// assert_eq!(share_percent(5, 0), 0.0);
/// ```
pub fn share_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Render a proportional bar of `width` cells for `value` out of `max`.
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 || width == 0 {
        return String::new();
    }
    let cells = ((value as f64 / max as f64) * width as f64).round() as usize;
    "#".repeat(cells.min(width))
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = s.len() % 3;
    for (i, c) in s.chars().enumerate() {
        if i != 0 && i % 3 == remainder {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_boundaries() {
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(100000), "100,000");
        assert_eq!(format_count(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_share_percent() {
        assert_eq!(share_percent(2, 3), 66.7);
        assert_eq!(share_percent(3, 3), 100.0);
        assert_eq!(share_percent(0, 3), 0.0);
    }

    #[test]
    fn test_bar_scales_to_max() {
        assert_eq!(bar(10, 10, 20), "#".repeat(20));
        assert_eq!(bar(5, 10, 20), "#".repeat(10));
        assert_eq!(bar(0, 10, 20), "");
    }

    #[test]
    fn test_bar_zero_max() {
        assert_eq!(bar(3, 0, 20), "");
    }
}
