/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
///
/// Falls back to summing `v / N` when the plain sum overflows, so the mean of
/// finite values is always finite.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

/// Computes the population standard deviation (divisor `N`) given a
/// pre-computed mean. Returns 0.0 for empty input or when every value is equal,
/// and a positive value otherwise.
pub fn stddev(values: &[f64], mean: f64) -> f64 {
    let Some(first) = values.first() else {
        return 0.0;
    };
    if values.iter().all(|v| v == first) {
        return 0.0;
    }
    let n = values.len() as f64;

    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    if variance.is_finite() && variance > 0.0 {
        return variance.sqrt();
    }

    // squares overflowed or underflowed: work in units of the largest magnitude
    let scale = values.iter().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let scaled_mean = mean / scale;
    let scaled_variance = values
        .iter()
        .map(|v| (v / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / n;
    let sd = scale * scaled_variance.sqrt();

    // unequal grades never report a zero spread
    if sd > 0.0 { sd } else { f64::from_bits(1) }
}

/// `part` as a percentage of `total`, rounded half away from zero to one
/// decimal place.
///
/// Works in integer tenths so halves are never lost to binary rounding:
/// 1 of 8 is exactly 12.5, 1 of 16 is 6.3.
pub fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let (part, total) = (part as u128, total as u128);
    let tenths = (2 * part * 1000 + total) / (2 * total);
    tenths as f64 / 10.0
}

/// Formats `value` with `places` decimals, rounding half away from zero on
/// its shortest decimal form rather than on the binary value scaled up, so
/// `0.125` is `"0.13"` and `1.005` is `"1.01"`.
pub fn format_fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // f64 Display never switches to exponent notation
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int_part.len();

    if frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                int_len += 1;
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 && digits.iter().any(|d| *d != 0) {
        out.push('-');
    }
    for (i, d) in digits.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[35.0, 45.0, 65.0, 75.0]), 55.0);
    }

    #[test]
    fn test_stddev_is_population() {
        let values = [35.0, 45.0, 65.0, 75.0];
        let sd = stddev(&values, mean(&values));
        assert!((sd - 250f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_stddev_zero_when_equal() {
        assert_eq!(stddev(&[], 0.0), 0.0);
        assert_eq!(stddev(&[42.0], 42.0), 0.0);
        let tenths = [0.1, 0.1, 0.1];
        assert_eq!(stddev(&tenths, mean(&tenths)), 0.0);
    }

    #[test]
    fn test_rate_rounding() {
        assert_eq!(rate(0, 0), 0.0);
        assert_eq!(rate(3, 4), 75.0);
        assert_eq!(rate(1, 3), 33.3);
        assert_eq!(rate(2, 3), 66.7);
        assert_eq!(rate(1, 8), 12.5);
        assert_eq!(rate(1, 16), 6.3);
        assert_eq!(rate(1, 6), 16.7);
        assert_eq!(rate(7, 7), 100.0);
    }

    #[test]
    fn test_mean_and_sd_survive_huge_grades() {
        let values = [1e308, 1e308, 9e307];
        let m = mean(&values);
        let sd = stddev(&values, m);

        assert!(m.is_finite());
        assert!((m / 9.666666666666667e307 - 1.0).abs() < 1e-12);
        assert!(sd.is_finite());
        assert!((sd / 4.714045207910317e306 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sd_positive_for_tiny_unequal_grades() {
        let values = [0.0, 5e-324];
        assert!(stddev(&values, mean(&values)) > 0.0);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(55.0, 2), "55.00");
        assert_eq!(format_fixed(15.811388300841896, 2), "15.81");
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(1.005, 2), "1.01");
        assert_eq!(format_fixed(9.995, 2), "10.00");
        assert_eq!(format_fixed(-2.5, 0), "-3");
        assert_eq!(format_fixed(-0.001, 2), "0.00");
        assert_eq!(format_fixed(0.0, 2), "0.00");
        assert_eq!(format_fixed(1e21, 1), "1000000000000000000000.0");
    }
}
