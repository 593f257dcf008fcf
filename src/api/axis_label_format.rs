use crate::core::AxisRange;

/// Largest number of fraction digits a tick label prints.
const MAX_LABEL_PRECISION: usize = 12;

/// Formats a tick value of `range` with the decimal precision needed to print
/// both `low` and `step` exactly.
///
/// Every tick is `low + k * step`, so that precision shows each tick at its
/// true value. Trailing zeros are trimmed and `-0` prints as `0`, so
/// accumulated drift such as `-0.6000000000000001` on a `0.2` step prints as
/// `-0.6`.
#[must_use]
pub fn format_tick_label(value: f64, range: AxisRange) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let precision = fraction_digits(range.step()).max(fraction_digits(range.low()));
    trim_decimal(format!("{value:.precision$}"))
}

fn fraction_digits(value: f64) -> usize {
    if !value.is_finite() {
        return 2;
    }
    let text = format!("{:.MAX_LABEL_PRECISION$}", value.abs());
    let Some((_, fraction)) = text.split_once('.') else {
        return 0;
    };
    fraction.trim_end_matches('0').len()
}

fn trim_decimal(mut text: String) -> String {
    if text.contains('.') {
        let trimmed_len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed_len);
    }

    if text == "-0" { "0".to_owned() } else { text }
}

#[cfg(test)]
mod tests {
    use super::format_tick_label;
    use crate::core::AxisRange;

    fn range(low: f64, high: f64, step: f64) -> AxisRange {
        AxisRange::new(low, high, step).expect("valid range")
    }

    #[test]
    fn drift_is_hidden_by_step_precision() {
        let unit = range(-1.0, 1.0, 0.2);
        assert_eq!(format_tick_label(-0.6000000000000001, unit), "-0.6");
        assert_eq!(format_tick_label(1.0, unit), "1");
        assert_eq!(format_tick_label(0.0, unit), "0");
        assert_eq!(format_tick_label(-1e-17, unit), "0");
    }

    #[test]
    fn integral_steps_print_integers() {
        let wide = range(-10.0, 300.0, 50.0);
        assert_eq!(format_tick_label(-10.0, wide), "-10");
        assert_eq!(format_tick_label(240.0, wide), "240");
    }

    #[test]
    fn fine_steps_keep_their_digits() {
        assert_eq!(format_tick_label(0.125, range(0.0, 1.0, 0.025)), "0.125");
        assert_eq!(format_tick_label(0.05, range(0.0, 1.0, 0.05)), "0.05");
    }

    #[test]
    fn offset_low_widens_precision() {
        let offset = range(0.25, 2.0, 0.5);
        assert_eq!(format_tick_label(0.25, offset), "0.25");
        assert_eq!(format_tick_label(0.75, offset), "0.75");
        assert_eq!(format_tick_label(1.7500000000000002, offset), "1.75");

        let integral_step = range(-0.5, 3.0, 1.0);
        assert_eq!(format_tick_label(1.5, integral_step), "1.5");
    }
}
