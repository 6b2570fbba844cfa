//! Linear-interpolation percentile over sorted samples.

/// Percentile of ascending `sorted` samples, interpolating between the two
/// closest ranks. Returns `None` for an empty slice.
///
/// `percentile` must already be validated to lie in `[0, 100]`.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "ranks are derived from a validated percentile and a slice length"
)]
pub(crate) fn interpolated(sorted: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = percentile / 100.0 * last as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let low = *sorted.get(lower)?;
    let high = *sorted.get(upper)?;
    Some(low + (high - low) * (rank - lower as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(50.0, 2.5)]
    #[case(100.0, 4.0)]
    #[case(25.0, 1.75)]
    fn interpolates_between_ranks(#[case] percentile: f64, #[case] expected: f64) {
        let samples = [1.0, 2.0, 3.0, 4.0];
        let value = interpolated(&samples, percentile).expect("non-empty samples");
        assert!((value - expected).abs() < 1e-12, "got {value}");
    }

    #[rstest]
    fn empty_samples_have_no_percentile() {
        assert_eq!(interpolated(&[], 50.0), None);
    }

    #[rstest]
    fn single_sample_is_every_percentile() {
        assert_eq!(interpolated(&[7.0], 92.5), Some(7.0));
    }
}
