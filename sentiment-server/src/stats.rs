//! Numeric helpers shared by the aggregation queries.

/// Round to `places` decimal places, exact halves going to the even digit
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// `part` as a percentage of `whole`, rounded to 2 places. Zero when `whole` is zero.
pub fn percentage(part: i64, whole: i64) -> f64 {
    if whole <= 0 {
        return 0.0;
    }
    round_to((part as f64 / whole as f64) * 100.0, 2)
}

/// `(positive - negative) / total`, rounded to 3 places. Zero when `total` is zero.
pub fn sentiment_score(positive: i64, negative: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round_to((positive - negative) as f64 / total as f64, 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_percentage_basic() {
        assert_eq!(percentage(2, 4), 50.0);
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
    }

    #[test]
    fn test_zero_denominators() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(sentiment_score(0, 0, 0), 0.0);
    }

    #[test]
    fn test_sentiment_score_examples() {
        assert_eq!(sentiment_score(3, 1, 4), 0.5);
        assert_eq!(sentiment_score(0, 9, 9), -1.0);
        assert_eq!(sentiment_score(1, 2, 3), -0.333);
        assert_eq!(sentiment_score(2, 1, 3), 0.333);
    }

    #[test]
    fn test_round_to_half_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(-1.5, 0), -2.0);
        assert_eq!(round_to(0.1251, 2), 0.13);
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        // 1/16 = 0.0625 and 1/800 * 100 = 0.125 are exact binary halves
        assert_eq!(sentiment_score(1, 0, 16), 0.062);
        assert_eq!(sentiment_score(3, 0, 16), 0.188);
        assert_eq!(percentage(1, 800), 0.12);
    }

    proptest! {
        #[test]
        fn prop_sentiment_score_is_bounded(
            positive in 0i64..100_000,
            negative in 0i64..100_000,
            neutral in 0i64..100_000,
        ) {
            let total = positive + negative + neutral;
            let score = sentiment_score(positive, negative, total);
            prop_assert!((-1.0..=1.0).contains(&score));
            if total > 0 {
                let exact = (positive - negative) as f64 / total as f64;
                prop_assert!((score - exact).abs() <= 0.0005 + f64::EPSILON);
            }
        }

        #[test]
        fn prop_partition_percentages_stay_near_100(
            a in 0i64..50_000,
            b in 0i64..50_000,
            c in 0i64..50_000,
            unknown in 0i64..50_000,
        ) {
            let total = a + b + c + unknown;
            let sum = percentage(a, total) + percentage(b, total) + percentage(c, total);
            // Each term may round up by at most 0.005
            prop_assert!(sum <= 100.0 + 0.015 + 1e-9);
            prop_assert!(percentage(a, total) >= 0.0);
        }
    }
}
