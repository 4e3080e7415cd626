use datavail_math::{availability_ratio, clamp_unit, guarded_mean, safe_ratio};
use proptest::prelude::*;

proptest! {
    #[test]
    fn ratio_is_bounded_when_frequency_fits(denom in 1u64..1_000_000, pct in 0.0f64..=1.0) {
        let numer = (denom as f64 * pct).floor() as u64;
        let got = safe_ratio(numer, denom);
        prop_assert!((0.0..=1.0).contains(&got));
    }

    #[test]
    fn zero_frequency_is_zero_availability(denom in prop::option::of(0u64..1_000_000)) {
        prop_assert_eq!(availability_ratio(0, denom), 0.0);
    }

    #[test]
    fn clamp_unit_is_idempotent(x in -10.0f64..10.0) {
        let once = clamp_unit(x);
        prop_assert_eq!(clamp_unit(once), once);
        prop_assert!((0.0..=1.0).contains(&once));
    }

    #[test]
    fn mean_of_unit_values_is_unit(values in prop::collection::vec(0.0f64..=1.0, 0..100)) {
        let sum: f64 = values.iter().sum();
        let mean = guarded_mean(sum, values.len() as u64);
        prop_assert!(mean >= 0.0);
        prop_assert!(mean <= 1.0 + 1e-9);
    }
}
