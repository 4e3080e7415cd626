#![no_main]

use datavail_math::{availability_ratio, clamp_unit, guarded_mean};
use datavail_types::DistributionBins;
use libfuzzer_sys::fuzz_target;

fn read_u64(bytes: &[u8]) -> u64 {
    let mut arr = [0u8; 8];
    let len = bytes.len().min(8);
    arr[..len].copy_from_slice(&bytes[..len]);
    u64::from_le_bytes(arr)
}

fuzz_target!(|data: &[u8]| {
    let frequency = read_u64(data.get(0..8).unwrap_or(&[]));
    let records = read_u64(data.get(8..16).unwrap_or(&[]));

    assert_eq!(availability_ratio(frequency, None), 0.0);
    assert_eq!(availability_ratio(frequency, Some(0)), 0.0);

    let ratio = clamp_unit(availability_ratio(frequency, Some(records)));
    assert!((0.0..=1.0).contains(&ratio));

    let mut bins = DistributionBins::default();
    bins.add_observation(ratio);
    assert_eq!(bins.observations(), 1);
    assert!(bins.eq100 <= bins.gte75 && bins.gte75 <= bins.gte50);
    assert!(bins.gte50 <= bins.gte25 && bins.gte25 <= bins.gt_zero);

    let mean = guarded_mean(ratio, 1);
    assert_eq!(mean, ratio);
});
