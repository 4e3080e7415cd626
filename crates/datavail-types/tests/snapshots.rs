//! Snapshot tests for datavail-types JSON serialization.
//!
//! Uses `insta` to capture the exact JSON shape of the aggregate types.
//! Run `cargo insta review` to update snapshots after intentional changes.

use datavail_types::{Category, CategoryMap, Classification, DistributionBins};

#[test]
fn snapshot_category_bins() {
    let mut bins: CategoryMap<DistributionBins> = CategoryMap::default();
    let observations = [
        (Classification::Standard { primary: true }, 1.0),
        (Classification::Standard { primary: false }, 0.9),
        (Classification::Local, 0.1),
        (Classification::Local, 0.0),
    ];
    for (classification, ratio) in observations {
        for category in classification.categories() {
            bins.get_mut(*category).add_observation(ratio);
        }
    }
    assert_eq!(bins.get(Category::Total).observations(), 4);
    insta::assert_json_snapshot!("category_bins", bins);
}
