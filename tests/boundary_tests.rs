// Boundary Condition Tests for bloomkit
// These tests verify construction limits and edge-case inputs

use bloomkit::filter::{CountingFilter, FixedFilter, ScalableFilter};
use bloomkit::{Error, ScalableOptions};

/// Zero dimensions fail at construction, never on first use
#[test]
fn test_zero_dimensions_rejected() {
    assert!(matches!(FixedFilter::new(0, 100), Err(Error::InvalidArgument(_))));
    assert!(matches!(FixedFilter::new(3, 0), Err(Error::InvalidArgument(_))));
    assert!(matches!(CountingFilter::new(0, 100), Err(Error::InvalidArgument(_))));
    assert!(matches!(CountingFilter::new(3, 0), Err(Error::InvalidArgument(_))));
}

/// Every out-of-range scalable argument is rejected
#[test]
fn test_scalable_arguments_rejected() {
    let cases = [
        (0, 20, 4.0, 10, 0.01),
        (3, 0, 4.0, 10, 0.01),
        (3, 20, 1.0, 10, 0.01),
        (3, 20, 0.5, 10, 0.01),
        (3, 20, f64::INFINITY, 10, 0.01),
        (3, 1024, 1e10, 16, 0.01),
        (3, usize::MAX, 2.0, 2, 0.01),
        (3, 20, 4.0, 0, 0.01),
        (3, 20, 4.0, 10, 0.0),
        (3, 20, 4.0, 10, 1.0),
        (3, 20, 4.0, 10, -0.5),
        (3, 20, 4.0, 10, f64::NAN),
    ];

    for (k, size, growth, max_slices, rate) in cases {
        let result = ScalableFilter::new(k, size, growth, max_slices, rate);
        assert!(
            matches!(result, Err(Error::InvalidArgument(_))),
            "expected rejection for ({}, {}, {}, {}, {})",
            k,
            size,
            growth,
            max_slices,
            rate
        );
    }
}

/// The empty byte sequence is an ordinary element
#[test]
fn test_empty_input() {
    let mut fixed = FixedFilter::new(3, 100).unwrap();
    let mut counting = CountingFilter::new(3, 100).unwrap();
    let mut scalable = ScalableFilter::new(3, 100, 2.0, 4, 0.01).unwrap();

    assert!(!fixed.check(b""));
    fixed.add(b"");
    assert!(fixed.check(b""));

    counting.add(b"");
    assert!(counting.check(b""));
    counting.remove(b"");
    assert!(!counting.check(b""));

    scalable.add(b"");
    assert!(scalable.check(b""));
}

/// Large inputs hash like any other
#[test]
fn test_large_input() {
    let mut filter = FixedFilter::new(5, 4096).unwrap();
    let large = vec![b'v'; 1024 * 1024];

    filter.add(&large);
    assert!(filter.check(&large));

    let mut other = large.clone();
    other[512 * 1024] = b'w';
    assert!(!filter.check(&other));
}

/// A single-slice scalable filter is saturated from its first add
#[test]
fn test_single_slice_scalable() {
    let mut filter = ScalableFilter::new(3, 64, 2.0, 1, 0.01).unwrap();
    assert!(!filter.is_saturated());

    for i in 0..1000 {
        filter.add(format!("k{}", i).as_bytes());
    }

    assert_eq!(filter.num_slices(), 1);
    assert!(filter.is_saturated());
    assert!(filter.false_positive_rate() > 0.8);
}

/// Removing from an empty counting filter leaves it empty
#[test]
fn test_remove_from_empty_counting_filter() {
    let mut filter = CountingFilter::new(4, 64).unwrap();

    for i in 0..100 {
        filter.remove(format!("ghost{}", i).as_bytes());
    }

    assert_eq!(filter.fill_ratio(), 0.0);
    assert_eq!(filter.inserted_count(), 0);
    assert_eq!(filter.false_positive_rate(), 0.0);
}

/// Removing a never-added element can clear counters shared with a live one
#[test]
fn test_counting_removal_can_cause_false_negative() {
    let mut filter = CountingFilter::new(1, 1).unwrap();

    filter.add(b"kept");
    filter.remove(b"never-added");

    // Both elements map to the only counter
    assert!(!filter.check(b"kept"));
}

/// Options loaded from JSON drive construction
#[test]
fn test_scalable_from_json_options() {
    let json = r#"{
        "num_hashes": 3,
        "initial_size": 20,
        "growth_factor": 4.0,
        "max_slices": 10,
        "initial_error_rate": 0.01
    }"#;
    let options = ScalableOptions::from_json(json).unwrap();
    let mut filter = ScalableFilter::with_options(options.clone()).unwrap();

    filter.add(b"configured");
    assert!(filter.check(b"configured"));
    assert_eq!(filter.options(), &options);
}
