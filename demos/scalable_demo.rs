//! Walks a scalable filter through growth and saturation.
//!
//! Run with `RUST_LOG=debug` to see each slice as it is appended.

use bloomkit::filter::{CountingFilter, FixedFilter, ScalableFilter};
use bloomkit::Result;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== bloomkit Filter Demo ===\n");

    fixed_filter_demo()?;
    counting_filter_demo()?;
    scalable_filter_demo()?;

    Ok(())
}

fn fixed_filter_demo() -> Result<()> {
    println!("--- Fixed Filter ---");

    let mut filter = FixedFilter::with_rate(1000, 0.01)?;
    let keys = ["user:1001", "user:1002", "user:1003"];

    for key in &keys {
        filter.add(key.as_bytes());
    }

    println!(
        "Filter size: {} bytes ({} bits, {} hashes)",
        filter.size(),
        filter.num_bits(),
        filter.num_hashes()
    );
    for key in &keys {
        println!("  {} present? {}", key, filter.check(key.as_bytes()));
    }
    println!("  user:9001 present? {} (should be false)", filter.check(b"user:9001"));
    println!("Estimated FP rate: {:.6}\n", filter.false_positive_rate());

    Ok(())
}

fn counting_filter_demo() -> Result<()> {
    println!("--- Counting Filter ---");

    let mut filter = CountingFilter::new(3, 100)?;
    filter.add(b"Hello");
    println!("  Hello present after add? {}", filter.check(b"Hello"));

    filter.remove(b"Hello");
    println!("  Hello present after remove? {}\n", filter.check(b"Hello"));

    Ok(())
}

fn scalable_filter_demo() -> Result<()> {
    println!("--- Scalable Filter ---");

    let mut filter = ScalableFilter::new(3, 20, 4.0, 6, 0.01)?;

    for round in 0..5 {
        let start = round * 2000;
        for i in start..start + 2000 {
            filter.add(format!("event:{}", i).as_bytes());
        }
        println!(
            "  after {:>5} adds: {} slices, {} bits, estimated FP rate {:.4}{}",
            start + 2000,
            filter.num_slices(),
            filter.num_bits(),
            filter.false_positive_rate(),
            if filter.is_saturated() { " (saturated)" } else { "" }
        );
    }

    Ok(())
}
