#![allow(dead_code)]

use siunits::UnitSystem;

/// Relative comparison for values that went through a unit conversion.
pub fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

pub fn system() -> UnitSystem {
    let _ = env_logger::builder().is_test(true).try_init();
    UnitSystem::new()
}
