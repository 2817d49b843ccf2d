//! Test fixture loading utilities

use std::path::PathBuf;

use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Tolerance for comparing computed numbers against golden values
pub const GOLDEN_TOLERANCE: f64 = 1e-9;

/// Route engine diagnostics to the test output; filter with `RUST_LOG`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load a golden fixture as JSON
#[allow(dead_code)]
pub fn load_golden_fixture(name: &str) -> Value {
    let content = load_fixture(&format!("golden/{}", name));
    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Invalid golden fixture {}: {}", name, e))
}

/// Assert two numbers agree within [`GOLDEN_TOLERANCE`]
#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64, context: &str) {
    assert!(
        (actual - expected).abs() <= GOLDEN_TOLERANCE,
        "{}: expected {}, got {}",
        context,
        expected,
        actual
    );
}

/// Assert a list of numbers matches a golden JSON array
#[allow(dead_code)]
pub fn assert_close_all(actual: &[f64], expected: &Value, context: &str) {
    let expected: Vec<f64> = expected
        .as_array()
        .unwrap_or_else(|| panic!("{}: golden value is not an array", context))
        .iter()
        .map(|v| v.as_f64().unwrap_or_else(|| panic!("{}: non-numeric golden value", context)))
        .collect();
    assert_eq!(
        actual.len(),
        expected.len(),
        "{}: expected {:?}, got {:?}",
        context,
        expected,
        actual
    );
    for (i, (a, e)) in actual.iter().zip(&expected).enumerate() {
        assert_close(*a, *e, &format!("{}[{}]", context, i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_path() {
        let path = fixture_path("golden/log_clipped.json");
        assert!(path.to_string_lossy().contains("test_fixtures"));
    }

    #[test]
    fn test_load_golden_fixture() {
        let golden = load_golden_fixture("log_clipped.json");
        assert!(golden["request"].is_object());
        assert!(golden["expected"].is_object());
    }
}
