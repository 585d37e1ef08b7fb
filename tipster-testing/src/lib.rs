//! Float assertion helpers shared by the workspace tests.

use assert_float_eq::*;

fn assert_same_len(expected: &[f64], actual: &[f64]) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
}

/// Asserts that two slices hold the same values, to within `epsilon` relative error.
pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_same_len(expected, actual);
    for (&expected, &actual) in expected.iter().zip(actual) {
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Absolute variant of [assert_slice_f64_relative], for values that may sit at or near zero,
/// such as form indices.
pub fn assert_slice_f64_absolute(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_same_len(expected, actual);
    for (&expected, &actual) in expected.iter().zip(actual) {
        if actual != expected {
            assert_float_absolute_eq!(expected, actual, epsilon);
        }
    }
}
