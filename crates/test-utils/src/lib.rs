//! Shared test utilities for the surf-forecast workspace.
//!
//! This crate provides common testing infrastructure including:
//! - A builder that lays out a complete data tree (plots, tide plots,
//!   forecast tables, location images) on disk
//! - Sample forecast CSV text and request helpers
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{DataTree, fixtures};
//! ```

pub mod fixtures;

// Re-export commonly used items at the crate root
pub use fixtures::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that an HTML body contains every given fragment.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_contains_all;
///
/// assert_contains_all!(body, "<h1>", "Jeffreys's Bay");
/// ```
#[macro_export]
macro_rules! assert_contains_all {
    ($haystack:expr, $($needle:expr),+ $(,)?) => {{
        let haystack: &str = &$haystack;
        $(
            assert!(
                haystack.contains($needle),
                "expected body to contain {:?}",
                $needle
            );
        )+
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.5001, 0.001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_contains_all_passes() {
        assert_contains_all!(String::from("<h1>Bells</h1>"), "<h1>", "Bells");
    }

    #[test]
    #[should_panic(expected = "expected body to contain")]
    fn test_assert_contains_all_fails() {
        assert_contains_all!("<h1>Bells</h1>", "Snapper");
    }
}
