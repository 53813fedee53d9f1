//! Internal assertion macros.

/// Bounds assertion for the unchecked access paths.
///
/// Active in debug builds and whenever the `bounds-assert` feature is enabled;
/// compiled out of optimized builds otherwise.
macro_rules! bounds_assert {
    ($($arg:tt)*) => {
        if cfg!(any(debug_assertions, feature = "bounds-assert")) {
            assert!($($arg)*);
        }
    };
}
