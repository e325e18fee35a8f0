/// Asserts that the manager reports each key as active.
#[macro_export]
macro_rules! assert_active {
    ($manager:expr, $($key:expr),+ $(,)?) => {
        $(
            assert!($manager.is_active($key), "{} should be active", $key);
        )+
    };
}

/// Asserts that the manager reports each key as inactive.
#[macro_export]
macro_rules! assert_inactive {
    ($manager:expr, $($key:expr),+ $(,)?) => {
        $(
            assert!(!$manager.is_active($key), "{} should not be active", $key);
        )+
    };
}
