/// Asserts that a numerical value is in the provided interval `[a,b]` and panics
/// with a helpful message if not
///
/// ### Example
/// ```should_panic
/// # use gridworld::assert_interval;
/// let roll = 2.0;
/// assert_interval!(roll, 0.0, 1.0);
/// ```
/// This will panic with the message "Invalid value for \`roll\`. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! assert_interval {
    ($var:expr, $a:expr, $b:expr) => {
        assert!(
            $var >= $a && $var <= $b,
            "Invalid value for `{}`. Must be in the interval [{}, {}].",
            stringify!($var),
            $a,
            $b,
        );
    };
}
