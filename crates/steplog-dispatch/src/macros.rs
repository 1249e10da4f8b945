//! Convenience macros for instrumenting calls.

/// Builds a `Vec<StepArg>` from heterogeneous values.
///
/// # Example
/// ```rust
/// use steplog_dispatch::step_args;
///
/// let args = step_args!["Hello", 3, vec!["a", "b"]];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! step_args {
    () => {
        ::std::vec::Vec::<$crate::prelude::StepArg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::prelude::StepArg::from($arg)),+]
    };
}
