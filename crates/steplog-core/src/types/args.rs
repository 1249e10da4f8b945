//! String forms of step arguments.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One argument passed to an instrumented call, reduced to what a step
/// label needs: its string form, or a nested sequence of arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepArg {
    /// An absent value, rendered as `null`.
    Null,
    /// A scalar already converted to its string form.
    Value(String),
    /// A sequence of arguments, rendered as `[a, b]`.
    Seq(Vec<StepArg>),
}

/// Writes `[a, b, c]`.
pub(crate) fn write_list(f: &mut fmt::Formatter<'_>, items: &[StepArg]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl fmt::Display for StepArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Value(s) => f.write_str(s),
            Self::Seq(items) => write_list(f, items),
        }
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for StepArg {
                fn from(value: $ty) -> Self {
                    Self::Value(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(
    &str, String, &String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64,
    u128, usize, f32, f64,
);

impl<T: Into<StepArg>> From<Option<T>> for StepArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<StepArg>> From<Vec<T>> for StepArg {
    fn from(values: Vec<T>) -> Self {
        Self::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<StepArg>> From<&[T]> for StepArg {
    fn from(values: &[T]) -> Self {
        Self::Seq(values.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<StepArg>, const N: usize> From<[T; N]> for StepArg {
    fn from(values: [T; N]) -> Self {
        Self::Seq(values.into_iter().map(Into::into).collect())
    }
}
