//! Human-readable step labels built from raw call information.
//!
//! `shouldHaveText` with a single argument `"Hello"` becomes
//! `should have text(Hello)`. All functions are pure.

use std::fmt;

use crate::types::args::{StepArg, write_list};

/// Splits a camel-case identifier into lower-case words.
///
/// A space is inserted before every ASCII upper-case letter and the whole
/// result is lower-cased, so a leading capital yields a leading space.
pub fn readable_identifier(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + identifier.len() / 4);
    for ch in identifier.chars() {
        if ch.is_ascii_uppercase() {
            out.push(' ');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

/// Renders call arguments for a step label.
///
/// No arguments give an empty string. A lone sequence argument is flattened
/// one level and treated as the argument list. A single remaining element
/// is rendered bare; anything else as `[a, b]`.
pub fn readable_arguments(args: &[StepArg]) -> String {
    let items = match args {
        [] => return String::new(),
        [StepArg::Seq(inner)] => inner.as_slice(),
        _ => args,
    };

    match items {
        [single] => single.to_string(),
        _ => ListDisplay(items).to_string(),
    }
}

/// Builds the subject of a call-style step: `readable identifier(args)`.
pub fn step_label(identifier: &str, args: &[StepArg]) -> String {
    format!(
        "{}({})",
        readable_identifier(identifier),
        readable_arguments(args)
    )
}

struct ListDisplay<'a>(&'a [StepArg]);

impl fmt::Display for ListDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.0)
    }
}
