//! Command interpolation.
//!
//! Command arguments may reference variables as `{{ NAME }}`. Referenced
//! variables are substituted into the arguments and removed from the values
//! left for the environment, so a value reaches the child process once.
//!
//! Grammar: `{{`, optional ASCII whitespace, an identifier
//! `[A-Za-z_][A-Za-z0-9_]*`, optional ASCII whitespace, `}}`. Anything else
//! starting with `{{` is copied literally. A reference to a name without a
//! value renders as the empty string.

use std::collections::BTreeMap;

use tracing::{debug, warn};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// One piece of a parsed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Reference(&'a str),
}

/// Split an argument into literal text and variable references.
fn parse(argument: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = argument;

    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let reference = after_open.find(CLOSE).and_then(|end| {
            let name = after_open[..end].trim_matches(|c: char| c.is_ascii_whitespace());
            is_identifier(name).then_some((name, end))
        });

        match reference {
            Some((name, end)) => {
                if start > 0 {
                    segments.push(Segment::Literal(&rest[..start]));
                }
                segments.push(Segment::Reference(name));
                rest = &after_open[end + CLOSE.len()..];
            }
            None => {
                segments.push(Segment::Literal(&rest[..start + OPEN.len()]));
                rest = after_open;
            }
        }
    }

    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    segments
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Names referenced by `argument`, in first-seen order, without duplicates.
pub fn references(argument: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for segment in parse(argument) {
        if let Segment::Reference(name) = segment {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Render one argument against `values`.
pub fn render(argument: &str, values: &BTreeMap<String, String>) -> String {
    let mut rendered = String::with_capacity(argument.len());
    for segment in parse(argument) {
        match segment {
            Segment::Literal(text) => rendered.push_str(text),
            Segment::Reference(name) => match values.get(name) {
                Some(value) => rendered.push_str(value),
                None => warn!("variable {:?} is not defined, rendering it empty", name),
            },
        }
    }
    rendered
}

/// Render every argument and drop referenced names from `values`.
///
/// Returns the rendered command and the values left for the environment.
pub fn interpolate(
    command: &[String],
    mut values: BTreeMap<String, String>,
) -> (Vec<String>, BTreeMap<String, String>) {
    let rendered = command
        .iter()
        .map(|argument| render(argument, &values))
        .collect();

    let used: Vec<&str> = command
        .iter()
        .flat_map(|argument| references(argument))
        .collect();
    debug!(variables = ?used, "variables used by the command");

    for name in used {
        values.remove(name);
    }

    (rendered, values)
}
