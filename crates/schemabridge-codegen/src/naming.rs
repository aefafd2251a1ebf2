//! Identifier normalization for the native target
//!
//! C declarations use lower snake case; schema declarations use pascal
//! case. [`pascal_to_snake_case`] converts between the two, treating a
//! maximal run of uppercase letters as one acronym word instead of
//! splitting every letter.
//!
//! # Examples
//!
//! ```
//! use schemabridge_codegen::naming::pascal_to_snake_case;
//!
//! assert_eq!(pascal_to_snake_case("Color"), "color");
//! assert_eq!(pascal_to_snake_case("XMLTutorial"), "xml_tutorial");
//! assert_eq!(pascal_to_snake_case("getXMLParser"), "get_xml_parser");
//! ```

/// Convert a pascal- or camel-case identifier to lower snake case.
///
/// One pass over the characters, tracking the previous one: a transition
/// from lowercase into uppercase separates words; a transition from an
/// uppercase run into lowercase attaches the run's last letter to the
/// following word. Separator runs produced by the transformation are
/// collapsed, and a leading separator is stripped.
pub fn pascal_to_snake_case(text: &str) -> String {
    let mut raw = String::with_capacity(text.len() + text.len() / 2);
    let mut previous: Option<char> = None;

    for c in text.chars() {
        handle_character(&mut raw, previous, Some(c));
        previous = Some(c);
    }
    handle_character(&mut raw, previous, None);

    collapse_separators(&raw)
}

fn handle_character(result: &mut String, previous: Option<char>, current: Option<char>) {
    let Some(previous) = previous else {
        return;
    };
    match current {
        None => push_lower(result, previous),
        Some(c) if c.is_uppercase() => {
            if previous.is_uppercase() {
                push_lower(result, previous);
            } else if previous.is_lowercase() {
                result.push(previous);
                result.push('_');
            } else {
                result.push(previous);
            }
        }
        Some(c) if c.is_lowercase() => {
            if previous.is_uppercase() {
                if !result.is_empty() {
                    result.push('_');
                }
                push_lower(result, previous);
            } else if previous.is_lowercase() {
                result.push(previous);
            } else {
                push_lower(result, previous);
            }
        }
        Some(_) => push_lower(result, previous),
    }
}

fn push_lower(result: &mut String, c: char) {
    result.extend(c.to_lowercase());
}

fn collapse_separators(raw: &str) -> String {
    let mut collapsed = String::with_capacity(raw.len());
    let mut previous_was_separator = false;
    for c in raw.chars() {
        if c == '_' {
            if !previous_was_separator && !collapsed.is_empty() {
                collapsed.push(c);
            }
            previous_was_separator = true;
        } else {
            collapsed.push(c);
            previous_was_separator = false;
        }
    }
    collapsed
}

#[cfg(test)]
#[path = "naming/naming_tests.rs"]
mod naming_tests;
