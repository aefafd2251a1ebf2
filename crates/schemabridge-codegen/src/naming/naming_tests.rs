#![allow(non_snake_case)]

use super::*;
use proptest::prelude::*;
use test_case::test_case;

#[test_case("Color", "color")]
#[test_case("XMLTutorial", "xml_tutorial")]
#[test_case("ThisIsAnXMLTutorial", "this_is_an_xml_tutorial")]
#[test_case("getXMLParser", "get_xml_parser")]
#[test_case("Class_", "class_")]
#[test_case("Car", "car")]
#[test_case("HTTPServer", "http_server")]
#[test_case("already_snake", "already_snake")]
fn pascal_to_snake_case___examples___convert(input: &str, expected: &str) {
    assert_eq!(pascal_to_snake_case(input), expected);
}

#[test]
fn pascal_to_snake_case___single_letters___lowercase() {
    assert_eq!(pascal_to_snake_case("A"), "a");
    assert_eq!(pascal_to_snake_case("x"), "x");
}

#[test]
fn pascal_to_snake_case___underscore_runs___collapse_to_one() {
    assert_eq!(pascal_to_snake_case("a__b"), "a_b");
}

#[test]
fn pascal_to_snake_case___leading_separator___is_stripped() {
    assert_eq!(pascal_to_snake_case("_Leading"), "leading");
}

#[test]
fn pascal_to_snake_case___digits___attach_to_the_current_word() {
    assert_eq!(pascal_to_snake_case("Vector3Norm"), "vector3_norm");
}

proptest! {
    #[test]
    fn pascal_to_snake_case___any_identifier___is_idempotent(
        input in "[A-Za-z][A-Za-z0-9_]{0,24}"
    ) {
        let once = pascal_to_snake_case(&input);
        let twice = pascal_to_snake_case(&once);
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn pascal_to_snake_case___any_identifier___never_leads_or_doubles_separators(
        input in "[A-Za-z][A-Za-z0-9_]{0,24}"
    ) {
        let normalized = pascal_to_snake_case(&input);
        prop_assert!(!normalized.starts_with('_'));
        prop_assert!(!normalized.contains("__"));
    }
}
