#![allow(non_snake_case)]

use super::*;

#[test]
fn CodegenError___unbalanced_indentation___displays_level() {
    let err = CodegenError::UnbalancedIndentation { level: 2 };

    assert_eq!(
        err.to_string(),
        "generated output requested at indentation level 2"
    );
}

#[test]
fn CodegenError___field_context___names_struct_field_and_cause() {
    let err = CodegenError::for_field(
        "Car",
        "tags",
        CodegenError::UnsupportedType {
            type_name: "Map".into(),
        },
    );

    assert_eq!(
        err.to_string(),
        "field Car.tags: type Map has no C representation"
    );
}

#[test]
fn CodegenError___unbounded_list___names_element_type() {
    let err = CodegenError::UnboundedList {
        element: "UInt16".into(),
    };

    assert!(err.to_string().contains("UInt16"));
    assert!(err.to_string().contains("maximum length"));
}
