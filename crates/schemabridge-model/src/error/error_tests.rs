#![allow(non_snake_case)]

use super::*;

#[test]
fn ModelError___empty_enumeration___displays_name() {
    let err = ModelError::EmptyEnumeration {
        name: "Color".into(),
    };

    assert_eq!(err.to_string(), "enumeration Color has no values");
}

#[test]
fn ModelError___non_integer_bound___displays_constant_and_type() {
    let err = ModelError::NonIntegerBound {
        constant: "MAX_POINTS".into(),
        value_type: "String".into(),
    };

    assert_eq!(
        err.to_string(),
        "length constant MAX_POINTS of a bounded collection is not an integer (found String)"
    );
}

#[test]
fn ModelError___unresolved_reference___names_struct_field_and_type() {
    let err = ModelError::UnresolvedReference {
        module: "tiny".into(),
        struct_name: "Car".into(),
        field: "color".into(),
        type_name: "Color".into(),
    };

    let display = err.to_string();

    assert!(display.contains("Car"));
    assert!(display.contains("color"));
    assert!(display.contains("Color"));
    assert!(display.contains("tiny"));
}

#[test]
fn ModelError___duplicate_declaration___names_module_and_declaration() {
    let err = ModelError::DuplicateDeclaration {
        module: "tiny".into(),
        name: "Car".into(),
    };

    assert_eq!(err.to_string(), "module tiny declares Car more than once");
}
