#![allow(non_snake_case)]

use super::*;
use crate::declarations::{Constant, ConstantValue, Field, Struct};
use test_case::test_case;

fn max_points() -> Rc<Constant> {
    Rc::new(Constant::integer("MAX_POINTS", 16))
}

#[test_case(Primitive::Int8, true)]
#[test_case(Primitive::UInt8, true)]
#[test_case(Primitive::Int16, true)]
#[test_case(Primitive::UInt16, true)]
#[test_case(Primitive::Int32, true)]
#[test_case(Primitive::UInt32, true)]
#[test_case(Primitive::Int64, true)]
#[test_case(Primitive::UInt64, true)]
#[test_case(Primitive::Boolean, false)]
#[test_case(Primitive::Float, false)]
#[test_case(Primitive::Double, false)]
#[test_case(Primitive::String, false)]
fn Primitive___is_integer___matches_kind(primitive: Primitive, expected: bool) {
    assert_eq!(primitive.is_integer(), expected);
}

#[test]
fn Primitive___same_kind___compares_equal() {
    assert_eq!(Primitive::UInt16, Primitive::UInt16);
    assert_ne!(Primitive::UInt16, Primitive::Int16);
}

#[test]
fn List___bounded_with_integer_constant___is_accepted() {
    let list = List::bounded(Type::Primitive(Primitive::UInt16), max_points()).unwrap();

    assert_eq!(list.maximum_length().unwrap().name(), "MAX_POINTS");
}

#[test]
fn List___bounded_with_string_constant___is_rejected() {
    let bound = Rc::new(Constant::new(
        "GREETING",
        ConstantValue::Str("hello".into()),
    ));

    let err = List::bounded(Type::Primitive(Primitive::UInt16), bound).unwrap_err();

    assert!(matches!(err, ModelError::NonIntegerBound { .. }));
}

#[test]
fn Array___with_float_constant___is_rejected() {
    let length = Rc::new(Constant::new("RATIO", ConstantValue::Float(1.5)));

    let err = Array::new(Type::Primitive(Primitive::UInt8), length).unwrap_err();

    assert!(matches!(
        err,
        ModelError::NonIntegerBound { ref constant, .. } if constant == "RATIO"
    ));
}

#[test]
fn Type___name___reports_primitive_and_declaration_names() {
    let point = Rc::new(
        Struct::new(
            "Point",
            vec![Field::new("x", Type::Primitive(Primitive::Int32))],
        )
        .unwrap(),
    );

    assert_eq!(Type::Primitive(Primitive::UInt64).name(), "UInt64");
    assert_eq!(Type::Struct(point).name(), "Point");
}

#[test]
fn Type___type_arguments___exposes_container_elements() {
    let list = Rc::new(List::unbounded(Type::Primitive(Primitive::Boolean)));
    let map = Rc::new(Map::new(
        Type::Primitive(Primitive::String),
        Type::Primitive(Primitive::Double),
    ));

    assert_eq!(Type::List(list).type_arguments().len(), 1);
    assert_eq!(Type::Map(map).type_arguments().len(), 2);
    assert!(Type::Primitive(Primitive::Boolean).type_arguments().is_empty());
}
