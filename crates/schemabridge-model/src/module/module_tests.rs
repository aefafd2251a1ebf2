#![allow(non_snake_case)]

use super::*;
use crate::declarations::{Enumeration, Field};
use crate::types::{Array, List, Primitive};

fn color() -> Rc<Enumeration> {
    Rc::new(Enumeration::new("Color", ["Red", "Green", "Blue"]).unwrap())
}

fn car(color: &Rc<Enumeration>) -> Rc<Struct> {
    Rc::new(
        Struct::new(
            "Car",
            vec![
                Field::new("color", Type::Enum(Rc::clone(color))),
                Field::new("x", Type::Primitive(Primitive::UInt16)),
            ],
        )
        .unwrap(),
    )
}

#[test]
fn Module___mixed_items___are_partitioned_in_order() {
    let color = color();
    let car = car(&color);
    let max = Rc::new(Constant::integer("MAX_CARS", 8));

    let module = Module::new(
        "tiny",
        [
            ModuleItem::from(max),
            ModuleItem::from(Rc::clone(&color)),
            ModuleItem::from(Rc::clone(&car)),
        ],
    )
    .unwrap();

    assert_eq!(module.name(), "tiny");
    assert_eq!(module.constants().len(), 1);
    assert_eq!(module.enums().len(), 1);
    assert_eq!(module.structs().len(), 1);
    assert_eq!(module.enum_named("Color").unwrap().name(), "Color");
    assert_eq!(module.struct_named("Car").unwrap().name(), "Car");
    assert_eq!(module.constant_named("MAX_CARS").unwrap().name(), "MAX_CARS");
}

#[test]
fn Module___duplicate_declaration_name___is_rejected() {
    let first = color();
    let second = color();

    let err = Module::new(
        "tiny",
        [ModuleItem::from(first), ModuleItem::from(second)],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ModelError::DuplicateDeclaration { ref name, .. } if name == "Color"
    ));
}

#[test]
fn Module___field_referencing_undeclared_enum___is_rejected() {
    let color = color();
    let car = car(&color);

    // Color itself is never added to the module.
    let err = Module::new("tiny", [ModuleItem::from(car)]).unwrap_err();

    assert!(matches!(
        err,
        ModelError::UnresolvedReference { ref type_name, ref field, .. }
            if type_name == "Color" && field == "color"
    ));
}

#[test]
fn Module___list_bound_constant_not_declared___is_rejected() {
    let bound = Rc::new(Constant::integer("MAX_POINTS", 4));
    let points = Rc::new(
        Struct::new(
            "Path",
            vec![Field::new(
                "points",
                Type::List(Rc::new(
                    List::bounded(Type::Primitive(Primitive::UInt16), bound).unwrap(),
                )),
            )],
        )
        .unwrap(),
    );

    let err = Module::new("tiny", [ModuleItem::from(points)]).unwrap_err();

    assert!(matches!(
        err,
        ModelError::UnresolvedConstant { ref constant, .. } if constant == "MAX_POINTS"
    ));
}

#[test]
fn Module___array_length_constant_declared___resolves() {
    let length = Rc::new(Constant::integer("GRID_SIZE", 9));
    let grid = Rc::new(
        Struct::new(
            "Grid",
            vec![Field::new(
                "cells",
                Type::Array(Rc::new(
                    Array::new(Type::Primitive(Primitive::UInt8), Rc::clone(&length)).unwrap(),
                )),
            )],
        )
        .unwrap(),
    );

    let module = Module::new(
        "grid",
        [ModuleItem::from(length), ModuleItem::from(grid)],
    );

    assert!(module.is_ok());
}

#[test]
fn Module___struct_referencing_later_struct___resolves() {
    let color = color();
    let wheel = Rc::new(
        Struct::new(
            "Wheel",
            vec![Field::new("diameter", Type::Primitive(Primitive::UInt16))],
        )
        .unwrap(),
    );
    let car = Rc::new(
        Struct::new(
            "Car",
            vec![Field::new("front_left", Type::Struct(Rc::clone(&wheel)))],
        )
        .unwrap(),
    );

    // Car is declared before Wheel; resolution still succeeds.
    let module = Module::new(
        "cars",
        [
            ModuleItem::from(Rc::clone(&color)),
            ModuleItem::from(car),
            ModuleItem::from(wheel),
        ],
    );

    assert!(module.is_ok());
}
