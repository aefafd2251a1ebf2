#![allow(non_snake_case)]

use super::*;
use schemabridge_model::{Constant, Field, List, Map, ModuleItem};
use std::rc::Rc;

fn tiny_module() -> Module {
    let color = Rc::new(Enumeration::new("Color", ["Red", "Green", "Blue"]).unwrap());
    let car = Rc::new(
        Struct::new(
            "Car",
            vec![
                Field::new("color", Type::Enum(Rc::clone(&color))),
                Field::new("x", Type::Primitive(Primitive::UInt16)),
            ],
        )
        .unwrap(),
    );
    Module::new("tiny", [ModuleItem::from(color), ModuleItem::from(car)]).unwrap()
}

fn generate(module: &Module) -> (String, String) {
    let mut generator = CPythonConversionGenerator::new(module);
    generator.run().unwrap();
    generator.result().unwrap()
}

#[test]
fn CPythonConversionGenerator___declarations___list_all_four_signatures() {
    let module = tiny_module();

    let (declarations, _) = generate(&module);

    assert!(declarations.contains("enum color Color_to_c(PyObject *python_enum);\n"));
    assert!(declarations.contains("PyObject * Color_to_python(enum color value);\n"));
    assert!(declarations.contains("struct car Car_to_c(PyObject *python_struct);\n"));
    assert!(declarations.contains("PyObject * Car_to_python(struct car c_struct);\n"));
}

#[test]
fn CPythonConversionGenerator___enum_to_c___switches_over_every_member_and_fails_otherwise() {
    let module = tiny_module();

    let (_, code) = generate(&module);

    assert!(code.contains("enum color Color_to_c(PyObject *python_enum) {\n"));
    assert!(code.contains("    int ordinal;\n"));
    assert!(code.contains("    switch (ordinal) {\n"));
    for member in ["Red", "Green", "Blue"] {
        assert!(code.contains(&format!("        case {member}:\n")));
        assert!(code.contains(&format!("            return {member};\n")));
    }
    assert!(code.contains("        default:\n"));
    assert!(code.contains(
        "            fail_with_message(\"Illegal ordinal value for enum Color [%d]\", ordinal);\n"
    ));
}

#[test]
fn CPythonConversionGenerator___enum_to_c___extracts_the_ordinal_attribute() {
    let module = tiny_module();

    let (_, code) = generate(&module);

    assert!(code.contains(concat!(
        "    with_attribute(\n",
        "        python_enum,\n",
        "        \"value\",\n",
        "        python_value,\n",
        "        with_pylong_as_int64(\n",
        "            python_value,\n",
        "            value,\n",
        "            ordinal = value));\n",
    )));
}

#[test]
fn CPythonConversionGenerator___enum_to_python___caches_the_class_handle() {
    let module = tiny_module();

    let (_, code) = generate(&module);

    assert!(code.contains("PyObject * Color_to_python(enum color value) {\n"));
    assert!(code.contains("    static PyObject *enum_class = nullptr;\n"));
    assert!(code.contains("    if (enum_class == nullptr) {\n"));
    assert!(code.contains(
        "        enum_class = load_class(\"python_tiny_protocol\", \"Color\");\n"
    ));
    assert!(code.contains(
        "PyObject *result = PyObject_CallFunction(enum_class, \"i\", value);\n"
    ));
    assert!(code.contains(
        "        fail_with_message(\"Unable to convert ordinal value [%d] to enum Color\", value);\n"
    ));
}

#[test]
fn CPythonConversionGenerator___struct_to_c___recurses_into_the_enum_conversion() {
    let module = tiny_module();

    let (_, code) = generate(&module);

    assert!(code.contains("struct car Car_to_c(PyObject *python_struct) {\n"));
    assert!(code.contains("    struct car result = {};\n"));
    assert!(code.contains("result.color = Color_to_c(python_value));\n"));
    assert!(code.contains("result.x = x));\n"));
    assert!(code.contains("    return result;\n"));

    let color_assignment = code.find("result.color = Color_to_c").unwrap();
    let x_assignment = code.find("result.x = x").unwrap();
    assert!(color_assignment < x_assignment);
}

#[test]
fn CPythonConversionGenerator___struct_to_python___sets_each_field_attribute() {
    let module = tiny_module();

    let (_, code) = generate(&module);

    assert!(code.contains("PyObject * Car_to_python(struct car c_struct) {\n"));
    assert!(code.contains("    static PyObject *struct_class = nullptr;\n"));
    assert!(code.contains(
        "        struct_class = load_class(\"python_tiny_protocol\", \"Car\");\n"
    ));
    assert!(code.contains(
        "PyObject *result = PyObject_CallFunction(struct_class, \"\");\n"
    ));
    assert!(code.contains(
        "        fail_with_message(\"Unable to instantiate struct Car\");\n"
    ));
    assert!(code.contains("Color_to_python(c_struct.color)"));
    assert!(code.contains("with_int64_as_pylong(\n"));
    assert!(code.contains("c_struct.x"));
}

#[test]
fn CPythonConversionGenerator___module_prefix___qualifies_the_loaded_module() {
    let module = tiny_module();

    let mut generator = CPythonConversionGenerator::with_module_prefix(&module, "vehicles.");
    generator.run().unwrap();
    let (_, code) = generator.result().unwrap();

    assert!(code.contains("load_class(\"vehicles.python_tiny_protocol\", \"Color\");"));
}

#[test]
fn CPythonConversionGenerator___bounded_list_field___iterates_with_item_index() {
    let bound = Rc::new(Constant::integer("MAX_POINTS", 16));
    let path = Rc::new(
        Struct::new(
            "Path",
            vec![Field::new(
                "points",
                Type::List(Rc::new(
                    List::bounded(Type::Primitive(Primitive::UInt16), Rc::clone(&bound)).unwrap(),
                )),
            )],
        )
        .unwrap(),
    );
    let module = Module::new(
        "geo",
        [ModuleItem::from(bound), ModuleItem::from(path)],
    )
    .unwrap();

    let (_, code) = generate(&module);

    assert!(code.contains("with_list_elements(\n"));
    assert!(code.contains("MAX_POINTS"));
    assert!(code.contains("result.points[item_index] = points_item"));
    assert!(code.contains("with_array_as_pylist(\n"));
    assert!(code.contains("UInt16_to_python"));
}

#[test]
fn CPythonConversionGenerator___map_field___fails_naming_struct_and_field() {
    let lookup = Rc::new(
        Struct::new(
            "Lookup",
            vec![Field::new(
                "entries",
                Type::Map(Rc::new(Map::new(
                    Type::Primitive(Primitive::String),
                    Type::Primitive(Primitive::Double),
                ))),
            )],
        )
        .unwrap(),
    );
    let module = Module::new("lookups", [ModuleItem::from(lookup)]).unwrap();

    let mut generator = CPythonConversionGenerator::new(&module);
    let err = generator.run().unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Lookup.entries"));
    assert!(message.contains("Map"));
}
