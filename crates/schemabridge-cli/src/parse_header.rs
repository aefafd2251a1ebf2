//! The `parse-header` command: best-effort schema reconstruction
//!
//! Parses an existing C header (`#define` constants, tagged `enum` and
//! `struct` blocks) back into a schema module and emits the matching Python
//! protocol module. The parser recognizes the shapes the header generator
//! produces: scalar members, named-constant array bounds, and `size_t
//! <field>_length;` counters, which turn the preceding array member back
//! into a bounded list.
//!
//! Anything it cannot map is a hard error naming the struct and member, so
//! a silently wrong reconstruction never reaches the output file.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use regex::Regex;
use schemabridge_model::{
    Array, Constant, ConstantValue, Enumeration, Field, List, Module, ModuleItem, Primitive,
    Struct, Type,
};
use schemabridge_codegen::PythonModuleGenerator;
use tracing::debug;

pub fn run(source: &str, output: &str) -> Result<()> {
    let source_path = Path::new(source);
    println!("Parsing C header: {}", source_path.display());

    let content = std::fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read header: {}", source_path.display()))?;
    let module_name = source_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "header".to_string());

    let module = parse_header_text(&module_name, &content)?;
    println!(
        "Reconstructed {} constant(s), {} enum(s), {} struct(s)",
        module.constants().len(),
        module.enums().len(),
        module.structs().len()
    );

    let python = python_module_for(&module)?;
    std::fs::write(output, python).with_context(|| format!("Failed to write {output}"))?;
    println!("Generated: {output}");

    Ok(())
}

#[derive(Debug)]
struct ParsedMember {
    type_name: String,
    name: String,
    bound: Option<String>,
    is_list: bool,
}

/// Parse header text into a validated module.
fn parse_header_text(module_name: &str, content: &str) -> Result<Module> {
    let define_re = Regex::new(r"^#define\s+(\w+)\s+(.+?)\s*$").expect("define pattern");
    let enum_re = Regex::new(r"^enum\s+(\w+)\s*\{").expect("enum pattern");
    let struct_re = Regex::new(r"^struct\s+(\w+)\s*\{").expect("struct pattern");
    let enum_member_re =
        Regex::new(r"^(\w+)(?:\s*=\s*(-?\d+))?\s*,?\s*(?:/[/*].*)?$").expect("member pattern");
    let struct_member_re =
        Regex::new(r"^((?:enum\s+|struct\s+)?\w+)\s+(\w+)\s*(?:\[(\w+)\])?\s*;\s*(?:/[/*].*)?$")
            .expect("field pattern");

    let mut items = Vec::new();
    let mut constants = std::collections::HashMap::new();
    let mut declared: std::collections::HashMap<String, Type> = std::collections::HashMap::new();

    enum Scope {
        Toplevel,
        InEnum(String, Vec<(String, Option<i64>)>),
        InStruct(String, Vec<ParsedMember>),
    }
    let mut scope = Scope::Toplevel;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with('}') {
            match std::mem::replace(&mut scope, Scope::Toplevel) {
                Scope::Toplevel => {}
                Scope::InEnum(name, members) => {
                    let enumeration = build_enum(&name, &members)?;
                    debug!(declaration = enumeration.name(), "parsed enum");
                    declared.insert(
                        enumeration.name().to_string(),
                        Type::Enum(Rc::clone(&enumeration)),
                    );
                    items.push(ModuleItem::from(enumeration));
                }
                Scope::InStruct(name, mut members) => {
                    let struct_decl = build_struct(&name, &mut members, &declared, &constants)?;
                    debug!(declaration = struct_decl.name(), "parsed struct");
                    declared.insert(
                        struct_decl.name().to_string(),
                        Type::Struct(Rc::clone(&struct_decl)),
                    );
                    items.push(ModuleItem::from(struct_decl));
                }
            }
            continue;
        }

        match &mut scope {
            Scope::Toplevel => {
                if let Some(captures) = define_re.captures(line) {
                    let constant = Rc::new(Constant::new(
                        &captures[1],
                        parse_constant_value(&captures[2]),
                    ));
                    debug!(constant = constant.name(), "parsed constant");
                    constants.insert(constant.name().to_string(), Rc::clone(&constant));
                    items.push(ModuleItem::from(constant));
                } else if let Some(captures) = enum_re.captures(line) {
                    scope = Scope::InEnum(captures[1].to_string(), Vec::new());
                } else if let Some(captures) = struct_re.captures(line) {
                    scope = Scope::InStruct(captures[1].to_string(), Vec::new());
                }
            }
            Scope::InEnum(_, members) => {
                if let Some(captures) = enum_member_re.captures(line) {
                    let value = captures.get(2).map(|m| m.as_str().parse()).transpose()?;
                    members.push((captures[1].to_string(), value));
                }
            }
            Scope::InStruct(_, members) => {
                if let Some(captures) = struct_member_re.captures(line) {
                    members.push(ParsedMember {
                        type_name: captures[1].trim().to_string(),
                        name: captures[2].to_string(),
                        bound: captures.get(3).map(|m| m.as_str().to_string()),
                        is_list: false,
                    });
                }
            }
        }
    }

    Ok(Module::new(module_name, items)?)
}

fn parse_constant_value(raw: &str) -> ConstantValue {
    if let Ok(integer) = raw.parse::<i64>() {
        return ConstantValue::Integer(integer);
    }
    if let Ok(float) = raw.parse::<f64>() {
        return ConstantValue::Float(float);
    }
    match raw {
        "true" => ConstantValue::Boolean(true),
        "false" => ConstantValue::Boolean(false),
        quoted if quoted.starts_with('"') && quoted.ends_with('"') && quoted.len() >= 2 => {
            ConstantValue::Str(quoted[1..quoted.len() - 1].to_string())
        }
        other => ConstantValue::Str(other.to_string()),
    }
}

fn build_enum(name: &str, members: &[(String, Option<i64>)]) -> Result<Rc<Enumeration>> {
    if members.is_empty() {
        bail!("enum {name} has no members");
    }
    let first_ordinal = members[0].1.unwrap_or(0);
    let enumeration = Enumeration::new(name, members.iter().map(|(member, _)| member.clone()))?
        .with_first_ordinal(first_ordinal);
    Ok(Rc::new(enumeration))
}

fn build_struct(
    name: &str,
    members: &mut Vec<ParsedMember>,
    declared: &std::collections::HashMap<String, Type>,
    constants: &std::collections::HashMap<String, Rc<Constant>>,
) -> Result<Rc<Struct>> {
    fold_length_counters(name, members)?;

    let mut fields = Vec::with_capacity(members.len());
    for member in members.iter() {
        let element_type = resolve_member_type(name, member, declared)?;
        let ty = match &member.bound {
            None => element_type,
            Some(bound) => {
                if bound.chars().all(|c| c.is_ascii_digit()) {
                    bail!(
                        "member {name}.{}: array bound must be a named constant, got [{bound}]",
                        member.name
                    );
                }
                let bound = constants.get(bound).cloned().with_context(|| {
                    format!(
                        "member {name}.{} references unknown constant {bound}",
                        member.name
                    )
                })?;
                if member.is_list {
                    Type::List(Rc::new(List::bounded(element_type, bound)?))
                } else {
                    Type::Array(Rc::new(Array::new(element_type, bound)?))
                }
            }
        };
        fields.push(Field::new(&member.name, ty));
    }

    Ok(Rc::new(Struct::new(name, fields)?))
}

/// Turn `size_t <field>_length;` counters back into list markers on the
/// member they count, and drop them from the member list.
fn fold_length_counters(struct_name: &str, members: &mut Vec<ParsedMember>) -> Result<()> {
    let mut index = 0;
    while index < members.len() {
        if members[index].type_name == "size_t" {
            let counter_name = members[index].name.clone();
            let Some(stem) = counter_name.strip_suffix("_length") else {
                bail!("member {struct_name}.{counter_name} has unsupported type size_t");
            };
            let Some(counted) = members
                .iter_mut()
                .take(index)
                .find(|member| member.name == stem && member.bound.is_some())
            else {
                bail!(
                    "member {struct_name}.{counter_name} counts no preceding bounded member"
                );
            };
            counted.is_list = true;
            members.remove(index);
        } else {
            index += 1;
        }
    }
    Ok(())
}

fn resolve_member_type(
    struct_name: &str,
    member: &ParsedMember,
    declared: &std::collections::HashMap<String, Type>,
) -> Result<Type> {
    if let Some(primitive) = c_primitive_named(&member.type_name) {
        return Ok(Type::Primitive(primitive));
    }
    let bare_name = member
        .type_name
        .strip_prefix("enum ")
        .or_else(|| member.type_name.strip_prefix("struct "))
        .map_or(member.type_name.as_str(), str::trim);
    declared.get(bare_name).cloned().with_context(|| {
        format!(
            "member {struct_name}.{} has unsupported type {}",
            member.name, member.type_name
        )
    })
}

fn c_primitive_named(name: &str) -> Option<Primitive> {
    match name {
        "bool" => Some(Primitive::Boolean),
        "int8_t" => Some(Primitive::Int8),
        "uint8_t" => Some(Primitive::UInt8),
        "int16_t" => Some(Primitive::Int16),
        "uint16_t" => Some(Primitive::UInt16),
        "int32_t" => Some(Primitive::Int32),
        "uint32_t" => Some(Primitive::UInt32),
        "int64_t" => Some(Primitive::Int64),
        "uint64_t" => Some(Primitive::UInt64),
        "float" => Some(Primitive::Float),
        "double" => Some(Primitive::Double),
        _ => None,
    }
}

/// The Python module for a reconstructed schema: imports, constants, then
/// the generated classes.
fn python_module_for(module: &Module) -> Result<String> {
    let mut source = String::from("from dataclasses import dataclass\nfrom enum import Enum\n\n");

    for constant in module.constants() {
        source.push_str(&format!(
            "{} = {}\n",
            constant.name(),
            python_literal(constant.value())
        ));
    }
    if !module.constants().is_empty() {
        source.push('\n');
    }

    let mut generator = PythonModuleGenerator::new(module);
    generator.run()?;
    source.push_str(&generator.result()?);

    Ok(source)
}

fn python_literal(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Integer(integer) => integer.to_string(),
        ConstantValue::Float(float) => format!("{float:?}"),
        ConstantValue::Boolean(true) => "True".to_string(),
        ConstantValue::Boolean(false) => "False".to_string(),
        ConstantValue::Str(text) => format!("'{text}'"),
    }
}
