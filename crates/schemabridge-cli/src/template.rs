//! Template merging and on-disk artifact output
//!
//! Generated code can be merged into hand-written surrounding files: a
//! `<name>.<suffix>.template` next to the output location has its `@_code;`
//! marker replaced with the generated code. Without a template the code is
//! written as-is.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use schemabridge_codegen::{
    BraceStyle, CHeaderGenerator, CPythonConversionGenerator, PythonModuleGenerator,
};
use schemabridge_model::Module;

const CODE_MARKER: &str = "@_code;";

/// Write one artifact, merging it into its template when one exists.
///
/// Returns the path written.
pub fn write_with_template(
    name: &str,
    suffix: &str,
    code: &str,
    directory: &Path,
) -> Result<PathBuf> {
    let template_path = directory.join(format!("{name}.{suffix}.template"));
    let output_path = directory.join(format!("{name}.{suffix}"));

    let content = if template_path.exists() {
        let template = fs::read_to_string(&template_path)
            .with_context(|| format!("Failed to read template: {template_path:?}"))?;
        if !template.contains(CODE_MARKER) {
            anyhow::bail!("template {template_path:?} does not contain the {CODE_MARKER} marker");
        }
        template.replace(CODE_MARKER, code.trim())
    } else {
        code.to_string()
    };

    fs::write(&output_path, content)
        .with_context(|| format!("Failed to write {output_path:?}"))?;

    Ok(output_path)
}

/// Generate and write the four artifacts of a module: the Python protocol
/// module, the C protocol header, and the conversion header/source pair.
pub fn write_module(module: &Module, style: BraceStyle, directory: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(4);

    let mut python_generator = PythonModuleGenerator::new(module);
    python_generator.run()?;
    written.push(write_with_template(
        &format!("python_{}_protocol", module.name()),
        "py",
        &python_generator.result()?,
        directory,
    )?);

    let mut header_generator = CHeaderGenerator::with_style(module, style);
    header_generator.run()?;
    written.push(write_with_template(
        &format!("{}_protocol", module.name()),
        "h",
        &header_generator.result()?,
        directory,
    )?);

    let mut conversion_generator = CPythonConversionGenerator::new(module);
    conversion_generator.run()?;
    let (declarations, definitions) = conversion_generator.result()?;
    written.push(write_with_template(
        &format!("{}_conversion", module.name()),
        "h",
        &declarations,
        directory,
    )?);
    written.push(write_with_template(
        &format!("{}_conversion", module.name()),
        "c",
        &definitions,
        directory,
    )?);

    Ok(written)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::rc::Rc;

    use schemabridge_model::{Enumeration, Field, ModuleItem, Primitive, Struct, Type};

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

    #[test]
    fn write_with_template___with_template___replaces_the_marker() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("tiny_protocol.h.template"),
            "#ifndef TINY_H\n#define TINY_H\n\n@_code;\n\n#endif\n",
        )
        .unwrap();

        let path =
            write_with_template("tiny_protocol", "h", "enum color { Red = 1 };\n", dir.path())
                .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("#ifndef TINY_H\n"));
        assert!(content.contains("enum color { Red = 1 };"));
        assert!(content.ends_with("#endif\n"));
        assert!(!content.contains("@_code;"));
    }

    #[test]
    fn write_with_template___without_template___writes_the_code_directly() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_with_template("tiny_protocol", "h", "enum color {};\n", dir.path())
            .unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "enum color {};\n");
    }

    #[test]
    fn write_with_template___template_without_marker___fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("x.h.template"), "no marker here\n").unwrap();

        let err = write_with_template("x", "h", "code", dir.path()).unwrap_err();

        assert!(err.to_string().contains("@_code;"));
    }

    #[test]
    fn write_module___tiny_module___writes_all_four_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let module = tiny_module();

        let written = write_module(&module, BraceStyle::Knr, dir.path()).unwrap();

        assert_eq!(written.len(), 4);
        assert!(dir.path().join("python_tiny_protocol.py").exists());
        assert!(dir.path().join("tiny_protocol.h").exists());
        assert!(dir.path().join("tiny_conversion.h").exists());
        assert!(dir.path().join("tiny_conversion.c").exists());

        let conversion = fs::read_to_string(dir.path().join("tiny_conversion.c")).unwrap();
        assert!(conversion.contains("Car_to_python"));
    }
}
