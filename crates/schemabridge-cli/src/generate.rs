//! The `generate` command: schema file in, four artifacts out

use std::path::Path;

use anyhow::{Context, Result};
use schemabridge_codegen::BraceStyle;
use tracing::debug;

use crate::schema_file::SchemaFile;
use crate::template;

pub fn run(schema: &str, output: &str, style: BraceStyle) -> Result<()> {
    println!("Reading schema: {schema}");
    let module = SchemaFile::from_file(schema)?.into_module()?;

    println!(
        "Found {} constant(s), {} enum(s), {} struct(s)",
        module.constants().len(),
        module.enums().len(),
        module.structs().len()
    );

    let directory = Path::new(output);
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create output directory: {directory:?}"))?;

    debug!(module = module.name(), "generating artifacts");
    let written = template::write_module(&module, style, directory)?;

    for path in written {
        println!("Generated: {}", path.display());
    }

    Ok(())
}
