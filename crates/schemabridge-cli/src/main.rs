//! schemabridge CLI - Schema compiler front end
//!
//! Commands:
//! - `schemabridge generate` - Generate all artifacts for a schema
//! - `schemabridge check` - Validate a schema.toml file
//! - `schemabridge parse-header` - Rebuild a Python module from a C header

use anyhow::Result;
use clap::{Parser, Subcommand};
use schemabridge_codegen::BraceStyle;
use tracing_subscriber::EnvFilter;

mod generate;
mod parse_header;
mod schema_file;
mod template;

#[derive(Parser)]
#[command(name = "schemabridge")]
#[command(author, version, about = "Schema compiler for C/Python interop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate header, Python module, and conversion code for a schema
    Generate {
        /// Path to the schema description (default: ./schema.toml)
        #[arg(short, long, default_value = "schema.toml")]
        schema: String,

        /// Output directory for generated files (default: current directory)
        #[arg(short, long, default_value = ".")]
        output: String,

        /// Brace placement style for generated C code (knr, bsd)
        #[arg(long, default_value = "knr")]
        style: String,
    },

    /// Validate a schema description without generating anything
    Check {
        /// Path to the schema description (default: ./schema.toml)
        #[arg(short, long, default_value = "schema.toml")]
        schema: String,
    },

    /// Reconstruct a schema from an existing C header and emit its Python module
    ParseHeader {
        /// Path to the C header to parse
        #[arg(short, long)]
        source: String,

        /// Output path for the generated Python module
        #[arg(short, long)]
        output: String,
    },
}

fn parse_style(style: &str) -> Result<BraceStyle> {
    match style {
        "knr" => Ok(BraceStyle::Knr),
        "bsd" => Ok(BraceStyle::Bsd),
        other => anyhow::bail!("unknown brace style '{other}' (expected knr or bsd)"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            schema,
            output,
            style,
        } => {
            let style = parse_style(&style)?;
            generate::run(&schema, &output, style)?;
        }
        Commands::Check { schema } => {
            schema_file::check(&schema)?;
        }
        Commands::ParseHeader { source, output } => {
            parse_header::run(&source, &output)?;
        }
    }

    Ok(())
}
