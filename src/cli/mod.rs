//! Command-line interface module
//!
//! The binary is a thin adapter over the session: it resolves the input
//! source, drives the pipeline, and writes artifacts to stdout or a file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::codec::Format;
use crate::codegen::CodeTarget;
use crate::graph::ExportFormat;

/// Main CLI arguments
#[derive(Parser, Debug)]
#[command(name = "jsonviz")]
#[command(about = "Visualize, convert, and validate structured data")]
#[command(version)]
pub struct Args {
    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert input between formats
    Convert {
        /// Input text or file path (omit with --stdin)
        input: Option<String>,
        /// Input format
        #[arg(long, value_enum, default_value = "json")]
        from: Format,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        to: Format,
        /// Read input from standard input
        #[arg(long)]
        stdin: bool,
        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate and beautify input in its declared format
    Validate {
        /// Input text or file path (omit with --stdin)
        input: Option<String>,
        /// Input format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
        /// Read input from standard input
        #[arg(long)]
        stdin: bool,
    },
    /// Generate code stubs from the top-level keys
    Codegen {
        /// Input text or file path (omit with --stdin)
        input: Option<String>,
        /// Input format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
        /// Generation target
        #[arg(long, value_enum, default_value = "typescript")]
        target: CodeTarget,
        /// Read input from standard input
        #[arg(long)]
        stdin: bool,
    },
    /// Generate a JSON Schema from the top-level keys
    Schema {
        /// Input text or file path (omit with --stdin)
        input: Option<String>,
        /// Input format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
        /// Read input from standard input
        #[arg(long)]
        stdin: bool,
    },
    /// Decode a JWT into the JSON array of its segments
    Jwt {
        /// Token text or file path (omit with --stdin)
        input: Option<String>,
        /// Read input from standard input
        #[arg(long)]
        stdin: bool,
    },
    /// Validate input against a JSON Schema file
    Check {
        /// Input text or file path (omit with --stdin)
        input: Option<String>,
        /// Input format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
        /// Schema file path
        #[arg(long)]
        schema: PathBuf,
        /// Read input from standard input
        #[arg(long)]
        stdin: bool,
    },
    /// Render the input as a node-link tree image
    Export {
        /// Input text or file path (omit with --stdin)
        input: Option<String>,
        /// Input format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
        /// Image format
        #[arg(long, value_enum, default_value = "svg")]
        image: ExportFormat,
        /// Output file path (default: graph.<ext> in the working directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Resolve the positional input: an existing file path is read, anything
/// else is taken as raw text; `--stdin` reads standard input instead.
pub fn resolve_input(input: Option<&str>, stdin: bool) -> Result<String> {
    if stdin {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read from stdin")?;
        return Ok(buffer);
    }

    let input = input.context("no input given; pass text, a file path, or --stdin")?;
    if Path::new(input).is_file() {
        fs::read_to_string(input).with_context(|| format!("failed to read {input}"))
    } else {
        Ok(input.to_string())
    }
}
