use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use jsonviz::cli::{resolve_input, Args, Commands};
use jsonviz::codec::{CodecRegistry, Format};
use jsonviz::codegen::{self, CodeTarget};
use jsonviz::error::VisualizerError;
use jsonviz::graph::{export_image, layout, Extent, ViewState};
use jsonviz::hierarchy::HierarchyNode;
use jsonviz::jwt;
use jsonviz::validation;

fn main() -> ExitCode {
    let args = Args::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else if args.quiet {
        builder.filter_level(log::LevelFilter::Error);
    }
    builder.init();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let registry = CodecRegistry::new();

    match args.command {
        Commands::Convert {
            input,
            from,
            to,
            stdin,
            output,
        } => {
            let raw = resolve_input(input.as_deref(), stdin)?;
            let converted = registry
                .convert(&raw, from, to)
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            emit(output, &converted)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate {
            input,
            format,
            stdin,
        } => {
            let raw = resolve_input(input.as_deref(), stdin)?;
            let result = validation::validate_and_beautify(&registry, &raw, format);
            println!("{}", result.message);
            Ok(exit_for(result.valid))
        }
        Commands::Codegen {
            input,
            format,
            target,
            stdin,
        } => {
            let code = generate(&registry, input.as_deref(), stdin, format, target)?;
            println!("{code}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Schema {
            input,
            format,
            stdin,
        } => {
            let schema = generate(&registry, input.as_deref(), stdin, format, CodeTarget::JsonSchema)?;
            println!("{schema}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Jwt { input, stdin } => {
            let raw = resolve_input(input.as_deref(), stdin)?;
            let decoded = jwt::decode(raw.trim())
                .map_err(|e| anyhow::anyhow!(VisualizerError::from(e).user_message()))?;
            println!("{decoded}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check {
            input,
            format,
            schema,
            stdin,
        } => {
            let raw = resolve_input(input.as_deref(), stdin)?;
            let schema_text = fs::read_to_string(&schema)
                .with_context(|| format!("failed to read {}", schema.display()))?;

            let value = registry
                .parse(&raw, format)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            let schema_value = registry
                .parse(&schema_text, Format::Json)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;

            match validation::validate_against_schema(&value, &schema_value) {
                Ok(()) => {
                    println!("Data is valid against schema");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    println!("Validation failed: {}", e.message);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Export {
            input,
            format,
            image,
            output,
        } => {
            let raw = resolve_input(input.as_deref(), false)?;
            let value = registry
                .parse(&raw, format)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;

            let tree = HierarchyNode::build(&value);
            let placed = layout(&tree, Extent::default());
            let exported = export_image(&placed, &ViewState::default(), image)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;

            let path = output.unwrap_or_else(|| PathBuf::from(&exported.file_name));
            fs::write(&path, &exported.bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {} ({} bytes)", path.display(), exported.bytes.len());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn generate(
    registry: &CodecRegistry,
    input: Option<&str>,
    stdin: bool,
    format: Format,
    target: CodeTarget,
) -> Result<String> {
    let raw = resolve_input(input, stdin)?;
    let value = registry
        .parse(&raw, format)
        .map_err(|e| anyhow::anyhow!(VisualizerError::from(e).user_message()))?;
    codegen::generate_code(&value, target)
        .map_err(|e| anyhow::anyhow!(VisualizerError::from(e).user_message()))
}

fn emit(output: Option<PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

fn exit_for(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
