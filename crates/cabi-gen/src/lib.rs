//! C API header generator command line
//!
//! Builds the `cabi-gen` command and runs its subcommands:
//! 1. **generate**: load, validate, assemble and write both headers
//! 2. **check**: load, validate and assemble without writing
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let matches = cabi_gen::cli().get_matches_from(["cabi-gen", "check", "--config", "headergen.toml"]);
//! cabi_gen::execute(&matches)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{bail, Context, Result};
use cabi_layer::{GeneratedHeaders, GeneratorConfig, GeneratorLayer};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::{Path, PathBuf};

/// Command definition
#[must_use]
pub fn cli() -> Command {
    let config = Arg::new("config")
        .long("config")
        .short('c')
        .default_value("headergen.toml")
        .value_parser(value_parser!(PathBuf))
        .help("Path to headergen.toml");
    let strict_docs = Arg::new("strict-docs")
        .long("strict-docs")
        .action(ArgAction::SetTrue)
        .help("Fail on parameters without a comment");

    Command::new("cabi-gen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate C API headers from declarative function definitions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate the public and extension headers")
                .arg(config.clone())
                .arg(strict_docs.clone())
                .arg(
                    Arg::new("header")
                        .long("header")
                        .value_parser(value_parser!(PathBuf))
                        .help("Override the public header output path"),
                )
                .arg(
                    Arg::new("extension-header")
                        .long("extension-header")
                        .value_parser(value_parser!(PathBuf))
                        .help("Override the extension header output path"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Validate definitions and render headers without writing")
                .arg(config)
                .arg(strict_docs),
        )
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence over `verbose`.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the selected subcommand
///
/// # Errors
/// Any generator failure, with the config path as context.
pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("generate", args)) => {
            let layer = layer(args)?;
            let headers = layer.run().context("generation failed")?;
            report(&layer, &headers, true);
            Ok(())
        }
        Some(("check", args)) => {
            let layer = layer(args)?;
            let headers = layer.check().context("check failed")?;
            report(&layer, &headers, false);
            Ok(())
        }
        Some((other, _)) => bail!("unknown subcommand '{other}'"),
        None => bail!("no subcommand given"),
    }
}

fn layer(args: &ArgMatches) -> Result<GeneratorLayer> {
    let path = args
        .get_one::<PathBuf>("config")
        .context("missing --config")?;
    let mut config = GeneratorConfig::load(path)
        .with_context(|| format!("failed to load config {}", path.display()))?;

    if args.get_flag("strict-docs") {
        config = config.with_strict_docs();
    }
    // output overrides are relative to the working directory, not the config
    if let Ok(Some(header)) = args.try_get_one::<PathBuf>("header") {
        config = config.with_header_output(absolute(header)?);
    }
    if let Ok(Some(extension)) = args.try_get_one::<PathBuf>("extension-header") {
        config = config.with_extension_header_output(absolute(extension)?);
    }

    Ok(GeneratorLayer::new(config))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    Ok(cwd.join(path))
}

fn report(layer: &GeneratorLayer, headers: &GeneratedHeaders, written: bool) {
    let config = layer.config();
    let versions = headers.layout.sections().len();
    let fields = headers.layout.len();

    if written {
        tracing::info!(
            header = %config.header_path().display(),
            extension_header = %config.extension_header_path().display(),
            versions,
            fields,
            "headers generated"
        );
    } else {
        tracing::info!(versions, fields, "definitions are consistent");
    }
}
