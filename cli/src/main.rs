mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use option_layers_core::{
    ConfigSource, HelpStyle, OptionValues, format_help_with, parse_config_file, resolve_options,
    resolve_options_tolerant,
};
use serde::Serialize;
use tracing::debug;

use crate::manifest::OptionManifest;

/// Output format for resolved values.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "option-layers", disable_help_subcommand = true)]
#[command(about = "Resolve options from defaults, a config file and a command line")]
struct Cli {
    /// Log pipeline decisions to stderr (RUST_LOG overrides the level).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve final option values and print them.
    Resolve(ResolveArgs),
    /// Render help text for a manifest.
    Help(HelpArgs),
    /// Parse a config file against a manifest without resolving.
    CheckConfig(CheckConfigArgs),
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Option manifest (YAML or JSON).
    #[arg(long)]
    manifest: PathBuf,
    /// Config file layered between defaults and the command line.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report unrecognized arguments instead of failing on them.
    #[arg(long)]
    tolerant: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Command-line arguments to resolve, after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct HelpArgs {
    /// Option manifest (YAML or JSON).
    #[arg(long)]
    manifest: PathBuf,
    /// Target line width.
    #[arg(long)]
    width: Option<usize>,
}

#[derive(Debug, Args)]
struct CheckConfigArgs {
    /// Option manifest (YAML or JSON).
    #[arg(long)]
    manifest: PathBuf,
    /// Config file to check.
    config: PathBuf,
}

#[derive(Debug, Serialize)]
struct ResolveOutput {
    values: OptionValues,
    unrecognized: Vec<String>,
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        init_tracing();
    }

    let result = match cli.command {
        Command::Resolve(args) => run_resolve(args),
        Command::Help(args) => run_help(args),
        Command::CheckConfig(args) => run_check_config(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_resolve(args: ResolveArgs) -> Result<(), String> {
    let manifest = OptionManifest::load(&args.manifest)?;
    let config_text = args.config.as_deref().map(read_config).transpose()?;
    let config_path = args
        .config
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    let config = config_text
        .as_deref()
        .map(|contents| ConfigSource::new(contents, &config_path));

    let output = if args.tolerant {
        let resolved = resolve_options_tolerant(&manifest.options, config, &args.args)
            .map_err(|err| err.to_string())?;
        ResolveOutput {
            values: resolved.values,
            unrecognized: resolved.unrecognized,
        }
    } else {
        let values = resolve_options(&manifest.options, config, &args.args)
            .map_err(|err| err.to_string())?;
        ResolveOutput {
            values,
            unrecognized: Vec::new(),
        }
    };
    debug!(
        options = output.values.len(),
        unrecognized = output.unrecognized.len(),
        "Resolved options"
    );

    let raw = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&output)
            .map_err(|err| format!("JSON serialization failed: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&output)
            .map_err(|err| format!("YAML serialization failed: {err}"))?,
    };
    println!("{}", raw.trim_end());
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let manifest = OptionManifest::load(&args.manifest)?;
    let mut style = HelpStyle::default();
    if let Some(width) = args.width {
        style.width = width;
    }
    print!("{}", format_help_with(&manifest.help_sections(), &style));
    Ok(())
}

fn run_check_config(args: CheckConfigArgs) -> Result<(), String> {
    let manifest = OptionManifest::load(&args.manifest)?;
    let contents = read_config(&args.config)?;
    let path = args.config.display().to_string();
    let values =
        parse_config_file(&contents, &path, &manifest.options).map_err(|err| err.to_string())?;

    let appearances: usize = values.values().map(Vec::len).sum();
    println!(
        "Config '{path}' is valid: {} option(s), {appearances} appearance(s).",
        values.len()
    );
    Ok(())
}

fn read_config(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|err| format!("Failed to read config file '{}': {err}", path.display()))
}
