use chrono::Local;
use clap::{Parser, Subcommand};
use rasterkit::config::{self, EngineConfig};
use rasterkit::imaging::OutputFormat;
use rasterkit::output;
use rasterkit::pipeline::{Engine, ProcessError};
use rasterkit::project::{self, ProjectDraft};
use rasterkit::registry::Category;
use rasterkit::settings::{SettingValue, parse_override};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rasterkit")]
#[command(about = "Preset-driven image effects")]
#[command(long_about = "\
Preset-driven image effects

Every tool takes an optional input image, a preset and per-setting overrides,
and writes one output image. Tools run without an input render a generated
canvas instead (the logo maker draws a logo).

  rasterkit tools --category \"photo effects\"
  rasterkit presets logo-maker
  rasterkit process logo-maker --preset bold-geometric --set fontSize=60 --output logo.png
  rasterkit process sketch-pencil-art --input cat.jpg --output cat-sketch.webp

The output format follows the output file extension (png, jpg, webp, avif),
falling back to [output] format in rasterkit.toml.

Run 'rasterkit gen-config' to generate a documented rasterkit.toml.")]
#[command(version)]
struct Cli {
    /// Engine config file (default: ./rasterkit.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline decisions (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List tools grouped by category
    Tools {
        /// Only show one category (e.g. "editing tools")
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a tool's presets and settings
    Presets {
        /// Tool id, e.g. logo-maker
        tool: String,
    },
    /// Run a tool and write the result
    Process(ProcessArgs),
    /// Print a stock rasterkit.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ProcessArgs {
    /// Tool id, e.g. mini-world-generator
    tool: String,

    /// Input image (required for edit tools)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Preset id (default: the tool's default preset)
    #[arg(long, default_value = "")]
    preset: String,

    /// Override one setting, repeatable: --set fontSize=60
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    overrides: Vec<(String, SettingValue)>,

    /// Output file (default: <tool>-<millis>.png)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Also write the project hand-off JSON here
    #[arg(long)]
    project: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Tools { category } => {
            let engine = Engine::new(load_engine_config(cli.config.as_deref())?);
            let only = match category {
                Some(name) => Some(
                    Category::parse(&name).ok_or_else(|| format!("Unknown category: {name}"))?,
                ),
                None => None,
            };
            output::print_tools(engine.registry(), only);
        }
        Command::Presets { tool } => {
            let engine = Engine::new(load_engine_config(cli.config.as_deref())?);
            let descriptor = engine
                .registry()
                .by_id(&tool)
                .ok_or_else(|| ProcessError::UnknownTool(tool.clone()))?;
            output::print_presets(descriptor, engine.schemas().schema_for(&tool));
        }
        Command::Process(args) => {
            let engine_config = load_engine_config(cli.config.as_deref())?;
            init_thread_pool(&engine_config.processing);
            let engine = Engine::new(engine_config);
            run_process(&engine, args)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run_process(engine: &Engine, args: ProcessArgs) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = engine
        .registry()
        .by_id(&args.tool)
        .ok_or_else(|| ProcessError::UnknownTool(args.tool.clone()))?;
    if descriptor.input_mode.requires_input() && args.input.is_none() {
        return Err(format!("{} needs an input image (--input)", descriptor.name).into());
    }

    let overrides: BTreeMap<String, SettingValue> = args.overrides.into_iter().collect();
    let resolved = engine.schemas().resolve(&args.tool, &args.preset, &overrides);

    let input = args.input.as_deref().map(std::fs::read).transpose()?;
    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(project::download_file_name(
            &args.tool,
            Local::now().timestamp_millis(),
        ))
    });
    let format = output
        .extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or(engine.config().output.format);

    let result = engine.process_as(&args.tool, input.as_deref(), &resolved, format)?;
    std::fs::write(&output, &result.encoded)?;

    if let Some(project_path) = &args.project {
        let input_name = args
            .input
            .as_deref()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str());
        let date = Local::now().format("%Y-%m-%d").to_string();
        let draft = ProjectDraft::new(
            descriptor,
            &args.preset,
            &resolved,
            input_name,
            &result,
            &date,
        )?;
        std::fs::write(project_path, draft.to_json()?)?;
    }

    output::print_process_output(
        descriptor,
        args.input.as_deref(),
        &result,
        &output,
        args.project.as_deref(),
    );
    Ok(())
}

/// `--config` must exist when given; otherwise `./rasterkit.toml` is optional.
fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig, config::ConfigError> {
    match path {
        Some(path) if !path.exists() => Err(config::ConfigError::Validation(format!(
            "config file not found: {}",
            path.display()
        ))),
        Some(path) => config::load_config_file(path),
        None => config::load_config(Path::new(".")),
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "rasterkit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Size the global rayon pool from `[processing]`, capped at the core count.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
