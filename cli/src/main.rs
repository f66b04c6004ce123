use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use aida_report_core::{Selection, Template, WildcardCategory};
use aida_report_export::{ExportFormat, ExportTarget, export_all};
use aida_report_parser::section::{normalize_report, section_names};
use aida_report_parser::{
    BatchOptions, OutputFormat, collect_report_paths, format_collection, parse_many_with,
    read_report, summary_line,
};
use aida_report_templates::{AppConfig, TemplateCatalog, TemplateStore, builtin_templates};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "aida-report", version)]
#[command(about = "Batch parsing and export of AIDA64 text reports")]
struct Cli {
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse reports and export the results.
    Parse(ParseArgs),
    /// Parse reports and print the results without exporting.
    Preview(PreviewArgs),
    /// List the section headers found in a report.
    Sections(SectionsArgs),
    /// Inspect and manage extraction templates.
    Templates(TemplatesArgs),
}

/// Which items to extract. Without any flag the configured default
/// template is used.
#[derive(Debug, Args)]
struct SelectionArgs {
    /// Template id (see `templates list`).
    #[arg(long, conflicts_with_all = ["items", "item", "all"])]
    template: Option<String>,
    /// File with one item key per line.
    #[arg(long, conflicts_with_all = ["item", "all"])]
    items: Option<PathBuf>,
    /// Item key to extract; may be repeated.
    #[arg(long, conflicts_with = "all")]
    item: Vec<String>,
    /// Extract every item.
    #[arg(long)]
    all: bool,
    /// Skip the installed programs listing even if the template asks for it.
    #[arg(long)]
    no_software: bool,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Report files and/or directories containing `.txt` reports.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    #[command(flatten)]
    selection: SelectionArgs,
    /// Comma-separated export formats (default: from config).
    #[arg(long, value_delimiter = ',')]
    format: Vec<ExportFormat>,
    /// Output directory (default: from config).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Base name of exported files (default: `<prefix>_<timestamp>`).
    #[arg(long)]
    name: Option<String>,
    /// Number of parallel parsing jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
    /// Also print the results to stdout in this format.
    #[arg(long)]
    preview: Option<OutputFormat>,
}

#[derive(Debug, Args)]
struct PreviewArgs {
    /// Report files and/or directories containing `.txt` reports.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    #[command(flatten)]
    selection: SelectionArgs,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
    /// Number of parallel parsing jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct SectionsArgs {
    /// Report file.
    file: PathBuf,
}

#[derive(Debug, Args)]
struct TemplatesArgs {
    #[command(subcommand)]
    operation: TemplatesOperation,
}

#[derive(Debug, Subcommand)]
enum TemplatesOperation {
    /// List template ids with their item counts.
    List,
    /// Print one template as JSON.
    Show(ShowTemplateArgs),
    /// Save a custom template from a JSON file.
    Save(SaveTemplateArgs),
}

#[derive(Debug, Args)]
struct ShowTemplateArgs {
    /// Template id.
    id: String,
}

#[derive(Debug, Args)]
struct SaveTemplateArgs {
    /// Template id; an existing id is overridden.
    id: String,
    /// JSON file holding the template.
    #[arg(long = "from")]
    source: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Command::Parse(args) => run_parse(args, &config),
        Command::Preview(args) => run_preview(args, &config),
        Command::Sections(args) => run_sections(args),
        Command::Templates(args) => run_templates(args, &config),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, String> {
    match path {
        Some(path) => AppConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

fn load_catalog(config: &AppConfig) -> TemplateCatalog {
    let catalog = TemplateCatalog::load(TemplateStore::new(&config.template_store));
    for rejected in catalog.rejected() {
        warn!(%rejected, "Ignoring custom template");
    }
    catalog
}

// ---------------------------------------------------------------------------
// parse / preview commands
// ---------------------------------------------------------------------------

fn run_parse(args: ParseArgs, config: &AppConfig) -> Result<(), String> {
    let formats = export_formats(&args.format, config)?;
    let selection = resolve_selection(&args.selection, config)?;
    let paths = collect_report_paths(&args.inputs).map_err(|e| e.to_string())?;

    let options = BatchOptions {
        jobs: args.jobs.or(config.jobs),
    };
    let collection = parse_many_with(&paths, &selection, &options);

    if let Some(format) = args.preview {
        println!("{}", format_collection(&collection, format)?);
    }

    let base_name = args
        .name
        .unwrap_or_else(|| default_base_name(&config.name_prefix));
    let dir = args.output.unwrap_or_else(|| config.output_dir.clone());
    let target = ExportTarget::new(dir, base_name);

    let written = export_all(&collection, &target, &formats)
        .map_err(|err| format!("Failed to export results: {err}"))?;
    for path in &written {
        println!("Wrote '{}'.", path.display());
    }
    println!("Parsed {}.", summary_line(&collection));

    if collection.failed_count() > 0 {
        eprintln!(
            "{} file(s) could not be parsed; see the error rows in the export.",
            collection.failed_count()
        );
    }
    Ok(())
}

fn run_preview(args: PreviewArgs, config: &AppConfig) -> Result<(), String> {
    let selection = resolve_selection(&args.selection, config)?;
    let paths = collect_report_paths(&args.inputs).map_err(|e| e.to_string())?;

    let options = BatchOptions {
        jobs: args.jobs.or(config.jobs),
    };
    let collection = parse_many_with(&paths, &selection, &options);
    println!("{}", format_collection(&collection, args.format)?);
    Ok(())
}

/// Turns the selection flags into a key filter.
fn resolve_selection(args: &SelectionArgs, config: &AppConfig) -> Result<Selection, String> {
    let selection = if args.all {
        Selection::Unfiltered
    } else if !args.item.is_empty() {
        Selection::keys(&args.item)
    } else if let Some(path) = &args.items {
        let text = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
        let selection = Selection::from_lines(&text);
        if selection.len() == Some(0) {
            return Err(format!("No item keys found in '{}'", path.display()));
        }
        selection
    } else {
        let catalog = load_catalog(config);
        let id = args.template.as_deref().unwrap_or(&config.default_template);
        if !catalog.contains(id) {
            warn!(id, "Unknown template, using standard");
        }
        catalog.selection(id)
    };

    let selection = if args.no_software || !config.include_software {
        selection.without_wildcard(WildcardCategory::InstalledSoftware)
    } else {
        selection
    };
    debug!(keys = ?selection.len(), "Resolved selection");
    Ok(selection)
}

fn export_formats(
    requested: &[ExportFormat],
    config: &AppConfig,
) -> Result<Vec<ExportFormat>, String> {
    if !requested.is_empty() {
        return Ok(requested.to_vec());
    }
    config
        .formats
        .iter()
        .map(|name| ExportFormat::from_str(name).map_err(|e| e.to_string()))
        .collect()
}

fn default_base_name(prefix: &str) -> String {
    format!("{prefix}_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

// ---------------------------------------------------------------------------
// sections command
// ---------------------------------------------------------------------------

fn run_sections(args: SectionsArgs) -> Result<(), String> {
    let raw = read_report(&args.file).map_err(|e| e.to_string())?;
    let text = normalize_report(&raw);
    let names = section_names(&text);
    if names.is_empty() {
        return Err(format!("No sections found in '{}'", args.file.display()));
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// templates command
// ---------------------------------------------------------------------------

fn run_templates(args: TemplatesArgs, config: &AppConfig) -> Result<(), String> {
    match args.operation {
        TemplatesOperation::List => run_templates_list(config),
        TemplatesOperation::Show(args) => run_templates_show(args, config),
        TemplatesOperation::Save(args) => run_templates_save(args, config),
    }
}

fn run_templates_list(config: &AppConfig) -> Result<(), String> {
    let catalog = load_catalog(config);
    let builtin: Vec<&str> = builtin_templates().iter().map(|(id, _)| *id).collect();

    let ids = catalog.list_templates();
    let width = ids.iter().map(|id| id.chars().count()).max().unwrap_or(0);
    for id in ids {
        let template = catalog.get_template(id);
        let origin = if builtin.contains(&id) { "" } else { " [custom]" };
        let padding = " ".repeat(width - id.chars().count());
        println!(
            "{id}{padding}  {} ({} items){origin}",
            template.name,
            template.item_count()
        );
    }

    for rejected in catalog.rejected() {
        eprintln!("ignored {rejected}");
    }
    Ok(())
}

fn run_templates_show(args: ShowTemplateArgs, config: &AppConfig) -> Result<(), String> {
    let catalog = load_catalog(config);
    if !catalog.contains(&args.id) {
        return Err(format!("Unknown template '{}'", args.id));
    }
    let json = serde_json::to_string_pretty(catalog.get_template(&args.id))
        .map_err(|e| format!("Failed to serialize template: {e}"))?;
    println!("{json}");
    Ok(())
}

fn run_templates_save(args: SaveTemplateArgs, config: &AppConfig) -> Result<(), String> {
    let raw = fs::read_to_string(&args.source)
        .map_err(|err| format!("Failed to read '{}': {err}", args.source.display()))?;
    let template: Template = serde_json::from_str(&raw)
        .map_err(|err| format!("Invalid template in '{}': {err}", args.source.display()))?;

    let mut catalog = load_catalog(config);
    let items = template.item_count();
    catalog
        .save_custom(&args.id, template)
        .map_err(|err| format!("Failed to save template '{}': {err}", args.id))?;

    println!(
        "Saved template '{}' ({items} items) to '{}'.",
        args.id,
        config.template_store.display()
    );
    Ok(())
}
