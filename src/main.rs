//! sbom-vuln-diff: vulnerability diff between two SBOM + scan revisions
//!
//! Normalizes Grype-style scan results against CycloneDX SBOMs, diffs two
//! revisions and rolls the diff up by module.

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use sbom_vuln_diff::{
    cli,
    config::{self, AppConfig, ConfigPreset, Validatable, file::CONFIG_FILE_NAMES},
    model::{RevisionInfo, Severity},
    pipeline::{RevisionJob, RevisionPaths, exit_codes},
    VulnDiffError,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sbom-vuln-diff")]
#[command(version)]
#[command(about = "Vulnerability diff between two SBOM + scan result revisions", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    2  New findings at or above --fail-on-new
    3  Error occurred

EXAMPLES:
    # Normalize one revision
    sbom-vuln-diff normalize --sbom bom.json --scan grype.json --name head -O head.json

    # Diff two normalized documents and gate on new HIGH findings
    sbom-vuln-diff diff base.json head.json --fail-on-new high -O diff.json

    # Everything at once
    sbom-vuln-diff run --base-sbom a/bom.json --base-scan a/grype.json \\
        --head-sbom b/bom.json --head-scan b/grype.json --out-dir report/")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write compact JSON instead of pretty-printed JSON
    #[arg(long, global = true)]
    compact: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Path search overrides shared by commands that normalize.
#[derive(Args, Clone, Default)]
struct PathArgs {
    /// Dependency paths requested per component
    #[arg(long)]
    path_limit: Option<usize>,

    /// Maximum hops from a component toward a root
    #[arg(long)]
    max_depth: Option<usize>,

    /// Cap on merged paths per occurrence
    #[arg(long)]
    max_paths: Option<usize>,
}

/// Revision labelling shared by commands that normalize.
#[derive(Args, Clone)]
struct RevisionArgs {
    /// Display name of the revision
    #[arg(long, default_value = "head")]
    name: String,

    /// Git ref the revision was built from
    #[arg(long)]
    git_ref: Option<String>,

    /// Commit id
    #[arg(long)]
    commit: Option<String>,
}

/// Arguments for the `normalize` subcommand
#[derive(Parser)]
struct NormalizeArgs {
    /// CycloneDX JSON SBOM
    #[arg(long)]
    sbom: PathBuf,

    /// Grype JSON scan result
    #[arg(long)]
    scan: PathBuf,

    #[command(flatten)]
    revision: RevisionArgs,

    #[command(flatten)]
    paths: PathArgs,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Normalized document of the base revision
    base: PathBuf,

    /// Normalized document of the head revision
    head: PathBuf,

    /// Exit with code 2 if a NEW finding at or above this severity exists
    #[arg(long)]
    fail_on_new: Option<Severity>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `aggregate` subcommand
#[derive(Parser)]
struct AggregateArgs {
    /// Diff document
    diff: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `run` subcommand
#[derive(Parser)]
struct RunArgs {
    /// Base revision SBOM
    #[arg(long)]
    base_sbom: PathBuf,

    /// Base revision scan result
    #[arg(long)]
    base_scan: PathBuf,

    /// Head revision SBOM
    #[arg(long)]
    head_sbom: PathBuf,

    /// Head revision scan result
    #[arg(long)]
    head_scan: PathBuf,

    /// Display name of the base revision
    #[arg(long, default_value = "base")]
    base_name: String,

    /// Display name of the head revision
    #[arg(long, default_value = "head")]
    head_name: String,

    /// Git ref the base revision was built from
    #[arg(long)]
    base_git_ref: Option<String>,

    /// Base revision commit id
    #[arg(long)]
    base_commit: Option<String>,

    /// Git ref the head revision was built from
    #[arg(long)]
    head_git_ref: Option<String>,

    /// Head revision commit id
    #[arg(long)]
    head_commit: Option<String>,

    #[command(flatten)]
    paths: PathArgs,

    /// Exit with code 2 if a NEW finding at or above this severity exists
    #[arg(long)]
    fail_on_new: Option<Severity>,

    /// Directory receiving the documents (falls back to output.dir, then ".")
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize one revision's scan result against its SBOM
    Normalize(NormalizeArgs),

    /// Diff two normalized documents
    Diff(DiffArgs),

    /// Aggregate a diff document by module, risk and fix availability
    Aggregate(AggregateArgs),

    /// Normalize both revisions, diff and aggregate in one go
    Run(RunArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .sbom-vuln-diff.yaml in the current directory
    Init {
        /// Preset to start from
        #[arg(long, value_enum, default_value_t = ConfigPreset::Default)]
        preset: ConfigPreset,
    },
}

impl RunArgs {
    /// Base and head jobs, each carrying its own revision metadata.
    fn jobs(&self) -> (RevisionJob, RevisionJob) {
        let base = RevisionJob {
            paths: RevisionPaths::new(&self.base_sbom, &self.base_scan),
            info: RevisionInfo::new(&self.base_name)
                .with_git_ref(self.base_git_ref.clone())
                .with_commit(self.base_commit.clone()),
        };
        let head = RevisionJob {
            paths: RevisionPaths::new(&self.head_sbom, &self.head_scan),
            info: RevisionInfo::new(&self.head_name)
                .with_git_ref(self.head_git_ref.clone())
                .with_commit(self.head_commit.clone()),
        };
        (base, head)
    }
}

// ============================================================================
// Configuration layering
// ============================================================================

/// Load the config file and layer CLI flags over it.
fn effective_config(
    cli: &Cli,
    paths: Option<&PathArgs>,
    fail_on_new: Option<Severity>,
) -> Result<AppConfig> {
    let mut builder = AppConfig::builder()
        .quiet(cli.quiet)
        .pretty(!cli.compact)
        .fail_on_new(fail_on_new);
    if let Some(paths) = paths {
        if let Some(limit) = paths.path_limit {
            builder = builder.path_limit(limit);
        }
        if let Some(depth) = paths.max_depth {
            builder = builder.max_depth(depth);
        }
        if let Some(max) = paths.max_paths {
            builder = builder.max_paths(max);
        }
    }

    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &builder.build());
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(VulnDiffError::config(joined).into());
    }
    Ok(config)
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match dispatch(&cli) {
        Ok(code) if code != exit_codes::SUCCESS => std::process::exit(code),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn dispatch(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Normalize(args) => {
            let config = effective_config(cli, Some(&args.paths), None)?;
            cli::run_normalize(cli::NormalizeCommand {
                paths: RevisionPaths::new(&args.sbom, &args.scan),
                revision: RevisionInfo::new(&args.revision.name)
                    .with_git_ref(args.revision.git_ref.clone())
                    .with_commit(args.revision.commit.clone()),
                output: args.output_file.clone(),
                config,
            })
        }

        Commands::Diff(args) => {
            let config = effective_config(cli, None, args.fail_on_new)?;
            cli::run_diff(cli::DiffCommand {
                base: args.base.clone(),
                head: args.head.clone(),
                output: args.output_file.clone(),
                config,
            })
        }

        Commands::Aggregate(args) => {
            let config = effective_config(cli, None, None)?;
            cli::run_aggregate(cli::AggregateCommand {
                diff: args.diff.clone(),
                output: args.output_file.clone(),
                config,
            })
        }

        Commands::Run(args) => {
            let config = effective_config(cli, Some(&args.paths), args.fail_on_new)?;
            let output_dir = args
                .out_dir
                .clone()
                .or_else(|| config.output.dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            let (base, head) = args.jobs();
            cli::run_all(cli::RunCommand {
                base,
                head,
                output_dir,
                config,
            })
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "sbom-vuln-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema().context("failed to generate schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => run_config_action(cli, action),
    }
}

fn run_config_action(cli: &Cli, action: &ConfigAction) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir().ok().map(|p| p.display().to_string()),
                ::dirs::config_dir().map(|p| p.join("sbom-vuln-diff").display().to_string()),
                ::dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order, git root after the first):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in CONFIG_FILE_NAMES {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init { preset } => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".sbom-vuln-diff.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            std::fs::write(&target, config::generate_example_config(*preset))
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {} ({})", target.display(), preset.description());
        }
    }
    Ok(exit_codes::SUCCESS)
}
