/// Command line interface for the `mpmeta` binary
///
/// Modules:
/// - output: JSON / NDJSON writers for documents and path maps
///
/// Single-file commands print one document (`null` when a module has no
/// registration call) and fail the process on read or parse errors. Batch
/// commands print a path map and omit files that fail.
pub mod output;

pub use output::{OutputFormat, OutputWriter};

use crate::api::paths_from_json;
use crate::batch::{discover_files, BatchConfig, ParallelExtractor};
use crate::config::{MetaConfig, CONFIG_FILE_NAME};
use crate::extractors::meta::ComponentKind;
use crate::extractors::ExtractorManager;
use crate::language::Grammar;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "mpmeta")]
#[command(about = "Extract component, page and stylesheet metadata from mini-program sources", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./mpmeta.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of worker threads for batch commands (defaults to CPU count)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value = "json", global = true)]
    pub format: OutputFormatArg,

    /// Report batch progress on stderr
    #[arg(long, global = true)]
    pub progress: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract metadata from one component or page module
    Script {
        /// Path to the module
        file: PathBuf,

        /// Only recognise registrations of this kind
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Extract metadata from many modules in parallel
    Scripts(BatchArgs),

    /// Extract class selectors and imports from one stylesheet
    Css {
        /// Path to the stylesheet
        file: PathBuf,
    },

    /// Extract many stylesheets and their import closure in parallel
    CssFiles(BatchArgs),
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Files to extract
    pub paths: Vec<String>,

    /// Directory to scan recursively for matching files
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Read a JSON array of paths from stdin
    #[arg(long)]
    pub stdin: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    /// Pretty-printed JSON
    Json,
    /// Newline-delimited JSON
    Ndjson,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Ndjson => OutputFormat::Ndjson,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Component,
    Page,
}

impl From<KindArg> for ComponentKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Component => ComponentKind::Component,
            KindArg::Page => ComponentKind::Page,
        }
    }
}

/// Execute a parsed command line, writing results to stdout
pub fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(threads) = cli.threads {
        config.threads = Some(threads);
    }

    let batch_config = BatchConfig {
        report_progress: cli.progress,
        ..BatchConfig::from_meta(&config)
    };
    let manager = ExtractorManager::new(config);
    let mut writer = OutputWriter::new(cli.format.into(), io::stdout().lock());

    match cli.command {
        Commands::Script { file, kind } => {
            let meta = manager
                .parse_script_file(&file, kind.map(ComponentKind::from))
                .with_context(|| format!("Failed to extract {}", file.display()))?;
            writer.write_document(&meta)?;
        }
        Commands::Css { file } => {
            let meta = manager
                .parse_css_file(&file)
                .with_context(|| format!("Failed to extract {}", file.display()))?;
            writer.write_document(&meta)?;
        }
        Commands::Scripts(args) => {
            let paths = collect_paths(&args, Grammar::Script, io::stdin())?;
            let results = ParallelExtractor::new(manager, batch_config).extract_scripts(&paths);
            writer.write_map(&results)?;
        }
        Commands::CssFiles(args) => {
            let paths = collect_paths(&args, Grammar::Style, io::stdin())?;
            let results = ParallelExtractor::new(manager, batch_config).extract_stylesheets(&paths);
            writer.write_map(&results)?;
        }
    }

    Ok(())
}

/// Explicit `--config` wins; otherwise `./mpmeta.toml` is used when present
pub fn load_config(path: Option<&Path>) -> Result<MetaConfig> {
    let config = match path {
        Some(path) => MetaConfig::load(path)?,
        None if Path::new(CONFIG_FILE_NAME).is_file() => MetaConfig::load(Path::new(CONFIG_FILE_NAME))?,
        None => MetaConfig::default(),
    };
    Ok(config)
}

/// Positional paths, then `--dir` discoveries, then the `--stdin` list
pub fn collect_paths<R: Read>(args: &BatchArgs, grammar: Grammar, mut stdin: R) -> Result<Vec<String>> {
    let mut paths = args.paths.clone();

    if let Some(dir) = &args.dir {
        paths.extend(discover_files(dir, grammar)?);
    }

    if args.stdin {
        let mut input = String::new();
        stdin.read_to_string(&mut input).context("Failed to read path list from stdin")?;
        let value: serde_json::Value =
            serde_json::from_str(&input).context("stdin is not valid JSON")?;
        paths.extend(paths_from_json(&value)?);
    }

    debug!("Collected {} {} paths", paths.len(), grammar.name());
    Ok(paths)
}
