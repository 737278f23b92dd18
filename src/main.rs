use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use dedupx::{
    prompt_behavior, run, CachedLemmatizer, Catalog, FunctionRecord, Lemmatizer, PatternRecord,
    RunConfig, Scraper, SearchMode, SurfaceLemmatizer, TextEncoding, DEFAULT_THRESHOLD,
};
use dedupx_storage::{load_catalog, load_lemmas, save_catalog};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Probable duplicate detection for free-form inventory catalogs
#[derive(Parser, Debug)]
#[command(name = "dedupx")]
#[command(about = "Find probable duplicates in an inventory catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a sample of the source file and report probable duplicates
    Run(RunArgs),

    /// Create or edit a rule catalog artifact
    #[command(subcommand)]
    Catalog(CatalogCommand),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Input file with inventory items, one per line
    source_file: PathBuf,

    /// Pick items containing any or all of the keywords
    search_mode: SearchMode,

    /// Words to pick items by. Lower case matches any case, other words match exactly
    #[arg(required = true)]
    keywords: Vec<String>,

    /// Words to filter items out. Any word excludes an item
    #[arg(short, long, num_args = 0..)]
    exclude: Vec<String>,

    /// Minimum similarity ratio of reported pairs
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Rule catalog artifact (builtin catalog when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// JSON lemma dictionary (word forms are their own lemmas when omitted)
    #[arg(long)]
    lemmas: Option<PathBuf>,

    /// Extra stop words, one per line
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Attributes compared strongly
    #[arg(long, value_delimiter = ',')]
    strong: Vec<String>,

    /// Attributes compared as a group
    #[arg(long, value_delimiter = ',')]
    grouped: Vec<String>,

    /// Attributes left out of comparison
    #[arg(long, value_delimiter = ',')]
    ignore: Vec<String>,

    /// Directory for reports
    #[arg(long, default_value = dedupx::pipeline::DEFAULT_REPORTS_DIR)]
    reports_dir: PathBuf,

    /// Directory for the next iteration's source and keywords
    #[arg(long, default_value = dedupx::pipeline::DEFAULT_SOURCES_DIR)]
    sources_dir: PathBuf,

    /// Encoding of the source file and the CSV outputs (utf-8 or windows-1251)
    #[arg(long, default_value = "utf-8")]
    encoding: TextEncoding,
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Write the builtin catalog to a file
    Init {
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Map keywords to tags
    AddTags {
        path: PathBuf,
        #[arg(long, required = true, num_args = 1..)]
        keywords: Vec<String>,
        #[arg(long, required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Add a pattern rule with head, attribute and tail groups
    AddPattern {
        path: PathBuf,
        #[arg(long)]
        attr: String,
        #[arg(long)]
        pattern: String,
        #[arg(long, required = true, num_args = 1..)]
        tags: Vec<String>,
    },

    /// Add a function rule
    AddFunction {
        path: PathBuf,
        #[arg(long)]
        attr: String,
        #[arg(long)]
        func: Scraper,
        #[arg(long, required = true, num_args = 1..)]
        tags: Vec<String>,
    },
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        RunConfig {
            source_file: args.source_file,
            mode: args.search_mode,
            keywords: args.keywords,
            exclude: args.exclude,
            threshold: args.threshold,
            catalog: args.catalog,
            stopwords: args.stopwords,
            strong: args.strong,
            grouped: args.grouped,
            ignore: args.ignore,
            reports_dir: args.reports_dir,
            sources_dir: args.sources_dir,
            encoding: args.encoding,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Run(args) => run_command(args),
        Command::Catalog(command) => catalog_command(command),
    }
}

fn run_command(args: RunArgs) -> anyhow::Result<()> {
    let lemmatizer: Box<dyn Lemmatizer> = match &args.lemmas {
        Some(path) => Box::new(CachedLemmatizer::new(load_lemmas(path)?)),
        None => Box::new(CachedLemmatizer::new(SurfaceLemmatizer)),
    };
    let config = RunConfig::from(args);

    info!("Starting dedupx v{}", env!("CARGO_PKG_VERSION"));
    info!("Source file: {:?}", config.source_file);

    let summary = run(&config, lemmatizer.as_ref(), |attrs, preset| {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        Ok(prompt_behavior(attrs, preset, &mut input, &mut output)?)
    })?;

    info!(
        selected = summary.selected,
        clones = summary.clone_lines,
        parsed = summary.parsed,
        pairs = summary.pairs,
        next_source = summary.next_source,
        "run finished"
    );
    for path in &summary.reports {
        println!("{}", path.display());
    }
    Ok(())
}

fn catalog_command(command: CatalogCommand) -> anyhow::Result<()> {
    match command {
        CatalogCommand::Init { path, force } => {
            if path.exists() && !force {
                bail!("{} already exists, use --force to overwrite", path.display());
            }
            save_catalog(&path, &Catalog::builtin())?;
        }
        CatalogCommand::AddTags { path, keywords, tags } => {
            let mut catalog = load_catalog(&path)?;
            catalog.add_tags(&keywords, &tags);
            save_catalog(&path, &catalog)?;
        }
        CatalogCommand::AddPattern { path, attr, pattern, tags } => {
            let mut catalog = load_catalog(&path)?;
            catalog
                .add_pattern(PatternRecord {
                    pattern,
                    attr_captured: attr.clone(),
                    tags,
                })
                .with_context(|| format!("pattern rule for '{}' rejected", attr))?;
            save_catalog(&path, &catalog)?;
        }
        CatalogCommand::AddFunction { path, attr, func, tags } => {
            let mut catalog = load_catalog(&path)?;
            catalog.add_function(FunctionRecord {
                func_name: func,
                attr_captured: attr,
                tags,
            });
            save_catalog(&path, &catalog)?;
        }
    }
    Ok(())
}
