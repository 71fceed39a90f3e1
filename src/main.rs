// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::PathBuf;

use tolk::app_config::{self, Config};
use tolk::app_controller::{Controller, TranslationOutcome};
use tolk::errors::TranslationError;
use tolk::file_utils::FileManager;
use tolk::language_utils;
use tolk::session::{HistoryOrder, HistoryQuery};
use tolk::translation::batch::export_items;
use tolk::translation::{BatchStatus, ExportFormat, QualityScore, generate_pronunciation};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for ExportFormat to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliExportFormat {
    Json,
    Csv,
    Tsv,
    /// Spreadsheet layout with a status column, written as tab-separated text
    Xlsx,
}

impl From<CliExportFormat> for ExportFormat {
    fn from(cli_format: CliExportFormat) -> Self {
        match cli_format {
            CliExportFormat::Json => ExportFormat::Json,
            CliExportFormat::Csv => ExportFormat::Csv,
            CliExportFormat::Tsv => ExportFormat::Tsv,
            CliExportFormat::Xlsx => ExportFormat::TsvWithStatus,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum CliHistoryOrder {
    Newest,
    Oldest,
}

impl From<CliHistoryOrder> for HistoryOrder {
    fn from(order: CliHistoryOrder) -> Self {
        match order {
            CliHistoryOrder::Newest => HistoryOrder::Newest,
            CliHistoryOrder::Oldest => HistoryOrder::Oldest,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text or a plain-text file
    Translate(TranslateArgs),

    /// Detect the language of a text
    Detect {
        /// Text to inspect
        text: String,
    },

    /// Show the primary and chunked alternatives for a text
    Alternatives {
        /// Text to translate
        text: String,
    },

    /// Translate every line of a plain-text file
    Batch(BatchArgs),

    /// Inspect the translation memory
    #[command(subcommand)]
    Memory(MemoryCommand),

    /// Manage glossary terms
    #[command(subcommand)]
    Glossary(GlossaryCommand),

    /// Browse or prune translation history
    #[command(subcommand)]
    History(HistoryCommand),

    /// Manage favorite translations
    #[command(subcommand)]
    Favorites(FavoritesCommand),

    /// Language selection and recent languages
    #[command(subcommand)]
    Languages(LanguagesCommand),

    /// Toggle dark mode
    DarkMode,

    /// Score a translation against its original
    Score {
        original: String,
        translation: String,
    },

    /// Show a pronunciation guide
    Pronounce {
        text: String,
        /// Language of the text
        #[arg(long, default_value = "en")]
        language: String,
    },

    /// Generate shell completions for tolk
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Text to translate
    #[arg(value_name = "TEXT", required_unless_present = "file")]
    text: Option<String>,

    /// Read the text from a plain-text file instead
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Save the translation as a text file in this directory
    #[arg(long)]
    save_to: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Plain-text file with one item per line
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Export format
    #[arg(long, value_enum, default_value = "tsv")]
    format: CliExportFormat,

    /// Directory for the export file; results go to stdout when unset
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Subcommand, Debug)]
enum MemoryCommand {
    /// Entries whose source contains the query, most frequent first
    Search { query: String },
    /// Most recent entries
    List {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Subcommand, Debug)]
enum GlossaryCommand {
    /// Add a term for the selected language pair
    Add { term: String, translation: String },
    /// List all terms
    List,
    /// Remove the term at INDEX
    Remove { index: usize },
    /// Apply the glossary to a text
    Apply { text: String },
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List history, optionally filtered
    List {
        /// Substring of input or output
        #[arg(long)]
        search: Option<String>,
        /// Language on either side of the pair
        #[arg(long)]
        language: Option<String>,
        #[arg(long, value_enum, default_value = "newest")]
        order: CliHistoryOrder,
    },
    /// Delete the entry at INDEX
    Delete { index: usize },
    /// Delete all history
    Clear,
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    /// Toggle the latest translation as a favorite
    Toggle,
    List,
    /// Delete the favorite at INDEX
    Delete { index: usize },
}

#[derive(Subcommand, Debug)]
enum LanguagesCommand {
    /// Persist a source and target language
    Set { source: String, target: String },
    /// Swap source and target
    Swap,
    /// Recently used target languages
    Recent,
}

/// Tolk - translate text from the command line
///
/// Translates through the public Google Translate endpoint and keeps a local
/// translation memory, glossary and history.
#[derive(Parser, Debug)]
#[command(name = "tolk")]
#[command(version)]
#[command(about = "Command-line translator with translation memory")]
#[command(long_about = "Tolk translates text through the public Google Translate endpoint.

EXAMPLES:
    tolk translate \"Good morning\" -t es        # Translate to Spanish
    tolk translate --file notes.txt -t fr       # Translate a text file
    tolk batch lines.txt --format csv -o out/   # Translate every line, export CSV
    tolk glossary add \"cloud\" \"nube\" -s en -t es
    tolk history list --search hello            # Search past translations
    tolk completions bash > tolk.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't
    exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Source language code, or 'auto'
    #[arg(short, long, global = true)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set after the
    // config has been loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "tolk", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&cli)?;
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let controller = Controller::with_config(config)?;
    run_command(&controller, &cli).await
}

/// Load or create the configuration, apply CLI overrides and validate
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(source_lang) = &cli.source_language {
        config.source_language = source_lang.clone();
    }
    if let Some(target_lang) = &cli.target_language {
        config.target_language = target_lang.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

/// Language pair for this invocation: flags win over persisted preferences
fn language_pair(controller: &Controller, cli: &CommandLineOptions) -> (String, String) {
    let preferences = controller.with_session(|s| s.preferences().clone());
    (
        cli.source_language
            .clone()
            .unwrap_or(preferences.source_language),
        cli.target_language
            .clone()
            .unwrap_or(preferences.target_language),
    )
}

async fn run_command(controller: &Controller, cli: &CommandLineOptions) -> Result<()> {
    let (source_lang, target_lang) = language_pair(controller, cli);

    match &cli.command {
        Commands::Translate(args) => run_translate(controller, args, &source_lang, &target_lang).await,

        Commands::Detect { text } => {
            let detection = controller.detect(text).await;
            println!(
                "{} ({}), confidence {}%",
                detection.language_name, detection.language, detection.confidence
            );
            Ok(())
        }

        Commands::Alternatives { text } => {
            let alternatives = controller
                .alternatives(text, &source_lang, &target_lang)
                .await?;
            for alternative in alternatives {
                println!(
                    "[{:?} {}%] {}",
                    alternative.method, alternative.confidence, alternative.text
                );
            }
            Ok(())
        }

        Commands::Batch(args) => run_batch(controller, args, &source_lang, &target_lang).await,

        Commands::Memory(command) => {
            controller.with_memory(|memory| match command {
                MemoryCommand::Search { query } => {
                    for entry in memory.search_memory(query, &source_lang, &target_lang) {
                        println!("{}x  {} -> {}", entry.frequency, entry.source, entry.target);
                    }
                }
                MemoryCommand::List { limit } => {
                    for entry in memory.recent(*limit) {
                        println!(
                            "[{}->{}] {} -> {}",
                            entry.source_lang, entry.target_lang, entry.source, entry.target
                        );
                    }
                }
            });
            Ok(())
        }

        Commands::Glossary(command) => controller.with_memory(|memory| -> Result<()> {
            match command {
                GlossaryCommand::Add { term, translation } => {
                    memory.add_to_glossary(term, translation, &source_lang, &target_lang)?;
                    info!("Added glossary term '{}'", term);
                }
                GlossaryCommand::List => {
                    for (index, entry) in memory.glossary().iter().enumerate() {
                        println!(
                            "{:>3}  [{}->{}] {} = {}",
                            index, entry.source_lang, entry.target_lang, entry.term, entry.translation
                        );
                    }
                }
                GlossaryCommand::Remove { index } => match memory.remove_glossary(*index)? {
                    Some(entry) => info!("Removed glossary term '{}'", entry.term),
                    None => warn!("No glossary term at index {}", index),
                },
                GlossaryCommand::Apply { text } => {
                    println!("{}", memory.apply_glossary(text, &source_lang, &target_lang));
                }
            }
            Ok(())
        }),

        Commands::History(command) => run_history(controller, command),

        Commands::Favorites(command) => controller.with_session(|session| -> Result<()> {
            match command {
                FavoritesCommand::Toggle => {
                    let latest = session
                        .history()
                        .first()
                        .cloned()
                        .ok_or_else(|| anyhow!("No translation to save"))?;
                    if session.toggle_favorite(&latest)? {
                        info!("Added to favorites");
                    } else {
                        info!("Removed from favorites");
                    }
                }
                FavoritesCommand::List => {
                    for (index, favorite) in session.favorites().iter().enumerate() {
                        println!("{:>3}  {} -> {}", index, favorite.input, favorite.output);
                    }
                }
                FavoritesCommand::Delete { index } => {
                    if session.delete_favorite(*index)?.is_none() {
                        warn!("No favorite at index {}", index);
                    }
                }
            }
            Ok(())
        }),

        Commands::Languages(command) => controller.with_session(|session| -> Result<()> {
            match command {
                LanguagesCommand::Set { source, target } => {
                    session.set_languages(source, target)?;
                    info!(
                        "Translating {} -> {}",
                        language_utils::display_name(source),
                        language_utils::display_name(target)
                    );
                }
                LanguagesCommand::Swap => {
                    if !session.swap_languages()? {
                        warn!("Cannot swap with auto-detect");
                    }
                    let preferences = session.preferences();
                    println!("{} -> {}", preferences.source_language, preferences.target_language);
                }
                LanguagesCommand::Recent => {
                    for language in session.recent_languages() {
                        println!("{}  {}", language.code, language.name);
                    }
                }
            }
            Ok(())
        }),

        Commands::DarkMode => {
            let enabled = controller.with_session(|session| session.toggle_dark_mode())?;
            println!("Dark mode {}", if enabled { "on" } else { "off" });
            Ok(())
        }

        Commands::Score {
            original,
            translation,
        } => {
            let quality = QualityScore::of(original, translation);
            println!("{} ({} stars)", quality.score, quality.stars);
            Ok(())
        }

        Commands::Pronounce { text, language } => {
            println!("{}", generate_pronunciation(text, language));
            Ok(())
        }

        Commands::Completions { .. } => Ok(()),
    }
}

async fn run_translate(
    controller: &Controller,
    args: &TranslateArgs,
    source_lang: &str,
    target_lang: &str,
) -> Result<()> {
    let result = match (&args.file, &args.text) {
        (Some(path), _) => controller.translate_file(path, source_lang, target_lang).await,
        (None, Some(text)) => controller.translate(text, source_lang, target_lang).await,
        (None, None) => return Err(anyhow!("Nothing to translate")),
    };

    let outcome = match result {
        Ok(Some(outcome)) => outcome,
        Ok(None) => {
            warn!("Nothing to translate");
            return Ok(());
        }
        Err(e @ TranslationError::RateLimitExceeded { .. }) => {
            error!("{}. Please wait a moment.", e);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    if let Some(dir) = &args.save_to {
        let path = dir.join(FileManager::download_filename(&outcome.target_lang));
        FileManager::write_atomic(&path, &outcome.output)?;
        info!("Saved {}", path.display());
    }
    Ok(())
}

fn print_outcome(outcome: &TranslationOutcome) {
    println!("{}", outcome.output);
    if let Some(detection) = &outcome.detection {
        info!(
            "Detected {} ({}%)",
            detection.language_name, detection.confidence
        );
    }
    info!(
        "Quality {} ({} stars), pronunciation: {}",
        outcome.quality.score, outcome.quality.stars, outcome.pronunciation
    );
    if outcome.truncated {
        warn!("Input was truncated before translating");
    }
}

async fn run_batch(
    controller: &Controller,
    args: &BatchArgs,
    source_lang: &str,
    target_lang: &str,
) -> Result<()> {
    let texts = FileManager::read_batch_lines(&args.input_file)?;
    let items = controller
        .run_batch(texts, source_lang, target_lang, !args.no_progress)
        .await?;

    let failed = items
        .iter()
        .filter(|item| item.status == BatchStatus::Failed)
        .count();
    info!("Batch done: {} of {} translated", items.len() - failed, items.len());

    let format: ExportFormat = args.format.clone().into();
    let exported = export_items(&items, format);
    match &args.output_dir {
        Some(dir) => {
            let path = FileManager::export_path(dir, format.extension());
            FileManager::write_atomic(&path, &exported)?;
            info!("Exported {}", path.display());
        }
        None => println!("{}", exported),
    }
    Ok(())
}

fn run_history(controller: &Controller, command: &HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List {
            search,
            language,
            order,
        } => {
            let query = HistoryQuery {
                term: search.clone(),
                language: language.clone(),
                order: order.clone().into(),
            };
            let entries = controller.history(&query);
            if entries.is_empty() {
                println!("No history yet");
            }
            for entry in entries {
                println!(
                    "{}  [{}->{}] {} -> {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.source_lang,
                    entry.target_lang,
                    entry.input,
                    entry.output
                );
            }
        }
        HistoryCommand::Delete { index } => {
            if controller
                .with_session(|session| session.delete_history(*index))?
                .is_none()
            {
                warn!("No history entry at index {}", index);
            }
        }
        HistoryCommand::Clear => controller.with_session(|session| session.clear_history())?,
    }
    Ok(())
}
