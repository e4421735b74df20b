use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use spellscan::analyzer::{self, FailOn, Report};
use spellscan::cli::output::{self, OutputFormat};
use spellscan::config::{Config, Overrides};
use spellscan::scanner::{LineAttribution, Scanner};
use spellscan::{dict, SpellChecker};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_FINDINGS: u8 = 1;
const EXIT_FATAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "spellscan")]
#[command(version, about = "Find misspellings in source comments and string literals", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Project directory to scan
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Report format (json, text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Which findings fail the run (none, comment, code, any)
    #[arg(long)]
    fail_on: Option<FailOn>,

    /// Exit with code 0 even if the failure policy trips
    #[arg(long)]
    no_fail: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (skips global and local lookup)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Language/dictionary to use (e.g., en_US, en_GB)
    #[arg(short, long)]
    language: Option<String>,

    /// Dictionary file to use instead of the installed one
    #[arg(long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Personal dictionary file
    #[arg(long, value_name = "FILE")]
    personal_dict: Option<PathBuf>,

    /// Words matching this regex are never reported
    #[arg(long)]
    ignore_pattern: Vec<String>,

    /// File extension to scan (repeatable; replaces the configured set)
    #[arg(short, long = "extension", value_name = "EXT")]
    extensions: Vec<String>,

    /// Line comment marker
    #[arg(long)]
    comment_marker: Option<String>,

    /// Line numbering for string-literal findings (first-occurrence, span-start)
    #[arg(long)]
    line_attribution: Option<LineAttribution>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Download a dictionary
    Download {
        /// Language code (en_US, en_GB)
        language: String,
    },
    /// Build a dictionary from a word list, one word per line
    Build {
        /// Language code to install the dictionary as
        language: String,
        /// Word list file
        wordlist: PathBuf,
    },
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(EXIT_FATAL);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("Failed to initialize logging")
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellscan", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(command) = cli.command {
        handle_command(command)?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(root) = cli.path.clone() else {
        anyhow::bail!("No path specified. Use --help for usage information.");
    };

    let overrides = Overrides {
        language: cli.language,
        dictionary: cli.dictionary,
        personal_dictionary: cli.personal_dict,
        ignore_patterns: cli.ignore_pattern,
        extensions: cli.extensions,
        comment_marker: cli.comment_marker,
        line_attribution: cli.line_attribution,
        fail_on: cli.fail_on,
    };
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path, overrides)?,
        None => Config::load(overrides)?,
    };
    tracing::debug!(?config, "configuration loaded");

    // One oracle for the whole run, shared by every file scan.
    let checker = SpellChecker::new(&config)?;
    let scanner = Scanner::from_config(&checker, &config);
    let report = analyzer::analyze_project(&scanner, &root, &config.extensions);

    let colored_output = !cli.no_color && cli.output.is_none();
    let rendered = output::render(&report, cli.format, colored_output)?;
    match &cli.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered.trim_end()),
    }

    if let Report::Invalid { error } = &report {
        tracing::error!("{}", error);
        return Ok(ExitCode::from(EXIT_FATAL));
    }

    // With `-o`, stdout only confirms the save and the summary goes to stderr.
    if cli.format == OutputFormat::Text {
        let summary = output::format_summary(&report.summary(), colored_output);
        match &cli.output {
            Some(_) => eprintln!("{}", summary),
            None => println!("\n{}", summary),
        }
    }

    if report.fails(config.fail_on) && !cli.no_fail {
        return Ok(ExitCode::from(EXIT_FINDINGS));
    }

    Ok(ExitCode::SUCCESS)
}

fn handle_command(command: Commands) -> Result<()> {
    let data_dir = dict::manager::data_dir()?;

    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => dict::manager::print_list(&data_dir)?,
            DictCommands::Download { language } => {
                let installed = dict::manager::download(&data_dir, &language)?;
                dict::manager::print_installed(&installed);
            }
            DictCommands::Build { language, wordlist } => {
                let installed =
                    dict::manager::build_from_wordlist(&data_dir, &language, &wordlist)?;
                dict::manager::print_installed(&installed);
            }
            DictCommands::Info { language } => dict::manager::print_info(&data_dir, &language)?,
        },
    }
    Ok(())
}
