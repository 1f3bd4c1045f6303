//! Skillcheck CLI - Command-line interface for skill document validation
//!
//! Architecture: Application Layer - CLI coordinates user interactions with domain services
//! - Translates user commands to domain operations
//! - Handles external concerns like file I/O, process exit codes, and terminal output
//! - Provides clean separation between user interface and validation logic

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use skillcheck::{
    OutputFormat, ParserKind, ReportFormatter, ReportOptions, SchemaConfig, SkillValidator,
};
use std::path::PathBuf;
use std::process;

/// Skillcheck - Schema validation for skill description documents
#[derive(Parser)]
#[command(name = "skillcheck")]
#[command(version = "0.1.0")]
#[command(about = "Validates skill documents against the skill schema")]
#[command(
    long_about = "Skillcheck checks a skill document's frontmatter and body against naming, \
                  length, and content-quality rules, and reports blocking errors separately \
                  from advisory warnings. Designed for packaging workflows and CI integration."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check skill files or directories against the schema
    Check {
        /// Paths to validate (SKILL.md files or skill directories)
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormatArg,

        /// Use the restricted key:value frontmatter parser
        #[arg(long)]
        fallback_parser: bool,

        /// Suppress warnings in human output
        #[arg(long)]
        no_warnings: bool,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Configuration file to validate
        config_file: Option<PathBuf>,
    },

    /// Show the effective schema limits and word lists
    Schema,
}

#[derive(Copy, Clone, ValueEnum, PartialEq)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run_command(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run_command(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Check { paths, format, fallback_parser, no_warnings } => run_check(
            cli.config,
            paths,
            format,
            fallback_parser,
            !cli.no_color,
            !no_warnings,
        ),
        Commands::ValidateConfig { config_file } => {
            run_validate_config(config_file.or(cli.config))
        }
        Commands::Schema => run_show_schema(cli.config),
    }
}

fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<SchemaConfig> {
    match config_path {
        Some(path) => SchemaConfig::load_from_file(&path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(SchemaConfig::default()),
    }
}

fn run_check(
    config_path: Option<PathBuf>,
    paths: Vec<PathBuf>,
    format: OutputFormatArg,
    fallback_parser: bool,
    use_colors: bool,
    show_warnings: bool,
) -> anyhow::Result<i32> {
    let mut config = load_config(config_path)?;
    if fallback_parser {
        config.parser = ParserKind::Fallback;
    }

    let validator = SkillValidator::with_config(config).with_report_formatter(
        ReportFormatter::new(ReportOptions { use_colors, show_warnings }),
    );

    // Default to the current directory, treated as a skill directory
    let paths = if paths.is_empty() { vec![PathBuf::from(".")] } else { paths };

    let mut all_valid = true;
    for path in &paths {
        let result = if path.is_dir() {
            validator.validate_directory(path)
        } else {
            // Missing paths flow through the file scanner, which reports
            // them as a structural error in the result itself
            validator.validate_file(path)
        };

        let formatted = validator.format_result(&result, format.into())?;
        println!("{formatted}");

        all_valid &= result.valid;
    }

    Ok(if all_valid { 0 } else { 1 })
}

fn run_validate_config(config_path: Option<PathBuf>) -> anyhow::Result<i32> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from("skillcheck.yaml"));

    println!("Validating configuration: {}", config_path.display());

    match SchemaConfig::load_from_file(&config_path) {
        Ok(config) => {
            println!("✅ Configuration is valid");
            println!("📊 Configuration summary:");
            println!("  Skill file name: {}", config.skill_file_name);
            println!("  Parser: {:?}", config.parser);
            println!(
                "  Limits: name ≤ {} chars, description ≤ {} chars, body {}..{} words",
                config.name_max_length,
                config.description_max_length,
                config.body_min_words,
                config.body_max_words
            );
            println!("  Reserved words: {}", config.reserved_words.join(", "));
            println!("  Allowed properties: {}", config.allowed_properties.join(", "));
            Ok(0)
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {e}");
            Ok(1)
        }
    }
}

fn run_show_schema(config_path: Option<PathBuf>) -> anyhow::Result<i32> {
    let config = load_config(config_path)?;
    println!("{}", config.to_json()?);
    Ok(0)
}

fn init_logging(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };

    tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}
