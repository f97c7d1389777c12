//! jetjoin — translate generated SQL into the Jet join grammar.
//!
//! # Usage
//!
//! ```bash
//! # Translate a statement
//! jetjoin "select * from a inner join b on p1 left outer join c on p2"
//!
//! # Read statements from stdin, one per line
//! cat queries.sql | jetjoin
//!
//! # Show how a statement is rewritten
//! jetjoin explain "select * from a inner join b on p1, c"
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use jetjoin::prelude::*;
use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jetjoin")]
#[command(version)]
#[command(about = "Rewrite SELECT joins into the Jet engine's parenthesized grammar", long_about = None)]
#[command(after_help = "EXAMPLES:
    jetjoin 'select * from a inner join b on p1 left outer join c on p2'
    jetjoin explain 'select * from a inner join b on p1, c where c.x = 1'
    cat queries.sql | jetjoin --format json")]
struct Cli {
    /// The statement to translate (reads stdin when omitted)
    sql: Option<String>,

    /// Path to a jetjoin.toml configuration file
    #[arg(short, long, env = "JETJOIN_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show each step of the translation
    Explain {
        /// The statement to explain
        sql: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "jetjoin=debug" } else { "jetjoin=warn" };
    let filter = EnvFilter::try_from_env("JETJOIN_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = JetConfig::load(cli.config.as_deref())?;
    let translator = Translator::from_config(&config);

    if let Some(Commands::Explain { sql }) = &cli.command {
        return explain(&translator, sql, cli.format);
    }

    match &cli.sql {
        Some(sql) => translate_one(&translator, sql, cli.format)?,
        None if io::stdin().is_terminal() => {
            println!("{}", "jetjoin — Jet join grammar translator".cyan().bold());
            println!();
            println!("Usage: jetjoin <SQL> [OPTIONS]");
            println!();
            println!("Try: jetjoin --help");
        }
        None => {
            let mut failed = 0usize;
            for line in io::stdin().lock().lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(e) = translate_one(&translator, &line, cli.format) {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                    failed += 1;
                }
            }
            if cli.verbose {
                print_stats(&translator);
            }
            if failed > 0 {
                anyhow::bail!("{} statement(s) could not be translated", failed);
            }
        }
    }

    Ok(())
}

fn translate_one(translator: &Translator, sql: &str, format: OutputFormat) -> Result<()> {
    let translated = translator.translate(sql)?;
    match format {
        OutputFormat::Text => println!("{}", translated),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "original": sql, "translated": translated })
        ),
    }
    Ok(())
}

fn explain(translator: &Translator, sql: &str, format: OutputFormat) -> Result<()> {
    let explanation = translator.explain(sql)?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
        return Ok(());
    }

    println!("{}", "Statement Explanation".cyan().bold());
    println!();
    println!("{} {}", "Input:".dimmed(), sql.yellow());
    println!("{} {}", "Kind:".dimmed(), explanation.kind.to_string().cyan());

    match explanation.span {
        Some(span) => {
            println!(
                "{} [{}, {})  {}",
                "FROM clause:".dimmed(),
                span.begin,
                span.end,
                span.body(sql).white()
            );
            println!();
            println!("{}", "Groups:".green().bold());
            for group in &explanation.groups {
                let marker = if group.wrapped { "wrapped".magenta() } else { "kept".dimmed() };
                println!("  [{}] {} {}", group.index, marker, group.original.trim().white());
                if group.rewritten != group.original {
                    println!("      → {}", group.rewritten.trim().yellow());
                }
            }
        }
        None => println!("{}", "Nothing to translate.".dimmed()),
    }

    println!();
    println!("{}", "Translated SQL:".green().bold());
    println!("  {}", explanation.translated.white());
    Ok(())
}

fn print_stats(translator: &Translator) {
    let stats = translator.stats();
    let cache = translator.cache().stats();
    eprintln!();
    eprintln!(
        "{} {} translated, {} passed through, {} failed",
        "Stats:".dimmed(),
        stats.translations.to_string().cyan(),
        stats.passthroughs.to_string().cyan(),
        stats.failures.to_string().red()
    );
    eprintln!(
        "{} {} entries, {:.1}% hit rate",
        "Cache:".dimmed(),
        cache.entries.to_string().cyan(),
        cache.hit_rate()
    );
}
